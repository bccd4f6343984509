/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the enriched output of a track evaluation

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use ctrail_common::datetime::{ser_postime,secs_between};

use crate::{
    aircraft::Configuration,
    phase::FlightPhase,
    state::AircraftState,
    track::TrackColumn
};

/// one point of a reconstructed flight profile
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct ProfileRecord {
    #[serde(serialize_with="ser_postime")]
    pub time: DateTime<Utc>,
    pub elapsed: f64,      // min
    pub distance: f64,     // nm
    pub phase: FlightPhase,
    pub configuration: Configuration,
    pub altitude: f64,     // ft
    pub tas: f64,          // kt
    pub cas: f64,          // kt
    pub mach: f64,
    pub rocd: f64,         // ft/min
    pub acceleration: f64, // m/s²
    pub path_angle: f64,   // deg
    pub drag: f64,         // N
    pub thrust: f64,       // N
    pub fuel_flow: f64,    // kg/min
    pub mass: f64,         // kg
}

impl ProfileRecord {
    /// snapshot of an updated state. Returns None if the state has not been updated yet
    pub fn from_state (state: &AircraftState)->Option<ProfileRecord> {
        Some( ProfileRecord {
            time: state.time()?,
            elapsed: state.elapsed(),
            distance: state.distance(),
            phase: state.phase()?,
            configuration: state.configuration()?,
            altitude: state.altitude(),
            tas: state.tas(),
            cas: state.cas(),
            mach: state.mach(),
            rocd: state.rocd(),
            acceleration: state.acceleration(),
            path_angle: state.path_angle(),
            drag: state.drag(),
            thrust: state.thrust(),
            fuel_flow: state.fuel_flow(),
            mass: state.mass(),
        })
    }
}

/// a single output cell
#[derive(Debug,Clone,PartialEq)]
pub enum ProfileValue {
    Time(DateTime<Utc>),
    Number(f64),
    Label(&'static str),
}

impl fmt::Display for ProfileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileValue::Time(t) => write!( f, "{}", t.format( ctrail_common::datetime::POSTIME_FORMAT)),
            ProfileValue::Number(v) => write!( f, "{v:.3}"),
            ProfileValue::Label(s) => write!( f, "{s}"),
        }
    }
}

/// static description of an output column
pub struct ProfileColumn {
    pub name: &'static str,
    pub unit: &'static str,
    pub extract: fn(&ProfileRecord)->ProfileValue,
}

impl ProfileColumn {
    pub fn header (&self)->String {
        if self.unit.is_empty() { self.name.to_string() } else { format!("{}[{}]", self.name, self.unit) }
    }
}

macro_rules! num_column {
    ($name:literal, $unit:literal, $field:ident) => {
        ProfileColumn { name: $name, unit: $unit, extract: |r| ProfileValue::Number(r.$field) }
    }
}

/// the fixed output schema
pub static PROFILE_COLUMNS: [ProfileColumn;16] = [
    ProfileColumn { name: "time", unit: "", extract: |r| ProfileValue::Time(r.time) },
    num_column!("elapsed", "min", elapsed),
    num_column!("distance", "nm", distance),
    ProfileColumn { name: "phase", unit: "", extract: |r| ProfileValue::Label(r.phase.label()) },
    ProfileColumn { name: "configuration", unit: "", extract: |r| ProfileValue::Label(r.configuration.label()) },
    num_column!("altitude", "ft", altitude),
    num_column!("tas", "kt", tas),
    num_column!("cas", "kt", cas),
    num_column!("mach", "", mach),
    num_column!("rocd", "ft/min", rocd),
    num_column!("acceleration", "m/s2", acceleration),
    num_column!("path_angle", "deg", path_angle),
    num_column!("drag", "N", drag),
    num_column!("thrust", "N", thrust),
    num_column!("fuel_flow", "kg/min", fuel_flow),
    num_column!("mass", "kg", mass),
];

/// non-fatal conditions encountered during an evaluation
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum EvalWarning {
    /// the requested type was not known to the provider and a substitute was used
    UnknownAircraftType { requested: String, substitute: String, reason: String },

    /// cruise drag was evaluated with a Mach derived true airspeed
    MachDragCorrection { count: usize },

    /// the final fuel flow was replaced by the penultimate one
    FinalFuelFlowCorrected { original: f64, corrected: f64 },

    /// duplicates were resolved on a different column than requested
    DuplicateKeyFallback { requested: TrackColumn, used: TrackColumn },

    /// values of a column were derived from other columns for `count` points
    DerivedColumn { column: TrackColumn, count: usize },
}

impl fmt::Display for EvalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalWarning::UnknownAircraftType{requested,substitute,reason} =>
                write!( f, "aircraft type '{requested}' replaced by '{substitute}' ({reason})"),
            EvalWarning::MachDragCorrection{count} =>
                write!( f, "cruise drag evaluated with Mach derived TAS at {count} points"),
            EvalWarning::FinalFuelFlowCorrected{original,corrected} =>
                write!( f, "final fuel flow {original:.3} kg/min replaced by {corrected:.3} kg/min"),
            EvalWarning::DuplicateKeyFallback{requested,used} =>
                write!( f, "duplicates resolved on {used} instead of {requested}"),
            EvalWarning::DerivedColumn{column,count} =>
                write!( f, "{column} derived for {count} points"),
        }
    }
}

/// the result of a successful track evaluation
#[derive(Debug,Clone,Serialize)]
pub struct FlightProfile {
    /// the type code of the model that was actually used
    pub aircraft_type: String,
    pub requested_type: String,
    /// identity of the evaluated flight, if the track carried one
    pub icao24: Option<String>,
    pub callsign: Option<String>,
    pub takeoff_mass: f64, // kg
    pub records: Vec<ProfileRecord>,
    pub warnings: Vec<EvalWarning>,
}

impl FlightProfile {
    pub fn len (&self)->usize { self.records.len() }
    pub fn is_empty (&self)->bool { self.records.is_empty() }

    /// printable flight identity (callsign, icao24 or "?")
    pub fn flight_id (&self)->&str {
        self.callsign.as_deref().or( self.icao24.as_deref()).unwrap_or("?")
    }

    pub fn has_warnings (&self)->bool { !self.warnings.is_empty() }

    pub fn used_substitute (&self)->bool { self.aircraft_type != self.requested_type }

    /// total fuel burned over the profile [kg]
    pub fn fuel_burned (&self)->f64 {
        match self.records.last() {
            Some(last) => self.takeoff_mass - last.mass,
            None => 0.0
        }
    }

    /// duration [min]
    pub fn duration (&self)->f64 {
        match (self.records.first(), self.records.last()) {
            (Some(first),Some(last)) => secs_between( &first.time, &last.time) / 60.0,
            _ => 0.0
        }
    }

    /// ground distance [nm]
    pub fn distance (&self)->f64 {
        self.records.last().map( |r| r.distance).unwrap_or(0.0)
    }

    /// number of records per phase, in order of first occurrence
    pub fn phase_counts (&self)->Vec<(FlightPhase,usize)> {
        let mut counts: Vec<(FlightPhase,usize)> = Vec::new();
        for r in &self.records {
            match counts.iter_mut().find( |(p,_)| *p == r.phase) {
                Some((_,n)) => *n += 1,
                None => counts.push( (r.phase, 1))
            }
        }
        counts
    }
}
