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

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use strum::{AsRefStr,Display,EnumIter,EnumString,IntoEnumIterator};
use itertools::Itertools;
use ctrail_common::{datetime::{de_postime,ser_postime,secs_between}, median};

use crate::errors::{input_error,Result};

/// the numeric columns of a surveillance track. Names follow the source schema
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,EnumIter,AsRefStr)]
#[strum(serialize_all="snake_case")]
#[serde(rename_all="snake_case")]
pub enum TrackColumn {
    Lat,
    Lon,
    AltBaro,     // ft
    AltGeom,     // ft
    Gs,          // kt
    Ias,         // kt
    Tas,         // kt
    Mach,
    Track,       // deg
    Roll,        // deg
    MagHeading,  // deg
    TrueHeading, // deg
    BaroRate,    // ft/min
    GeomRate,    // ft/min
}

impl TrackColumn {
    /// the columns that can stand in for the duplicate resolution key, in order of preference
    pub const GEOMETRY_COLUMNS: [TrackColumn;4] = [TrackColumn::AltBaro, TrackColumn::AltGeom, TrackColumn::Lat, TrackColumn::Lon];
}

/// one surveillance position report. All values except the time are optional since sources differ in what they report.
/// TrackPoints are never mutated by the processing pipeline, filters produce new points
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrackPoint {
    #[serde(rename="postime", serialize_with="ser_postime", deserialize_with="de_postime")]
    pub time: DateTime<Utc>,

    // flight identity, carried through resampling
    #[serde(default)] pub icao24: Option<String>,
    #[serde(default)] pub callsign: Option<String>,

    #[serde(default)] pub lat: Option<f64>,
    #[serde(default)] pub lon: Option<f64>,
    #[serde(default)] pub alt_baro: Option<f64>,
    #[serde(default)] pub alt_geom: Option<f64>,
    #[serde(default)] pub gs: Option<f64>,
    #[serde(default)] pub ias: Option<f64>,
    #[serde(default)] pub tas: Option<f64>,
    #[serde(default)] pub mach: Option<f64>,
    #[serde(default)] pub track: Option<f64>,
    #[serde(default)] pub roll: Option<f64>,
    #[serde(default)] pub mag_heading: Option<f64>,
    #[serde(default)] pub true_heading: Option<f64>,
    #[serde(default)] pub baro_rate: Option<f64>,
    #[serde(default)] pub geom_rate: Option<f64>,
}

impl TrackPoint {
    pub fn new (time: DateTime<Utc>)->Self {
        TrackPoint {
            time,
            icao24: None, callsign: None,
            lat: None, lon: None,
            alt_baro: None, alt_geom: None,
            gs: None, ias: None, tas: None, mach: None,
            track: None, roll: None, mag_heading: None, true_heading: None,
            baro_rate: None, geom_rate: None
        }
    }

    /// builder style setter
    pub fn with (mut self, col: TrackColumn, v: f64)->Self {
        self.set( col, Some(v));
        self
    }

    pub fn get (&self, col: TrackColumn)->Option<f64> {
        match col {
            TrackColumn::Lat => self.lat,
            TrackColumn::Lon => self.lon,
            TrackColumn::AltBaro => self.alt_baro,
            TrackColumn::AltGeom => self.alt_geom,
            TrackColumn::Gs => self.gs,
            TrackColumn::Ias => self.ias,
            TrackColumn::Tas => self.tas,
            TrackColumn::Mach => self.mach,
            TrackColumn::Track => self.track,
            TrackColumn::Roll => self.roll,
            TrackColumn::MagHeading => self.mag_heading,
            TrackColumn::TrueHeading => self.true_heading,
            TrackColumn::BaroRate => self.baro_rate,
            TrackColumn::GeomRate => self.geom_rate,
        }
    }

    pub (crate) fn set (&mut self, col: TrackColumn, v: Option<f64>) {
        let field = match col {
            TrackColumn::Lat => &mut self.lat,
            TrackColumn::Lon => &mut self.lon,
            TrackColumn::AltBaro => &mut self.alt_baro,
            TrackColumn::AltGeom => &mut self.alt_geom,
            TrackColumn::Gs => &mut self.gs,
            TrackColumn::Ias => &mut self.ias,
            TrackColumn::Tas => &mut self.tas,
            TrackColumn::Mach => &mut self.mach,
            TrackColumn::Track => &mut self.track,
            TrackColumn::Roll => &mut self.roll,
            TrackColumn::MagHeading => &mut self.mag_heading,
            TrackColumn::TrueHeading => &mut self.true_heading,
            TrackColumn::BaroRate => &mut self.baro_rate,
            TrackColumn::GeomRate => &mut self.geom_rate,
        };
        *field = v.filter( |x| !x.is_nan());
    }
}

impl fmt::Display for TrackPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "TrackPoint( {}", self.time)?;
        if let Some(id) = &self.icao24 { write!( f, ", icao24: {id}")?; }
        if let Some(cs) = &self.callsign { write!( f, ", callsign: {cs}")?; }
        for col in TrackColumn::iter() {
            if let Some(v) = self.get(col) { write!( f, ", {col}: {v}")?; }
        }
        write!( f, ")")
    }
}

/// does any point carry a value for `col`
pub fn has_column (points: &[TrackPoint], col: TrackColumn)->bool {
    points.iter().any( |p| p.get(col).is_some())
}

/// check if timestamps are strictly increasing
pub fn is_strictly_increasing (points: &[TrackPoint])->bool {
    points.iter().tuple_windows().all( |(a,b)| a.time < b.time)
}

/// an ordered sequence of track points of one flight with strictly increasing timestamps.
/// The invariant is checked on construction, there is no way to mutate points afterwards
#[derive(Debug,Clone,PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>
}

impl Track {
    pub fn try_from_points (points: Vec<TrackPoint>)->Result<Self> {
        if points.is_empty() {
            Err( input_error!("empty track"))
        } else if !is_strictly_increasing( &points) {
            Err( input_error!("track timestamps are not strictly increasing"))
        } else {
            Ok( Track { points })
        }
    }

    pub fn points (&self)->&[TrackPoint] { self.points.as_slice() }

    pub fn len (&self)->usize { self.points.len() }
    pub fn is_empty (&self)->bool { self.points.is_empty() }

    pub fn first (&self)->&TrackPoint { &self.points[0] }
    pub fn last (&self)->&TrackPoint { &self.points[self.points.len()-1] }

    pub fn times (&self)->Vec<DateTime<Utc>> {
        self.points.iter().map( |p| p.time).collect()
    }

    pub fn column (&self, col: TrackColumn)->Vec<Option<f64>> {
        self.points.iter().map( |p| p.get(col)).collect()
    }

    pub fn has_column (&self, col: TrackColumn)->bool {
        has_column( &self.points, col)
    }

    /// median time between consecutive points in seconds (None for single point tracks)
    pub fn median_interval_secs (&self)->Option<f64> {
        let dts: Vec<f64> = self.points.iter().tuple_windows().map( |(a,b)| secs_between( &a.time, &b.time)).collect();
        median( &dts)
    }
}
