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

//! track evaluation pipeline
//!
//! ```text
//!   raw points ─▶ duplicate_resolve ─▶ resample ─▶ filter(tas, alt) ─▶ derive_rate ─▶ phase::assign
//!                                                                                         │
//!   FlightProfile ◀── final fuel check ◀── ProfileRecord ◀── AircraftState::update ◀──────┘
//! ```
//! A [`TrackEvaluator`] only holds a reference to its [`AircraftProvider`] and a config value, i.e. it can be used
//! to evaluate any number of (independent) tracks. Each evaluation owns its [`AircraftState`]

use std::sync::Arc;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};
use ctrail_common::{rel_diff, uom::kt_to_mps};

use crate::{
    aircraft::{AircraftPerformance,AircraftProvider},
    atmosphere::{Atmosphere,AtmosphereConfig},
    errors::{input_error,kinematic_error,CtrailError,Result},
    filter::FilterKind,
    phase::{self,FlightPhase},
    profile::{EvalWarning,FlightProfile,ProfileRecord},
    signal::{derive_rate,duplicate_key,duplicate_resolve,resample},
    state::{AircraftState,StateInput},
    track::{Track,TrackColumn,TrackPoint}
};

pub const DEFAULT_AIRCRAFT_TYPE: &str = "A320";

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// grid spacing of the resampled track [s]
    pub resample_interval: f64,

    /// smoothing applied to airspeed and altitude before rates are derived
    pub filter: FilterKind,

    /// blend factor between original (1) and filtered (0) values
    pub damping: f64,

    /// column used to pick one of several rows with the same timestamp
    pub duplicate_key: TrackColumn,

    /// number of points the phase classifier looks at. Derived from the sampling interval if not set
    pub phase_window: Option<usize>,

    /// substitute for aircraft types the provider does not know. No substitution if not set
    pub default_aircraft_type: Option<String>,

    pub atmosphere: AtmosphereConfig,

    /// max relative deviation of the final fuel flow from the penultimate one
    pub final_fuel_tolerance: f64,
}

impl Default for EvaluatorConfig {
    fn default()->Self {
        EvaluatorConfig {
            resample_interval: 5.0,
            filter: FilterKind::default(),
            damping: 0.0,
            duplicate_key: TrackColumn::AltBaro,
            phase_window: None,
            default_aircraft_type: Some( DEFAULT_AIRCRAFT_TYPE.to_string()),
            atmosphere: AtmosphereConfig::default(),
            final_fuel_tolerance: 0.25,
        }
    }
}

/// the resampled, smoothed and classified series that drive the state machine. All vectors have the same length
#[derive(Debug,Clone)]
pub struct PreparedTrack {
    pub track: Track,
    pub times: Vec<DateTime<Utc>>,
    pub altitude: Vec<f64>,            // ft, resampled but not smoothed
    pub tas: Vec<f64>,                 // kt, smoothed
    pub mach: Vec<f64>,
    pub rocd: Vec<f64>,                // ft/min, from smoothed altitude
    pub acceleration: Vec<f64>,        // m/s², from smoothed tas
    pub ground_speed: Vec<Option<f64>>,// kt
    pub phases: Vec<Option<FlightPhase>>,
    pub warnings: Vec<EvalWarning>,
}

impl PreparedTrack {
    pub fn len (&self)->usize { self.times.len() }
    pub fn is_empty (&self)->bool { self.times.is_empty() }

    pub fn state_input (&self, i: usize)->StateInput {
        StateInput {
            time: self.times[i],
            phase: self.phases[i],
            altitude: self.altitude[i],
            tas: self.tas[i],
            mach: self.mach[i],
            rocd: self.rocd[i],
            acceleration: self.acceleration[i],
            ground_speed: self.ground_speed[i],
        }
    }
}

/// one entry of a batch evaluation
#[derive(Debug,Clone)]
pub struct TrackRequest {
    pub points: Vec<TrackPoint>,
    pub aircraft_type: String,
    pub takeoff_mass: Option<f64>, // kg
}

pub struct TrackEvaluator<'a, P: AircraftProvider + ?Sized> {
    provider: &'a P,
    config: EvaluatorConfig,
}

impl<'a, P: AircraftProvider + ?Sized> TrackEvaluator<'a,P> {
    pub fn new (provider: &'a P, config: EvaluatorConfig)->Self {
        TrackEvaluator { provider, config }
    }

    pub fn config (&self)->&EvaluatorConfig { &self.config }

    /// reconstruct the flight profile of one track. `takeoff_mass` [kg] defaults to the model estimate
    pub fn evaluate (&self, points: &[TrackPoint], aircraft_type: &str, takeoff_mass: Option<f64>)->Result<FlightProfile> {
        let mut warnings: Vec<EvalWarning> = Vec::new();
        let model = self.resolve_model( aircraft_type, &mut warnings)?;

        let prepared = self.preprocess( points)?;
        warnings.extend( prepared.warnings.iter().cloned());

        let mut state = AircraftState::new( model.clone(), self.config.atmosphere, takeoff_mass);
        let takeoff_mass = state.initial_mass();
        let mut records: Vec<ProfileRecord> = Vec::with_capacity( prepared.len());

        for i in 0..prepared.len() {
            state.update( &prepared.state_input(i))?;
            let rec = ProfileRecord::from_state( &state).ok_or_else( || kinematic_error!("no state after update {i}"))?;
            records.push( rec);
        }

        if state.n_mach_corrections() > 0 {
            warnings.push( EvalWarning::MachDragCorrection { count: state.n_mach_corrections() });
        }
        if let Some(w) = self.correct_final_fuel_flow( &mut records) {
            warn!("{w}");
            warnings.push( w);
        }

        let profile = FlightProfile {
            aircraft_type: model.type_code().to_string(),
            requested_type: aircraft_type.to_string(),
            icao24: prepared.track.first().icao24.clone(),
            callsign: prepared.track.first().callsign.clone(),
            takeoff_mass,
            records,
            warnings,
        };
        info!("evaluated {} points of {} track {}: {:.1} min, {:.0} kg fuel, {} warnings",
              profile.len(), profile.aircraft_type, profile.flight_id(), profile.duration(), profile.fuel_burned(), profile.warnings.len());

        Ok(profile)
    }

    /// evaluate independent tracks. A failing track does not affect the others
    pub fn evaluate_batch (&self, requests: &[TrackRequest])->Vec<Result<FlightProfile>> {
        requests.iter().enumerate().map( |(i,req)| {
            let res = self.evaluate( &req.points, &req.aircraft_type, req.takeoff_mass);
            if let Err(e) = &res {
                warn!("track {i} ({}) failed: {e}", req.aircraft_type);
            }
            res
        }).collect()
    }

    /// the signal processing part of the evaluation: resolve duplicates, resample, smooth, derive rates and phases
    pub fn preprocess (&self, points: &[TrackPoint])->Result<PreparedTrack> {
        let cfg = &self.config;
        let mut warnings: Vec<EvalWarning> = Vec::new();

        if points.is_empty() { return Err( input_error!("empty track")) }
        let key = duplicate_key( points, cfg.duplicate_key)?;
        if key != cfg.duplicate_key {
            warnings.push( EvalWarning::DuplicateKeyFallback { requested: cfg.duplicate_key, used: key });
        }

        let unique = duplicate_resolve( points, key)?;
        let track = resample( unique.points(), cfg.resample_interval)?;
        let times = track.times();

        let altitude = filled( track.column( TrackColumn::AltBaro), TrackColumn::AltBaro)?;
        let mut atm = Atmosphere::new( cfg.atmosphere);

        //--- true airspeed, derived from ias (taken as calibrated) where missing
        let mut n_derived = 0;
        let tas: Vec<Option<f64>> = track.points().iter().zip( altitude.iter()).map( |(p,alt)| {
            p.tas.or_else( || p.ias.map( |cas| {
                n_derived += 1;
                atm.update( *alt);
                atm.cas_to_tas( cas)
            }))
        }).collect();
        if n_derived > 0 {
            debug!("derived tas from ias for {n_derived} points");
            warnings.push( EvalWarning::DerivedColumn { column: TrackColumn::Tas, count: n_derived });
        }
        let tas = filled( tas, TrackColumn::Tas)?;

        //--- smoothing and rates
        let tas = cfg.filter.apply( &tas, &times, cfg.damping)?;
        let alt_smoothed = cfg.filter.apply( &altitude, &times, cfg.damping)?;

        let tas_mps: Vec<f64> = tas.iter().map( |v| kt_to_mps(*v)).collect();
        let acceleration = derive_rate( &tas_mps, &times)?;
        let rocd: Vec<f64> = derive_rate( &alt_smoothed, &times)?.into_iter().map( |r| r * 60.0).collect();

        //--- mach, derived from tas where missing
        let mut n_derived = 0;
        let mach: Vec<f64> = track.points().iter().enumerate().map( |(i,p)| {
            p.mach.unwrap_or_else( || {
                n_derived += 1;
                atm.update( altitude[i]);
                atm.tas_to_mach( tas[i])
            })
        }).collect();
        if n_derived > 0 {
            debug!("derived mach from tas for {n_derived} points");
            warnings.push( EvalWarning::DerivedColumn { column: TrackColumn::Mach, count: n_derived });
        }

        let window = cfg.phase_window.unwrap_or_else( || phase::default_window( track.median_interval_secs()));
        let phases = phase::assign( &rocd, window);
        let ground_speed = track.column( TrackColumn::Gs);

        debug!("prepared {} points from {} raw points using {}", track.len(), points.len(), cfg.filter);

        Ok( PreparedTrack { track, times, altitude, tas, mach, rocd, acceleration, ground_speed, phases, warnings })
    }

    fn resolve_model (&self, aircraft_type: &str, warnings: &mut Vec<EvalWarning>)->Result<Arc<dyn AircraftPerformance>> {
        match self.provider.get_aircraft( aircraft_type) {
            Ok(model) => Ok(model),
            Err(e @ CtrailError::UnknownAircraftType(_)) => {
                match &self.config.default_aircraft_type {
                    Some(substitute) if substitute != aircraft_type => {
                        let model = self.provider.get_aircraft( substitute)?;
                        let w = EvalWarning::UnknownAircraftType {
                            requested: aircraft_type.to_string(),
                            substitute: substitute.clone(),
                            reason: e.to_string()
                        };
                        warn!("{w}");
                        warnings.push( w);
                        Ok(model)
                    }
                    _ => Err(e)
                }
            }
            Err(e) => Err(e)
        }
    }

    // the rates of the last point are zero by convention, which can distort its fuel flow
    fn correct_final_fuel_flow (&self, records: &mut [ProfileRecord])->Option<EvalWarning> {
        let n = records.len();
        if n < 2 { return None }

        let prev = records[n-2].fuel_flow;
        let last = records[n-1].fuel_flow;
        if !last.is_finite() || rel_diff( last, prev) > self.config.final_fuel_tolerance {
            records[n-1].fuel_flow = prev;
            Some( EvalWarning::FinalFuelFlowCorrected { original: last, corrected: prev })
        } else {
            None
        }
    }
}

// forward then backward fill gaps of a resampled column. A column without any value is rejected
fn filled (values: Vec<Option<f64>>, col: TrackColumn)->Result<Vec<f64>> {
    let first = values.iter().flatten().next().copied()
        .ok_or_else( || input_error!("track has no {col} values"))?;

    let mut last = first;
    Ok( values.into_iter().map( |v| {
        if let Some(v) = v { last = v }
        last
    }).collect())
}
