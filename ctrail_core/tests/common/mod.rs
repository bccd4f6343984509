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
#![allow(unused)]

// shared test fixtures: a simple aircraft model with constant lift-to-drag ratios and track builders

use std::{collections::HashMap, sync::Arc};
use chrono::{DateTime,TimeZone,Utc};
use ctrail_common::datetime::secs_f64;
use ctrail_core::{
    atmosphere::G0,
    aircraft::{AircraftPerformance,WeightLimits},
    track::{TrackColumn,TrackPoint}
};

pub struct MockAircraft {
    pub type_code: String,
    pub wave_drag: bool,
}

impl MockAircraft {
    pub fn new (type_code: &str)->Self { MockAircraft { type_code: type_code.to_string(), wave_drag: false } }
}

impl AircraftPerformance for MockAircraft {
    fn type_code (&self)->&str { &self.type_code }

    fn limits (&self)->WeightLimits { WeightLimits { mtow: 70000.0, oew: 40000.0 } }

    fn requires_wave_drag (&self)->bool { self.wave_drag }

    fn clean_drag (&self, mass: f64, _tas: f64, _altitude: f64, _path_angle: f64)->f64 {
        mass * G0 / 15.0
    }

    fn nonclean_drag (&self, mass: f64, _tas: f64, _altitude: f64, flap_angle: f64, _path_angle: f64, landing_gear: bool)->f64 {
        let ld = 12.0 - flap_angle / 10.0 - if landing_gear { 1.0 } else { 0.0 };
        mass * G0 / ld
    }

    fn fuel_flow (&self, thrust: f64, _altitude: f64)->f64 {
        0.2 + thrust * 1.5e-5
    }
}

pub type Provider = HashMap<String,Arc<dyn AircraftPerformance>>;

pub fn provider ()->Provider {
    let mut map: Provider = HashMap::new();
    map.insert( "A320".to_string(), Arc::new( MockAircraft::new("A320")));
    map.insert( "MOCK".to_string(), Arc::new( MockAircraft::new("MOCK")));
    map
}

pub fn t0 ()->DateTime<Utc> {
    Utc.with_ymd_and_hms( 2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn at (secs: f64)->DateTime<Utc> {
    t0() + secs_f64(secs)
}

/// `n` points spaced `dt` seconds apart starting on a whole second, altitude changing with `rocd` [ft/min]
pub fn linear_track (n: usize, dt: f64, alt0: f64, rocd: f64, tas: f64)->Vec<TrackPoint> {
    (0..n).map( |i| {
        let secs = i as f64 * dt;
        TrackPoint::new( at(secs))
            .with( TrackColumn::AltBaro, alt0 + rocd * secs / 60.0)
            .with( TrackColumn::Tas, tas)
            .with( TrackColumn::Gs, tas)
            .with( TrackColumn::Lat, 37.0 + i as f64 * 0.001)
            .with( TrackColumn::Lon, -122.0)
    }).collect()
}

pub fn level_track (n: usize, dt: f64, alt: f64, tas: f64)->Vec<TrackPoint> {
    linear_track( n, dt, alt, 0.0, tas)
}
