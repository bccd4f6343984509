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

mod common;
use common::*;

use std::str::FromStr;
use ctrail_core::{
    phase::*,
    track::{Track,TrackColumn,TrackPoint}
};

use FlightPhase::*;

#[test]
fn test_default_window () {
    assert_eq!( default_window( Some(5.0)), 18);
    assert_eq!( default_window( Some(1.0)), 90);
    assert_eq!( default_window( Some(200.0)), 1);
    assert_eq!( default_window( None), 1);
}

#[test]
fn test_climb () {
    let rocd = vec![600.0; 40];
    let phases = assign( &rocd, 18);
    assert!( phases.iter().all( |p| *p == Some(Climb)));
}

#[test]
fn test_cruise () {
    let rocd = vec![0.0; 40];
    let phases = assign( &rocd, 18);
    assert!( phases.iter().all( |p| *p == Some(Cruise)));
}

#[test]
fn test_thresholds () {
    assert_eq!( classify( &[500.0], 1), vec![Some(Climb)]);
    assert_eq!( classify( &[-500.0], 1), vec![Some(Descent)]);
    assert_eq!( classify( &[499.9], 1), vec![Some(Cruise)]);
    assert_eq!( classify( &[-499.9], 1), vec![Some(Cruise)]);
}

#[test]
fn test_mixed_windows () {
    // climb, level, descent with a window of 3
    let mut rocd = vec![1500.0; 5];
    rocd.extend( vec![0.0; 5]);
    rocd.extend( vec![-1500.0; 5]);

    let classified = classify( &rocd, 3);
    println!("classified: {classified:?}");
    assert_eq!( classified[2], Some(Climb));
    assert_eq!( classified[3], None); // window covers climb and level
    assert_eq!( classified[5], Some(Cruise));
    assert_eq!( classified[8], None);
    assert_eq!( classified[14], Some(Descent)); // extended by repeating the last value

    let phases = assign( &rocd, 3);
    println!("assigned: {phases:?}");
    assert!( phases.iter().all( |p| p.is_some()));
    assert_eq!( phases[3], Some(Climb)); // forward filled
    assert_eq!( phases[8], Some(Cruise));
}

#[test]
fn test_fill () {
    let mut phases = vec![ None, None, Some(Climb), None, Some(Cruise), None];
    fill( &mut phases);
    assert_eq!( phases, vec![ Some(Climb), Some(Climb), Some(Climb), Some(Climb), Some(Cruise), Some(Cruise)]);

    let mut phases: Vec<Option<FlightPhase>> = vec![None; 3];
    fill( &mut phases);
    assert!( phases.iter().all( |p| p.is_none()));
}

#[test]
fn test_assign_track () {
    let points: Vec<TrackPoint> = (0..30).map( |i| {
        TrackPoint::new( at( i as f64 * 5.0)).with( TrackColumn::BaroRate, if i < 20 { 2000.0 } else { 0.0 })
    }).collect();
    let track = Track::try_from_points( points).unwrap();

    let phases = assign_track( &track, TrackColumn::BaroRate, None).unwrap();
    assert_eq!( phases[0], Some(Climb));
    assert_eq!( phases[29], Some(Cruise));

    assert!( assign_track( &track, TrackColumn::GeomRate, None).is_err());
}

#[test]
fn test_labels () {
    assert_eq!( TakeOff.to_string(), "Take-Off");
    assert_eq!( FlightPhase::from_str("Taxi-Out").unwrap(), TaxiOut);
    assert_eq!( Descent.label(), "Descent");
}
