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

use ctrail_common::config::config_from_str;
use ctrail_core::{
    errors::CtrailError,
    evaluator::*,
    filter::FilterKind,
    phase::FlightPhase,
    profile::{EvalWarning,PROFILE_COLUMNS},
    track::{TrackColumn,TrackPoint}
};

// run with "cargo test -p ctrail_core --test test_evaluator -- --nocapture"

#[test]
fn test_level_track () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());
    let points = level_track( 20, 5.0, 35000.0, 450.0);

    let profile = evaluator.evaluate( &points, "A320", None).unwrap();
    for w in &profile.warnings { println!("warning: {w}") }
    for r in &profile.records { println!("{:?}", r) }

    assert_eq!( profile.len(), 20);
    assert!( profile.records.iter().all( |r| r.phase == FlightPhase::Cruise));
    assert!( profile.records.iter().all( |r| r.path_angle.abs() < 1e-9));
    assert_eq!( profile.records[0].mass, 70000.0 + 0.75 * 30000.0);
    assert!( profile.warnings.contains( &EvalWarning::DerivedColumn { column: TrackColumn::Mach, count: 20 }));
    assert!( !profile.used_substitute());
    assert!( profile.has_warnings());
    assert!( profile.fuel_burned() > 0.0);
    assert!( (profile.duration() - 95.0 / 60.0).abs() < 1e-9);
}

#[test]
fn test_climb_track () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());
    let points = linear_track( 60, 5.0, 10000.0, 1500.0, 300.0);

    let profile = evaluator.evaluate( &points, "A320", Some(68000.0)).unwrap();
    for w in &profile.warnings { println!("warning: {w}") }

    let n = profile.len();
    assert_eq!( n, 60);
    assert_eq!( profile.records[0].mass, 68000.0);
    assert!( profile.records[..n-1].iter().all( |r| r.phase == FlightPhase::Climb));
    assert!( (profile.records[10].rocd - 1500.0).abs() < 1e-6);
    assert!( profile.records.windows(2).all( |w| w[1].mass <= w[0].mass));

    // the last point has zero rates, its fuel flow is replaced by the penultimate one
    assert_eq!( profile.records[n-1].fuel_flow, profile.records[n-2].fuel_flow);
    assert!( profile.warnings.iter().any( |w| matches!( w, EvalWarning::FinalFuelFlowCorrected{..})));
}

#[test]
fn test_unknown_type () {
    let provider = provider();
    let points = level_track( 20, 5.0, 35000.0, 450.0);

    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());
    let profile = evaluator.evaluate( &points, "B999", None).unwrap();
    println!("warnings: {:?}", profile.warnings);
    assert_eq!( profile.aircraft_type, "A320");
    assert_eq!( profile.requested_type, "B999");
    assert!( profile.used_substitute());
    assert!( matches!( &profile.warnings[0], EvalWarning::UnknownAircraftType{requested,..} if requested == "B999"));

    let config = EvaluatorConfig { default_aircraft_type: None, ..EvaluatorConfig::default() };
    let evaluator = TrackEvaluator::new( &provider, config);
    let res = evaluator.evaluate( &points, "B999", None);
    assert_eq!( res.unwrap_err(), CtrailError::UnknownAircraftType("B999".to_string()));
}

#[test]
fn test_ias_only () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());
    let points: Vec<TrackPoint> = level_track( 20, 5.0, 35000.0, 0.0).into_iter().map( |mut p| {
        p.tas = None;
        p.ias = Some(265.0);
        p
    }).collect();

    let profile = evaluator.evaluate( &points, "MOCK", None).unwrap();
    let rec = &profile.records[5];
    println!("{rec:?}");
    assert!( rec.tas > 440.0 && rec.tas < 460.0);
    assert!( (rec.cas - 265.0).abs() < 1e-6);
    assert!( profile.warnings.contains( &EvalWarning::DerivedColumn { column: TrackColumn::Tas, count: 20 }));

    let no_speed: Vec<TrackPoint> = points.into_iter().map( |mut p| { p.ias = None; p }).collect();
    assert!( matches!( evaluator.evaluate( &no_speed, "MOCK", None), Err(CtrailError::InputError(_))));
}

#[test]
fn test_duplicates_and_irregular_sampling () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());

    let mut points = level_track( 40, 3.0, 24000.0, 420.0);
    let dup = points[7].clone().with( TrackColumn::AltBaro, 31000.0);
    points.insert( 7, dup);
    points.swap( 20, 21);

    let prepared = evaluator.preprocess( &points).unwrap();
    assert_eq!( prepared.len(), (117.0f64 / 5.0).floor() as usize + 1);
    assert!( prepared.altitude.iter().all( |a| *a == 24000.0));

    let profile = evaluator.evaluate( &points, "MOCK", None).unwrap();
    assert!( profile.records.iter().all( |r| r.phase == FlightPhase::Cruise));
}

#[test]
fn test_kinematic_inconsistency () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());

    let mut points = level_track( 20, 5.0, 5000.0, 150.0);
    points[10].alt_baro = Some(10000.0);

    let res = evaluator.evaluate( &points, "MOCK", None);
    println!("{res:?}");
    assert!( matches!( res, Err(CtrailError::KinematicInconsistency(_))));
    assert!( !res.unwrap_err().is_recoverable());
}

#[test]
fn test_batch () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());

    let requests = vec![
        TrackRequest { points: Vec::new(), aircraft_type: "A320".to_string(), takeoff_mass: None },
        TrackRequest { points: level_track( 20, 5.0, 35000.0, 450.0), aircraft_type: "MOCK".to_string(), takeoff_mass: None },
        TrackRequest { points: level_track( 30, 5.0, 33000.0, 440.0), aircraft_type: "XXXX".to_string(), takeoff_mass: Some(60000.0) },
    ];

    let results = evaluator.evaluate_batch( &requests);
    assert_eq!( results.len(), 3);
    assert!( matches!( results[0], Err(CtrailError::InputError(_))));
    assert!( results[0].as_ref().unwrap_err().is_recoverable());
    assert_eq!( results[1].as_ref().unwrap().len(), 20);
    assert_eq!( results[2].as_ref().unwrap().aircraft_type, "A320");
}

#[test]
fn test_savitzky_golay_config () {
    let provider = provider();
    let config: EvaluatorConfig = config_from_str( r#"(
        resample_interval: 5.0,
        filter: SavitzkyGolay(window: 13, order: 5),
        damping: 0.2,
        duplicate_key: alt_geom,
        default_aircraft_type: Some("MOCK"),
    )"#).unwrap();
    println!("{config:?}");
    assert_eq!( config.filter, FilterKind::savitzky_golay());
    assert_eq!( config.final_fuel_tolerance, 0.25);

    let evaluator = TrackEvaluator::new( &provider, config);
    let points = linear_track( 40, 5.0, 12000.0, 1200.0, 280.0);
    let profile = evaluator.evaluate( &points, "MOCK", None).unwrap();

    assert!( profile.warnings.contains( &EvalWarning::DuplicateKeyFallback { requested: TrackColumn::AltGeom, used: TrackColumn::AltBaro }));
    assert!( (profile.records[20].rocd - 1200.0).abs() < 1e-3);
}

#[test]
fn test_profile_columns () {
    let provider = provider();
    let evaluator = TrackEvaluator::new( &provider, EvaluatorConfig::default());
    let profile = evaluator.evaluate( &level_track( 20, 5.0, 35000.0, 450.0), "MOCK", None).unwrap();

    let header: Vec<String> = PROFILE_COLUMNS.iter().map( |c| c.header()).collect();
    println!("{}", header.join(","));
    assert_eq!( header[0], "time");
    assert!( header.contains( &"fuel_flow[kg/min]".to_string()));

    let row: Vec<String> = PROFILE_COLUMNS.iter().map( |c| (c.extract)( &profile.records[0]).to_string()).collect();
    println!("{}", row.join(","));
    assert_eq!( row[3], "Cruise");
    assert_eq!( row[0], "2024-05-01 12:00:00");
}
