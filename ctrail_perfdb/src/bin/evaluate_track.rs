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

use std::io;
use anyhow::Result;
use tracing_subscriber::EnvFilter;
use ctrail_common::{define_cli, check_cli, MinMaxAvg, config::load_config_or_default};
use ctrail_core::{EvaluatorConfig, FlightProfile, TrackEvaluator};
use ctrail_perfdb::{PerfDb, read_track_path, write_profile, write_profile_path};

define_cli! { ARGS [about="reconstruct drag, thrust and fuel burn from a surveillance track"] =
    perfdb: Option<String> [help="pathname of aircraft performance RON file (default is the embedded database)", long],
    config: Option<String> [help="pathname of evaluator config RON file", long],
    tow: Option<f64> [help="takeoff mass [kg], estimated from aircraft weight limits if not set", long],
    output: Option<String> [help="pathname of profile CSV output (default is stdout)", long, short],
    track: String [help="pathname of surveillance track CSV", long],
    aircraft: String [help="ICAO aircraft type designator", long]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .with_writer( io::stderr)
        .init();

    let db = match &ARGS.perfdb {
        Some(path) => PerfDb::load( path)?,
        None => PerfDb::embedded()?
    };
    let config: EvaluatorConfig = load_config_or_default( ARGS.config.as_ref())?;
    let points = read_track_path( &ARGS.track)?;

    let evaluator = TrackEvaluator::new( &db, config);
    let profile = evaluator.evaluate( &points, &ARGS.aircraft, ARGS.tow)?;

    match &ARGS.output {
        Some(path) => {
            write_profile_path( path, &profile)?;
            print_summary( &profile);
        }
        None => write_profile( io::stdout(), &profile)?
    }

    Ok(())
}

fn print_summary (profile: &FlightProfile) {
    println!("flight:       {}", profile.flight_id());
    println!("aircraft:     {} (requested {})", profile.aircraft_type, profile.requested_type);
    println!("records:      {}", profile.len());
    println!("duration:     {:.1} min", profile.duration());
    println!("distance:     {:.1} nm", profile.distance());
    println!("takeoff mass: {:.0} kg", profile.takeoff_mass);
    println!("fuel burned:  {:.1} kg", profile.fuel_burned());

    let mut ff = MinMaxAvg::new();
    let mut thrust = MinMaxAvg::new();
    for r in &profile.records {
        ff.add( r.fuel_flow);
        thrust.add( r.thrust);
    }
    println!("fuel flow:    min {:.2}, max {:.2}, avg {:.2} kg/min", ff.min, ff.max, ff.avg);
    println!("thrust:       min {:.0}, max {:.0}, avg {:.0} N", thrust.min, thrust.max, thrust.avg);

    let phases: Vec<String> = profile.phase_counts().iter().map( |(p,n)| format!("{p}: {n}")).collect();
    println!("phases:       {}", phases.join(", "));

    for w in &profile.warnings {
        println!("WARNING: {w}");
    }
}
