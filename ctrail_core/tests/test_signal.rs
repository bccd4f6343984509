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

use ctrail_common::datetime::secs_between;
use ctrail_core::{
    errors::CtrailError,
    signal::*,
    track::{TrackColumn,TrackPoint}
};

fn alt_point (secs: f64, alt: f64)->TrackPoint {
    TrackPoint::new( at(secs)).with( TrackColumn::AltBaro, alt)
}

#[test]
fn test_duplicate_resolve () {
    let points = vec![
        alt_point( 0.0, 0.0),
        alt_point( 1.0, 100.0),
        alt_point( 2.0, 500.0),  // outlier
        alt_point( 2.0, 210.0),  // closest to the interpolated 200
        alt_point( 2.0, 150.0),
        alt_point( 3.0, 300.0),
        alt_point( 4.0, 400.0),
    ];

    let track = duplicate_resolve( &points, TrackColumn::AltBaro).unwrap();
    for p in track.points() { println!("{p}") }

    assert_eq!( track.len(), 5);
    assert!( track.len() <= points.len());
    assert_eq!( track.points()[2].alt_baro, Some(210.0));
    assert!( track.points().windows(2).all( |w| w[0].time < w[1].time));
}

#[test]
fn test_duplicate_resolve_unordered () {
    let points = vec![
        alt_point( 3.0, 300.0),
        alt_point( 0.0, 0.0),
        alt_point( 2.0, 200.0),
        alt_point( 1.0, 100.0),
        alt_point( 2.0, 200.0), // identical duplicate, first one wins
    ];

    let track = duplicate_resolve( &points, TrackColumn::AltBaro).unwrap();
    assert_eq!( track.len(), 4);
    assert_eq!( track.first().time, at(0.0));
    assert_eq!( track.last().time, at(3.0));
}

#[test]
fn test_duplicate_key_fallback () {
    let points = vec![
        TrackPoint::new( at(0.0)).with( TrackColumn::Lat, 37.0),
        TrackPoint::new( at(1.0)).with( TrackColumn::Lat, 37.1),
        TrackPoint::new( at(1.0)).with( TrackColumn::Lat, 39.0),
        TrackPoint::new( at(2.0)).with( TrackColumn::Lat, 37.2),
    ];

    assert_eq!( duplicate_key( &points, TrackColumn::AltBaro).unwrap(), TrackColumn::Lat);
    let track = duplicate_resolve( &points, TrackColumn::AltBaro).unwrap();
    assert_eq!( track.len(), 3);
    assert_eq!( track.points()[1].lat, Some(37.1));

    let points = vec![ TrackPoint::new( at(0.0)).with( TrackColumn::Gs, 120.0) ];
    assert!( matches!( duplicate_resolve( &points, TrackColumn::AltBaro), Err(CtrailError::InputError(_))));
    assert!( duplicate_resolve( &[], TrackColumn::AltBaro).is_err());
}

#[test]
fn test_resample () {
    let points = vec![
        alt_point( 0.5, 50.0),
        alt_point( 1.7, 170.0),
        alt_point( 3.2, 320.0),
        alt_point( 6.9, 900.0),
        alt_point( 10.4, 1040.0),
    ];
    let interval = 2.0;
    let track = resample( &points, interval).unwrap();
    for p in track.points() { println!("{p}") }

    // grid from ceil(0.5)=1 to floor(10.4)=10
    assert_eq!( track.len(), (9.0f64 / interval).floor() as usize + 1);
    assert_eq!( track.first().time, at(1.0));
    for w in track.points().windows(2) {
        assert_eq!( secs_between( &w[0].time, &w[1].time), interval);
    }

    for p in track.points() {
        let v = p.alt_baro.unwrap();
        let t = p.time;
        let j = points.iter().position( |q| q.time > t).unwrap();
        let (lo,hi) = (points[j-1].alt_baro.unwrap(), points[j].alt_baro.unwrap());
        assert!( v >= lo.min(hi) && v <= lo.max(hi), "{v} not in [{lo},{hi}]");
    }

    assert!( (track.points()[0].alt_baro.unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_resample_fractional_interval () {
    // 33s is an exact multiple of 1.1s, the grid has to end on the last sample
    let points = vec![ alt_point( 0.0, 0.0), alt_point( 33.0, 3300.0) ];
    let track = resample( &points, 1.1).unwrap();
    println!("{} grid points, last: {}", track.len(), track.last());

    assert_eq!( track.len(), 31);
    assert_eq!( track.last().time, at(33.0));
    assert!( (track.last().alt_baro.unwrap() - 3300.0).abs() < 1e-9);
    for w in track.points().windows(2) {
        assert!( (secs_between( &w[0].time, &w[1].time) - 1.1).abs() < 1e-9);
    }

    let track = resample( &points, 0.3).unwrap();
    assert_eq!( track.len(), 111);
}

#[test]
fn test_resample_identity () {
    let mut points: Vec<TrackPoint> = (0..6).map( |i| alt_point( i as f64, 100.0 * i as f64)).collect();
    for (i,p) in points.iter_mut().enumerate() {
        p.icao24 = Some( if i == 2 { "a00001".to_string() } else { "a4b2c1".to_string() });
        p.callsign = if i < 3 { Some("UAL12".to_string()) } else { Some("UAL21".to_string()) }; // tie
    }

    let track = resample( &points, 2.0).unwrap();
    assert!( track.points().iter().all( |p| p.icao24.as_deref() == Some("a4b2c1")));
    assert!( track.points().iter().all( |p| p.callsign.as_deref() == Some("UAL12")));

    let track = resample( &[ alt_point( 0.0, 0.0), alt_point( 4.0, 40.0)], 2.0).unwrap();
    assert!( track.points().iter().all( |p| p.icao24.is_none() && p.callsign.is_none()));
}

#[test]
fn test_resample_sparse_column () {
    // gs only starts after the first grid point and is carried forward after its last sample
    let points = vec![
        alt_point( 0.0, 0.0),
        alt_point( 4.0, 400.0).with( TrackColumn::Gs, 140.0),
        alt_point( 8.0, 800.0).with( TrackColumn::Gs, 160.0),
        alt_point( 12.0, 1200.0),
    ];
    let track = resample( &points, 2.0).unwrap();
    let gs = track.column( TrackColumn::Gs);
    println!("gs: {gs:?}");

    assert_eq!( gs.len(), 7);
    assert_eq!( gs[0], None);
    assert_eq!( gs[1], None);
    assert_eq!( gs[2], Some(140.0));
    assert_eq!( gs[3], Some(150.0));
    assert_eq!( gs[6], Some(160.0));
}

#[test]
fn test_resample_rejects () {
    let dups = vec![ alt_point( 0.0, 0.0), alt_point( 0.0, 10.0), alt_point( 5.0, 50.0) ];
    assert!( matches!( resample( &dups, 1.0), Err(CtrailError::InputError(_))));

    let short = vec![ alt_point( 0.2, 0.0), alt_point( 0.8, 10.0) ];
    assert!( resample( &short, 1.0).is_err());

    let ok = vec![ alt_point( 0.0, 0.0), alt_point( 5.0, 50.0) ];
    assert!( resample( &ok, 0.0).is_err());
}

#[test]
fn test_derive_rate () {
    let times = vec![ at(0.0), at(2.0), at(6.0)];
    let rates = derive_rate( &[0.0, 10.0, 30.0], &times).unwrap();
    assert_eq!( rates, vec![5.0, 5.0, 0.0]);

    assert!( derive_rate( &[1.0, 2.0], &times).is_err());
    assert!( derive_rate( &[1.0, 2.0], &[at(1.0), at(1.0)]).is_err());
    assert!( derive_rate( &[], &[]).unwrap().is_empty());
}
