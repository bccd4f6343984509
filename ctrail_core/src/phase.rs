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

use serde::{Serialize,Deserialize};
use strum::{Display,EnumString,IntoStaticStr};
use tracing::debug;

use crate::{errors::{input_error,Result}, track::{Track,TrackColumn}};

/// vertical rate threshold that separates climb/descent from cruise [ft/min]
pub const ROCD_THRESHOLD: f64 = 500.0;

/// how far the classifier looks ahead if no explicit window is given [s]
pub const DEFAULT_LOOKAHEAD: f64 = 90.0;

/// the flight phases the state machine knows about. The classifier only produces Climb, Cruise and Descent,
/// the others can be supplied by hosts that have better information (e.g. airport surface data)
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,IntoStaticStr)]
pub enum FlightPhase {
    #[strum(serialize="Take-Off")] TakeOff,
    Climb,
    Cruise,
    Descent,
    Approach,
    Landing,
    #[strum(serialize="Taxi-In")] TaxiIn,
    #[strum(serialize="Taxi-Out")] TaxiOut,
}

impl FlightPhase {
    pub fn label (&self)->&'static str { self.into() }
}

/// number of points that cover the default lookahead for a given median sampling interval
pub fn default_window (median_interval: Option<f64>)->usize {
    match median_interval {
        Some(dt) if dt > 0.0 => ((DEFAULT_LOOKAHEAD / dt).floor() as usize).max(1),
        _ => 1
    }
}

fn classify_window (rocds: &[f64])->Option<FlightPhase> {
    if rocds.iter().all( |r| *r >= ROCD_THRESHOLD) {
        Some(FlightPhase::Climb)
    } else if rocds.iter().all( |r| *r <= -ROCD_THRESHOLD) {
        Some(FlightPhase::Descent)
    } else if rocds.iter().all( |r| *r > -ROCD_THRESHOLD && *r < ROCD_THRESHOLD) {
        Some(FlightPhase::Cruise)
    } else {
        None
    }
}

/// classify each point from the rocd values of the point itself and the following `window-1` points. The series
/// is extended past its end by repeating the last value. Points with mixed windows stay undefined
pub fn classify (rocd: &[f64], window: usize)->Vec<Option<FlightPhase>> {
    let n = rocd.len();
    if n == 0 { return Vec::new() }

    let window = window.max(1);
    let last = rocd[n-1];
    let mut buf: Vec<f64> = Vec::with_capacity(window);

    (0..n).map( |i| {
        buf.clear();
        buf.extend( (i..i+window).map( |j| if j < n { rocd[j] } else { last }));
        classify_window( &buf)
    }).collect()
}

/// resolve undefined phases by forward fill followed by backward fill
pub fn fill (phases: &mut [Option<FlightPhase>]) {
    let mut last: Option<FlightPhase> = None;
    for p in phases.iter_mut() {
        if p.is_some() { last = *p } else { *p = last }
    }

    let mut next: Option<FlightPhase> = None;
    for p in phases.iter_mut().rev() {
        if p.is_some() { next = *p } else { *p = next }
    }
}

/// classify and fill. The result is only undefined if no point could be classified at all
pub fn assign (rocd: &[f64], window: usize)->Vec<Option<FlightPhase>> {
    let mut phases = classify( rocd, window);
    let n_undefined = phases.iter().filter( |p| p.is_none()).count();
    fill( &mut phases);
    debug!("assigned phases to {} points with window {window} ({n_undefined} filled)", rocd.len());
    phases
}

/// assign phases based on a rocd column of a track. If `window` is None it is derived from the median sampling interval
pub fn assign_track (track: &Track, rocd_col: TrackColumn, window: Option<usize>)->Result<Vec<Option<FlightPhase>>> {
    let rocd: Vec<f64> = track.column( rocd_col).into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or_else( || input_error!("missing {rocd_col} values"))?;
    let window = window.unwrap_or_else( || default_window( track.median_interval_secs()));
    Ok( assign( &rocd, window))
}
