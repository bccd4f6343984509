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

//! track preprocessing: duplicate resolution, resampling onto a regular time grid and rate derivation

use chrono::{DateTime,TimeDelta,Utc};
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::{debug,warn};
use ctrail_common::{lerp, datetime::{ceil_secs,floor_secs,secs_between,secs_f64}};

use crate::{
    errors::{input_error,Result},
    track::{has_column,is_strictly_increasing,Track,TrackColumn,TrackPoint}
};

/// (relative time in seconds, value) samples of one column, used for time weighted interpolation
struct Samples(Vec<(f64,f64)>);

impl Samples {
    fn of_column (points: &[&TrackPoint], t0: &DateTime<Utc>, col: TrackColumn)->Self {
        Samples( points.iter().filter_map( |p| p.get(col).map( |v| (secs_between( t0, &p.time), v))).collect())
    }

    /// time interpolated value at `t`. Before the first sample there is no value, after the last sample
    /// the last value is carried forward
    fn interpolate (&self, t: f64)->Option<f64> {
        let s = &self.0;
        if s.is_empty() || t < s[0].0 { return None }

        let j = s.partition_point( |(ts,_)| *ts <= t);
        if j >= s.len() {
            Some( s[s.len()-1].1)
        } else {
            let (t0,v0) = s[j-1];
            let (t1,v1) = s[j];
            Some( lerp( t0, v0, t1, v1, t))
        }
    }
}

/// the column duplicates are resolved on. Falls back to the first available geometry column if `key` has no values
pub fn duplicate_key (points: &[TrackPoint], key: TrackColumn)->Result<TrackColumn> {
    if has_column( points, key) {
        Ok(key)
    } else if let Some(col) = TrackColumn::GEOMETRY_COLUMNS.iter().find( |c| has_column( points, **c)) {
        warn!("{key} not present in track, resolving duplicates on {col} instead");
        Ok(*col)
    } else {
        Err( input_error!("track has neither {key} nor any geometry column to resolve duplicates"))
    }
}

/// remove rows with duplicated timestamps.
/// Of all rows sharing a timestamp we keep the one whose `key` value is closest to the value interpolated in time
/// between the surrounding rows with unique timestamps. Rows without a defined distance rank last, ties keep the first
/// input row. Input does not have to be sorted
pub fn duplicate_resolve (points: &[TrackPoint], key: TrackColumn)->Result<Track> {
    if points.is_empty() { return Err( input_error!("empty track")) }
    let key = duplicate_key( points, key)?;

    let sorted: Vec<&TrackPoint> = points.iter().sorted_by_key( |p| p.time).collect(); // stable
    let t0 = sorted[0].time;

    let groups: Vec<Vec<&TrackPoint>> = sorted.iter()
        .chunk_by( |p| p.time)
        .into_iter()
        .map( |(_,g)| g.copied().collect())
        .collect();

    let anchors: Vec<&TrackPoint> = groups.iter().filter( |g| g.len() == 1).map( |g| g[0]).collect();
    let anchors = Samples::of_column( &anchors, &t0, key);

    let mut n_dropped = 0;
    let mut resolved: Vec<TrackPoint> = Vec::with_capacity( groups.len());

    for group in groups {
        if group.len() == 1 {
            resolved.push( group[0].clone());
        } else {
            let t = secs_between( &t0, &group[0].time);
            let v_interp = anchors.interpolate(t);

            let best = group.iter()
                .map( |p| match (p.get(key), v_interp) {
                    (Some(v),Some(vi)) => (v - vi).abs(),
                    _ => f64::INFINITY
                })
                .enumerate()
                .min_by( |(_,a),(_,b)| a.total_cmp(b)) // min_by returns the first of equal elements
                .map( |(i,_)| i)
                .unwrap_or(0);

            n_dropped += group.len() - 1;
            resolved.push( group[best].clone());
        }
    }

    if n_dropped > 0 {
        debug!("dropped {n_dropped} duplicate rows using {key}");
    }
    Track::try_from_points( resolved)
}

/// interpolate all numeric columns onto a regular grid that starts at the first whole second of the track,
/// ends at the last whole second and has a spacing of `interval` seconds. Identity columns (icao24, callsign)
/// get the most frequent value of the input.
/// The input has to have strictly increasing timestamps, i.e. duplicates have to be resolved first
pub fn resample (points: &[TrackPoint], interval: f64)->Result<Track> {
    if !(interval > 0.0) { return Err( input_error!("invalid resample interval {interval}")) }
    if points.is_empty() { return Err( input_error!("empty track")) }
    if !is_strictly_increasing( points) {
        return Err( input_error!("track contains duplicate or unordered timestamps, resolve duplicates before resampling"))
    }

    let t0 = points[0].time;
    let start = ceil_secs( &t0);
    let end = floor_secs( &points[points.len()-1].time);
    if start > end {
        return Err( input_error!("track shorter than one second cannot be resampled"))
    }

    // grid arithmetic in whole microseconds so that spans which are multiples of the interval keep their last point
    let interval_us = secs_f64( interval).num_microseconds().filter( |us| *us > 0)
        .ok_or_else( || input_error!("resample interval {interval} out of range"))?;
    let span_us = (end - start).num_microseconds()
        .ok_or_else( || input_error!("track span too long to be resampled"))?;
    let n = (span_us / interval_us) as usize + 1;

    let refs: Vec<&TrackPoint> = points.iter().collect();
    let columns: Vec<(TrackColumn,Samples)> = TrackColumn::iter()
        .map( |col| (col, Samples::of_column( &refs, &t0, col)))
        .filter( |(_,s)| !s.0.is_empty())
        .collect();

    let icao24 = mode( points.iter().filter_map( |p| p.icao24.as_deref()));
    let callsign = mode( points.iter().filter_map( |p| p.callsign.as_deref()));

    let offset = secs_between( &t0, &start);
    let mut grid: Vec<TrackPoint> = Vec::with_capacity(n);
    for k in 0..n {
        let dt_us = k as i64 * interval_us;
        let mut p = TrackPoint::new( start + TimeDelta::microseconds( dt_us));
        let t = offset + dt_us as f64 / 1_000_000.0;
        for (col,samples) in &columns {
            p.set( *col, samples.interpolate( t));
        }
        p.icao24 = icao24.clone();
        p.callsign = callsign.clone();
        grid.push(p);
    }

    debug!("resampled {} points onto {} grid points at {interval}s", points.len(), n);
    Track::try_from_points( grid)
}

/// the most frequent value, ties going to the lexicographically smallest one
fn mode<'a> (values: impl Iterator<Item=&'a str>)->Option<String> {
    values.counts().into_iter()
        .max_by( |(a,na),(b,nb)| na.cmp(nb).then_with( || b.cmp(a)))
        .map( |(v,_)| v.to_string())
}

/// forward difference rate per second. The rate of the last point is 0
pub fn derive_rate (series: &[f64], times: &[DateTime<Utc>])->Result<Vec<f64>> {
    if series.len() != times.len() {
        return Err( input_error!("series length {} does not match number of timestamps {}", series.len(), times.len()))
    }

    let n = series.len();
    let mut rates = vec![0.0; n];
    for i in 0..n.saturating_sub(1) {
        let dt = secs_between( &times[i], &times[i+1]);
        if dt <= 0.0 {
            return Err( input_error!("non-increasing timestamps at {}", times[i+1]))
        }
        rates[i] = (series[i+1] - series[i]) / dt;
    }

    Ok(rates)
}
