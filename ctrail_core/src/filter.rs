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

//! smoothing filters for (resampled) track columns.
//!
//! All filters share the same contract: `(series, damping, params) -> series` with
//! `output = damping * original + (1 - damping) * filtered`, i.e. a damping of 0 returns the pure filter output
//! and a damping of 1 returns the original series

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use nalgebra::DMatrix;
use ctrail_common::{damp, datetime::secs_between};

use crate::errors::{input_error,Result};

pub const DEFAULT_SG_WINDOW: usize = 13;
pub const DEFAULT_SG_ORDER: usize = 5;

/// the closed set of smoothing strategies
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum FilterKind {
    /// Savitzky-Golay polynomial smoothing. Edge points are taken from a polynomial fit of the first/last window
    SavitzkyGolay { window: usize, order: usize },

    /// centered moving average. The half-window at each end keeps its original values
    MovingAverage { window: usize },

    /// linear interpolation between the immediate neighbours, weighted by elapsed time. First and last points are kept
    TemporalInterpolation,
}

impl Default for FilterKind {
    fn default()->Self { FilterKind::TemporalInterpolation }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::SavitzkyGolay{window,order} => write!( f, "SavitzkyGolay(window={window},order={order})"),
            FilterKind::MovingAverage{window} => write!( f, "MovingAverage(window={window})"),
            FilterKind::TemporalInterpolation => write!( f, "TemporalInterpolation"),
        }
    }
}

impl FilterKind {
    pub fn savitzky_golay ()->Self {
        FilterKind::SavitzkyGolay { window: DEFAULT_SG_WINDOW, order: DEFAULT_SG_ORDER }
    }

    /// apply this filter to `series` sampled at `times`. Both slices have to have the same length
    pub fn apply (&self, series: &[f64], times: &[DateTime<Utc>], damping: f64)->Result<Vec<f64>> {
        if series.len() != times.len() {
            return Err( input_error!("series length {} does not match number of timestamps {}", series.len(), times.len()))
        }
        if !(0.0..=1.0).contains( &damping) {
            return Err( input_error!("damping {damping} not in [0,1]"))
        }

        let filtered = match *self {
            FilterKind::SavitzkyGolay{window,order} => savitzky_golay( series, window, order)?,
            FilterKind::MovingAverage{window} => moving_average( series, window)?,
            FilterKind::TemporalInterpolation => temporal_interpolation( series, times),
        };

        Ok( series.iter().zip( filtered.iter()).map( |(x,y)| damp( *x, *y, damping)).collect())
    }
}

/// least squares polynomial smoothing. Interior points use the center row of the projection matrix,
/// the first/last half window is evaluated from the polynomial fitted to the first/last full window
pub fn savitzky_golay (series: &[f64], window: usize, order: usize)->Result<Vec<f64>> {
    let n = series.len();
    if window % 2 == 0 { return Err( input_error!("Savitzky-Golay window {window} has to be odd")) }
    if window <= order { return Err( input_error!("Savitzky-Golay window {window} has to exceed order {order}")) }
    if window > n { return Err( input_error!("Savitzky-Golay window {window} exceeds series length {n}")) }

    let h = projection_matrix( window, order)?;
    let m = window / 2;
    let mut result = vec![0.0; n];

    for i in 0..n {
        let (row, start) = if i < m {
            (i, 0)
        } else if i >= n - m {
            (i - (n - window), n - window)
        } else {
            (m, i - m)
        };
        result[i] = (0..window).map( |k| h[(row,k)] * series[start + k]).sum();
    }

    Ok(result)
}

// H = A (AᵀA)⁻¹ Aᵀ for the Vandermonde matrix A of window positions -m..m
fn projection_matrix (window: usize, order: usize)->Result<DMatrix<f64>> {
    let m = (window / 2) as f64;
    let a = DMatrix::<f64>::from_fn( window, order + 1, |i,j| (i as f64 - m).powi( j as i32));
    let ata_inv = (a.transpose() * &a).try_inverse()
        .ok_or_else( || input_error!("singular Savitzky-Golay system for window {window}, order {order}"))?;
    Ok( &a * ata_inv * a.transpose())
}

/// centered moving average over `window` points. The `window/2` points at each end keep their original values.
/// Even windows are averaged over `window+1` points so that the average stays centered
pub fn moving_average (series: &[f64], window: usize)->Result<Vec<f64>> {
    if window == 0 { return Err( input_error!("moving average window has to be positive")) }

    let n = series.len();
    let arm = window / 2;
    let mut result = series.to_vec();

    if n > 2*arm {
        let width = (2*arm + 1) as f64;
        for i in arm..n-arm {
            result[i] = series[i-arm..=i+arm].iter().sum::<f64>() / width;
        }
    }

    Ok(result)
}

/// replace each inner value by the time weighted interpolation between its neighbours
pub fn temporal_interpolation (series: &[f64], times: &[DateTime<Utc>])->Vec<f64> {
    let n = series.len();
    let mut result = series.to_vec();

    for i in 1..n.saturating_sub(1) {
        let dt_prev = secs_between( &times[i-1], &times[i]);
        let dt_next = secs_between( &times[i], &times[i+1]);
        let span = dt_prev + dt_next;
        if span > 0.0 {
            result[i] = series[i-1] + (series[i+1] - series[i-1]) * dt_prev / span;
        }
    }

    result
}
