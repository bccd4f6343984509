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

use num::{Float,ToPrimitive};

pub mod macros;
pub mod datetime;
pub mod uom;
pub mod config;

// syntactic sugar - this is just more readable in formula-heavy code
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn asin(x:f64) -> f64 {x.asin() }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

/// linear interpolation between (x0,y0) and (x1,y1) at x. Degenerate intervals return y0
#[inline]
pub fn lerp (x0: f64, y0: f64, x1: f64, y1: f64, x: f64)->f64 {
    let dx = x1 - x0;
    if dx == 0.0 { y0 } else { y0 + (y1 - y0) * (x - x0) / dx }
}

/// blend a filtered value with its original: `damping` = 1 keeps the original, 0 takes the filtered value
#[inline]
pub fn damp (original: f64, filtered: f64, damping: f64)->f64 {
    original * damping + filtered * (1.0 - damping)
}

/// relative difference of `a` with respect to reference `b` (absolute difference if `b` is zero)
#[inline]
pub fn rel_diff (a: f64, b: f64)->f64 {
    if b == 0.0 { (a - b).abs() } else { ((a - b) / b).abs() }
}

/// median of a slice of floats that does not require the slice to be sorted.
/// NaNs are ignored, an empty (or all NaN) input returns None
pub fn median<T> (values: &[T])->Option<f64> where T: Float + ToPrimitive {
    let mut v: Vec<f64> = values.iter().filter_map( |x| x.to_f64()).filter( |x| !x.is_nan()).collect();
    if v.is_empty() { return None }

    v.sort_by( |a,b| a.total_cmp(b));
    let n = v.len();
    if n % 2 == 1 { Some(v[n/2]) } else { Some( (v[n/2 - 1] + v[n/2]) / 2.0) }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}
