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

//! conversions between the aviation units of surveillance data (ft, kt, ft/min) and SI.
//! Track data is kept as plain f64 in source units, these functions are the single place where we switch
//! unit systems so that all physics is computed in SI

use uom::si::{
    f64::{Length,Velocity,MassRate},
    length::{meter,foot,nautical_mile},
    velocity::{meter_per_second,knot,foot_per_minute},
    mass_rate::{kilogram_per_second,kilogram_per_minute}
};

#[inline]
pub fn feet (len: f64)-> Length { Length::new::<foot>(len) }

#[inline]
pub fn knots (v: f64)-> Velocity { Velocity::new::<knot>(v) }

#[inline]
pub fn ft_to_m (ft: f64)->f64 { feet(ft).get::<meter>() }

#[inline]
pub fn kt_to_mps (kt: f64)->f64 { knots(kt).get::<meter_per_second>() }

#[inline]
pub fn mps_to_kt (mps: f64)->f64 { Velocity::new::<meter_per_second>(mps).get::<knot>() }

#[inline]
pub fn fpm_to_mps (fpm: f64)->f64 { Velocity::new::<foot_per_minute>(fpm).get::<meter_per_second>() }

#[inline]
pub fn kg_per_s_to_kg_per_min (ff: f64)->f64 { MassRate::new::<kilogram_per_second>(ff).get::<kilogram_per_minute>() }

/// distance in nautical miles covered at `kt` knots over `secs` seconds
#[inline]
pub fn nm_travelled (kt: f64, secs: f64)->f64 {
    Length::new::<meter>( kt_to_mps(kt) * secs).get::<nautical_mile>()
}
