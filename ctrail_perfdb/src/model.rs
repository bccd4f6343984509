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

//! a parametric aircraft performance model.
//!
//! Drag follows a parabolic polar `CD = CD0 + k·CL²` with additive increments for flaps and landing gear and an
//! optional compressibility term `20·(M - Mcrit)⁴` above the critical Mach number. Fuel flow per engine is a
//! quadratic in the thrust ratio `r = T / (n·Tmax)`, scaled linearly with altitude

use serde::{Serialize,Deserialize};
use ctrail_common::{cos, pow2, rad, sin, uom::kt_to_mps};
use ctrail_core::{
    aircraft::{AircraftPerformance,WeightLimits},
    atmosphere::{Atmosphere,G0}
};

use crate::errors::{invalid_params,Result};

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct WaveDrag {
    pub mach_crit: f64,
}

/// per engine fuel flow `c0 + c1·r + c2·r²` [kg/s], scaled by `1 + alt_coeff·altitude[ft]`
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct FuelFlowPoly {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    #[serde(default)]
    pub alt_coeff: f64,
}

/// the coefficients of one aircraft type as stored in the performance database
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct AircraftParams {
    pub type_code: String,
    pub mtow: f64,          // kg
    pub oew: f64,           // kg
    pub wing_area: f64,     // m²
    pub cd0: f64,
    pub k: f64,
    pub flap_cd_max: f64,   // CD increment at max flap deflection
    pub flap_max: f64,      // deg
    pub gear_cd: f64,
    #[serde(default)]
    pub wave_drag: Option<WaveDrag>,
    pub engines: u32,
    pub max_thrust: f64,    // N per engine
    pub fuel_flow: FuelFlowPoly,
}

impl AircraftParams {
    pub fn check (&self)->Result<()> {
        let tc = &self.type_code;
        if tc.is_empty() { return Err( invalid_params!("empty type code")) }
        if !(self.oew > 0.0 && self.mtow > self.oew) { return Err( invalid_params!("{tc}: inconsistent weights")) }
        if !(self.wing_area > 0.0) { return Err( invalid_params!("{tc}: wing area has to be positive")) }
        if !(self.cd0 > 0.0 && self.k > 0.0) { return Err( invalid_params!("{tc}: invalid drag polar")) }
        if !(self.flap_max > 0.0 && self.flap_max <= 90.0) { return Err( invalid_params!("{tc}: max flap deflection not in (0,90]")) }
        if self.engines == 0 || !(self.max_thrust > 0.0) { return Err( invalid_params!("{tc}: invalid engine data")) }
        let ff = &self.fuel_flow;
        if ff.c0 < 0.0 || ff.c1 < 0.0 || ff.c2 < 0.0 { return Err( invalid_params!("{tc}: negative fuel flow coefficient")) }
        Ok(())
    }
}

/// [`AircraftPerformance`] implementation based on [`AircraftParams`]. Air density is taken from the standard
/// atmosphere since drag is evaluated per pressure altitude
#[derive(Debug,Clone)]
pub struct ParametricAircraft {
    params: AircraftParams,
    atmosphere: Atmosphere,
}

impl ParametricAircraft {
    pub fn new (params: AircraftParams)->Result<Self> {
        params.check()?;
        Ok( ParametricAircraft { params, atmosphere: Atmosphere::standard() })
    }

    pub fn params (&self)->&AircraftParams { &self.params }

    fn lift_coefficient (&self, mass: f64, q: f64, path_angle: f64)->f64 {
        mass * G0 * cos( rad(path_angle)) / (q * self.params.wing_area)
    }

    fn wave_drag_coefficient (&self, tas: f64, altitude: f64)->f64 {
        match self.params.wave_drag {
            Some(WaveDrag{mach_crit}) => {
                let mach = kt_to_mps(tas) / self.atmosphere.state_at( altitude).speed_of_sound;
                if mach > mach_crit { 20.0 * pow2( pow2( mach - mach_crit)) } else { 0.0 }
            }
            None => 0.0
        }
    }

    fn drag (&self, cd: impl Fn(f64)->f64, mass: f64, tas: f64, altitude: f64, path_angle: f64)->f64 {
        let v = kt_to_mps(tas);
        let q = 0.5 * self.atmosphere.density( altitude) * pow2(v);
        if q <= 0.0 { return 0.0 }

        let cl = self.lift_coefficient( mass, q, path_angle);
        q * self.params.wing_area * cd(cl)
    }
}

impl AircraftPerformance for ParametricAircraft {
    fn type_code (&self)->&str { &self.params.type_code }

    fn limits (&self)->WeightLimits {
        WeightLimits { mtow: self.params.mtow, oew: self.params.oew }
    }

    fn requires_wave_drag (&self)->bool { self.params.wave_drag.is_some() }

    fn clean_drag (&self, mass: f64, tas: f64, altitude: f64, path_angle: f64)->f64 {
        let p = &self.params;
        let cd_wave = self.wave_drag_coefficient( tas, altitude);
        self.drag( |cl| p.cd0 + p.k * pow2(cl) + cd_wave, mass, tas, altitude, path_angle)
    }

    fn nonclean_drag (&self, mass: f64, tas: f64, altitude: f64, flap_angle: f64, path_angle: f64, landing_gear: bool)->f64 {
        let p = &self.params;
        let flap = flap_angle.clamp( 0.0, p.flap_max);
        let cd_flap = p.flap_cd_max * pow2( sin( rad(flap))) / pow2( sin( rad(p.flap_max)));
        let cd_gear = if landing_gear { p.gear_cd } else { 0.0 };
        self.drag( |cl| p.cd0 + cd_flap + cd_gear + p.k * pow2(cl), mass, tas, altitude, path_angle)
    }

    fn fuel_flow (&self, thrust: f64, altitude: f64)->f64 {
        let p = &self.params;
        let n = p.engines as f64;
        let r = (thrust.max(0.0) / (n * p.max_thrust)).min(1.0);
        let FuelFlowPoly{c0,c1,c2,alt_coeff} = p.fuel_flow;

        n * (c0 + c1 * r + c2 * pow2(r)) * (1.0 + alt_coeff * altitude.max(0.0))
    }
}
