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

//! International Standard Atmosphere (BADA 3.1) with optional non-standard day offsets.
//!
//! Altitudes are pressure altitudes in ft, speeds are in kt. The model is split at the tropopause
//! (11000 m geopotential): linear temperature lapse and power law pressure below, isothermal temperature and
//! exponential pressure decay above.
//!
//! Speed conversions operate on the *last computed* state, i.e. callers have to [`Atmosphere::update`] the
//! model for a new altitude before converting speeds at that altitude. This is an explicit call order
//! contract - conversions never re-derive the state from an altitude.

use serde::{Serialize,Deserialize};
use ctrail_common::{pow2, sqrt, uom::{ft_to_m,kt_to_mps,mps_to_kt}};

/// standard temperature at MSL [K]
pub const T0: f64 = 288.15;
/// standard pressure at MSL [Pa]
pub const P0: f64 = 101325.0;
/// standard density at MSL [kg/m³]
pub const RHO0: f64 = 1.225;
/// speed of sound at MSL [m/s]
pub const A0: f64 = 340.294;
/// adiabatic index of air
pub const KAPPA: f64 = 1.4;
/// real gas constant for air [m²/(K·s²)]
pub const R: f64 = 287.05287;
/// gravitational acceleration [m/s²]
pub const G0: f64 = 9.80665;
/// ISA temperature gradient below the tropopause [K/m]
pub const BETA_T: f64 = -0.0065;
/// geopotential pressure altitude of the tropopause [m]
pub const H_TROP: f64 = 11000.0;
/// ISA temperature at the tropopause [K]
pub const T_ISA_TROP: f64 = T0 + BETA_T * H_TROP;

const MU: f64 = (KAPPA - 1.0) / KAPPA;

/// non-standard day deviations from ISA at mean sea level
#[derive(Debug,Clone,Copy,Default,PartialEq,Serialize,Deserialize)]
pub struct AtmosphereConfig {
    /// temperature differential at MSL [K]
    #[serde(default)]
    pub temp_delta: f64,

    /// pressure differential at MSL [Pa]
    #[serde(default)]
    pub pressure_delta: f64,
}

/// thermodynamic state at a given pressure altitude
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct AtmosphereState {
    pub altitude: f64,       // ft
    pub temperature: f64,    // K
    pub pressure: f64,       // Pa
    pub density: f64,        // kg/m³
    pub speed_of_sound: f64, // m/s
}

#[derive(Debug,Clone)]
pub struct Atmosphere {
    config: AtmosphereConfig,
    state: AtmosphereState,
}

impl Atmosphere {
    /// a new model that is initialized to the MSL state of the given day
    pub fn new (config: AtmosphereConfig)->Self {
        let state = compute_state( &config, 0.0);
        Atmosphere { config, state }
    }

    pub fn standard ()->Self {
        Atmosphere::new( AtmosphereConfig::default())
    }

    pub fn config (&self)->&AtmosphereConfig { &self.config }

    /// the last computed state
    pub fn state (&self)->&AtmosphereState { &self.state }

    /// recompute the state for a new pressure altitude [ft]. This has to be called before speed conversions
    pub fn update (&mut self, altitude: f64)->&AtmosphereState {
        self.state = compute_state( &self.config, altitude);
        &self.state
    }

    /// pure state computation that does not change the last computed state
    pub fn state_at (&self, altitude: f64)->AtmosphereState {
        compute_state( &self.config, altitude)
    }

    pub fn temperature (&self, altitude: f64)->f64 { temperature( &self.config, ft_to_m(altitude)) }

    pub fn pressure (&self, altitude: f64)->f64 { pressure( &self.config, ft_to_m(altitude)) }

    pub fn density (&self, altitude: f64)->f64 {
        let h = ft_to_m(altitude);
        density( temperature( &self.config, h), pressure( &self.config, h))
    }

    //--- speed conversions on the last computed state

    /// true airspeed [kt] -> calibrated airspeed [kt] (BADA 3.1-23)
    pub fn tas_to_cas (&self, tas: f64)->f64 {
        let v = kt_to_mps(tas);
        let p = self.state.pressure;
        let rho = self.state.density;

        let inner = (1.0 + MU/2.0 * rho/p * pow2(v)).powf( 1.0/MU) - 1.0;
        let cas = sqrt( 2.0/MU * P0/RHO0 * ((1.0 + p/P0 * inner).powf( MU) - 1.0));
        mps_to_kt(cas)
    }

    /// calibrated airspeed [kt] -> true airspeed [kt] (BADA 3.1-24)
    pub fn cas_to_tas (&self, cas: f64)->f64 {
        let v = kt_to_mps(cas);
        let p = self.state.pressure;
        let rho = self.state.density;

        let inner = (1.0 + MU/2.0 * RHO0/P0 * pow2(v)).powf( 1.0/MU) - 1.0;
        let tas = sqrt( 2.0/MU * p/rho * ((1.0 + P0/p * inner).powf( MU) - 1.0));
        mps_to_kt(tas)
    }

    /// true airspeed [kt] -> Mach
    pub fn tas_to_mach (&self, tas: f64)->f64 {
        kt_to_mps(tas) / self.state.speed_of_sound
    }

    /// Mach -> true airspeed [kt]
    pub fn mach_to_tas (&self, mach: f64)->f64 {
        mps_to_kt( mach * self.state.speed_of_sound)
    }
}

impl Default for Atmosphere {
    fn default()->Self { Atmosphere::standard() }
}

//--- the ISA formulas (h in m)

fn temperature (config: &AtmosphereConfig, h: f64)->f64 {
    if h < H_TROP {
        T0 + config.temp_delta + BETA_T * h
    } else {
        T0 + config.temp_delta + BETA_T * H_TROP
    }
}

// the pressure at a given pressure altitude only depends on the ISA temperature, i.e. temp_delta cancels out
fn pressure (config: &AtmosphereConfig, h: f64)->f64 {
    let p_msl = P0 + config.pressure_delta;
    let exp = -G0 / (BETA_T * R);

    if h < H_TROP {
        let t_isa = T0 + BETA_T * h;
        p_msl * (t_isa / T0).powf( exp)
    } else {
        let p_trop = p_msl * (T_ISA_TROP / T0).powf( exp);
        p_trop * (-G0 / (R * T_ISA_TROP) * (h - H_TROP)).exp()
    }
}

#[inline]
fn density (temp: f64, p: f64)->f64 {
    p / (R * temp)
}

#[inline]
fn speed_of_sound (temp: f64)->f64 {
    sqrt( KAPPA * R * temp)
}

fn compute_state (config: &AtmosphereConfig, altitude: f64)->AtmosphereState {
    let h = ft_to_m(altitude);
    let temperature = temperature( config, h);
    let pressure = pressure( config, h);

    AtmosphereState {
        altitude,
        temperature,
        pressure,
        density: density( temperature, pressure),
        speed_of_sound: speed_of_sound( temperature),
    }
}
