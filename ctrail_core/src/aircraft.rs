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

//! the injected aircraft performance capability and the configuration logic that selects which drag model applies

use std::{collections::HashMap, sync::Arc};
use serde::{Serialize,Deserialize};
use strum::{Display,IntoStaticStr};

use crate::{
    errors::{kinematic_error,CtrailError,Result},
    phase::FlightPhase
};

// configuration altitude thresholds [ft] (BADA 5.6)
pub const H_MAX_TAKEOFF: f64 = 400.0;
pub const H_MAX_INITIAL_CLIMB: f64 = 2000.0;
pub const H_MAX_APPROACH: f64 = 8000.0;
pub const H_MAX_LANDING: f64 = 3000.0;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct WeightLimits {
    pub mtow: f64, // kg
    pub oew: f64,  // kg
}

impl WeightLimits {
    /// the takeoff mass we assume if none is given
    pub fn default_takeoff_mass (&self)->f64 {
        self.mtow + 0.75 * (self.mtow - self.oew)
    }
}

/// flap and gear settings of a non-clean configuration
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct HighLift {
    pub flap_angle: f64, // deg
    pub landing_gear: bool,
}

/// aerodynamic configuration that determines which drag model applies
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,IntoStaticStr)]
pub enum Configuration {
    #[strum(serialize="Take-Off")] TakeOff,
    #[strum(serialize="Initial Climb")] InitialClimb,
    Cruise,
    Approach,
    Landing,
}

impl Configuration {
    /// derive the configuration from flight phase and pressure altitude [ft]
    pub fn for_phase (phase: FlightPhase, altitude: f64)->Result<Configuration> {
        use FlightPhase::*;

        match phase {
            Climb | TakeOff => {
                if altitude < H_MAX_TAKEOFF { Ok(Configuration::TakeOff) }
                else if altitude < H_MAX_INITIAL_CLIMB { Ok(Configuration::InitialClimb) }
                else { Ok(Configuration::Cruise) }
            }
            Descent | Approach | Landing | TaxiIn => {
                if altitude >= H_MAX_APPROACH { Ok(Configuration::Cruise) }
                else if altitude >= H_MAX_LANDING { Ok(Configuration::Approach) }
                else { Ok(Configuration::Landing) }
            }
            Cruise => Ok(Configuration::Cruise),
            other => Err( kinematic_error!("no configuration for flight phase {other}"))
        }
    }

    /// flap/gear settings, None for the clean (cruise) configuration
    pub fn high_lift (&self)->Option<HighLift> {
        match self {
            Configuration::TakeOff => Some( HighLift { flap_angle: 20.0, landing_gear: true }),
            Configuration::InitialClimb => Some( HighLift { flap_angle: 10.0, landing_gear: false }),
            Configuration::Approach => Some( HighLift { flap_angle: 15.0, landing_gear: false }),
            Configuration::Landing => Some( HighLift { flap_angle: 30.0, landing_gear: true }),
            Configuration::Cruise => None
        }
    }

    pub fn label (&self)->&'static str { self.into() }
}

/// the read-only performance data and evaluators of one aircraft type.
/// Instances are shared between concurrent evaluations and hence have to be immutable
pub trait AircraftPerformance: Send + Sync {
    fn type_code (&self)->&str;

    fn limits (&self)->WeightLimits;

    /// does the clean drag model include a Mach dependent wave drag term
    fn requires_wave_drag (&self)->bool { false }

    /// clean configuration drag [N] for mass [kg], true airspeed [kt], pressure altitude [ft] and path angle [deg]
    fn clean_drag (&self, mass: f64, tas: f64, altitude: f64, path_angle: f64)->f64;

    /// drag [N] with extended flaps [deg] and optional landing gear
    fn nonclean_drag (&self, mass: f64, tas: f64, altitude: f64, flap_angle: f64, path_angle: f64, landing_gear: bool)->f64;

    /// fuel flow [kg/s] for total thrust [N] at pressure altitude [ft]
    fn fuel_flow (&self, thrust: f64, altitude: f64)->f64;
}

/// source of aircraft performance models by type code. Implementations return
/// `CtrailError::UnknownAircraftType` for types they do not know
pub trait AircraftProvider {
    fn get_aircraft (&self, type_code: &str)->Result<Arc<dyn AircraftPerformance>>;
}

impl AircraftProvider for HashMap<String,Arc<dyn AircraftPerformance>> {
    fn get_aircraft (&self, type_code: &str)->Result<Arc<dyn AircraftPerformance>> {
        self.get( type_code).cloned().ok_or_else( || CtrailError::UnknownAircraftType( type_code.to_string()))
    }
}
