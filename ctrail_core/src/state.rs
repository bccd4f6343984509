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

//! the per-timestep aircraft state machine
//!
//! An [`AircraftState`] is created for one track evaluation and updated once per track point in strict chronological
//! order. Each update recomputes atmosphere, configuration, drag, thrust and fuel flow for the new point and
//! integrates the mass with the fuel flow of the *previous* point:
//! ```text
//!   mass(t) = mass(t-1) - fuel_flow(t-1) * dt[min]
//! ```

use std::{fmt, sync::Arc};
use chrono::{DateTime,Utc};
use tracing::{debug,warn};
use ctrail_common::{asin, deg, datetime::secs_between, uom::{fpm_to_mps,kt_to_mps,kg_per_s_to_kg_per_min,nm_travelled}};

use crate::{
    aircraft::{AircraftPerformance,Configuration},
    atmosphere::{Atmosphere,AtmosphereConfig,G0},
    errors::{kinematic_error,Result},
    phase::FlightPhase
};

/// the largest path angle magnitude we accept [deg]. Anything beyond indicates corrupted input
pub const MAX_PATH_ANGLE: f64 = 20.0;

/// the (preprocessed) observables of one track point that drive a state update
#[derive(Debug,Clone,Copy)]
pub struct StateInput {
    pub time: DateTime<Utc>,
    pub phase: Option<FlightPhase>,
    pub altitude: f64,             // ft (pressure altitude)
    pub tas: f64,                  // kt
    pub mach: f64,
    pub rocd: f64,                 // ft/min
    pub acceleration: f64,         // m/s²
    pub ground_speed: Option<f64>, // kt
}

/// path angle [deg] from vertical rate [ft/min] and true airspeed [kt]
pub fn path_angle (rocd: f64, tas: f64)->Result<f64> {
    let gamma = deg( asin( fpm_to_mps(rocd) / kt_to_mps(tas)));
    if gamma.abs() < MAX_PATH_ANGLE { // also rejects NaN
        Ok(gamma)
    } else {
        Err( kinematic_error!("path angle {gamma:.1}° for rocd {rocd:.0} ft/min at {tas:.1} kt exceeds ±{MAX_PATH_ANGLE}°"))
    }
}

/// required thrust [N] from drag [N], mass [kg], rocd [ft/min], tas [kt] and acceleration [m/s²], floored at zero
pub fn thrust (drag: f64, mass: f64, rocd: f64, tas: f64, acceleration: f64)->f64 {
    let thr = drag + mass * G0 * fpm_to_mps(rocd) / kt_to_mps(tas) + mass * acceleration;
    thr.max(0.0)
}

pub struct AircraftState {
    model: Arc<dyn AircraftPerformance>,
    atmosphere: Atmosphere,

    initial_mass: f64,
    start_time: Option<DateTime<Utc>>,
    last_time: Option<DateTime<Utc>>,
    last_ground_speed: Option<f64>,
    n_updates: usize,
    n_mach_corrections: usize,

    phase: Option<FlightPhase>,
    configuration: Option<Configuration>,
    altitude: f64,     // ft
    tas: f64,          // kt
    cas: f64,          // kt
    mach: f64,
    rocd: f64,         // ft/min
    acceleration: f64, // m/s²
    path_angle: f64,   // deg
    mass: f64,         // kg
    drag: f64,         // N
    thrust: f64,       // N
    fuel_flow: f64,    // kg/min
    elapsed: f64,      // min since first update
    distance: f64,     // nm since first update
}

impl AircraftState {
    /// create a new state for one evaluation. If no `initial_mass` [kg] is given we use the default
    /// takeoff mass derived from the model weight limits
    pub fn new (model: Arc<dyn AircraftPerformance>, atmosphere: AtmosphereConfig, initial_mass: Option<f64>)->Self {
        let initial_mass = initial_mass.unwrap_or_else( || model.limits().default_takeoff_mass());

        AircraftState {
            model,
            atmosphere: Atmosphere::new( atmosphere),
            initial_mass,
            start_time: None,
            last_time: None,
            last_ground_speed: None,
            n_updates: 0,
            n_mach_corrections: 0,
            phase: None,
            configuration: None,
            altitude: 0.0,
            tas: 0.0,
            cas: 0.0,
            mach: 0.0,
            rocd: 0.0,
            acceleration: 0.0,
            path_angle: 0.0,
            mass: initial_mass,
            drag: 0.0,
            thrust: 0.0,
            fuel_flow: 0.0,
            elapsed: 0.0,
            distance: 0.0,
        }
    }

    /// advance the state to the next track point. Inputs have to be supplied in strict chronological order.
    /// The state is only modified if the update succeeds
    pub fn update (&mut self, input: &StateInput)->Result<()> {
        let phase = input.phase.ok_or_else( || kinematic_error!("undefined flight phase at {}", input.time))?;

        // lagged mass integration with the fuel flow of the previous point
        let (mass, elapsed, distance) = if let Some(last_time) = self.last_time {
            let dt = secs_between( &last_time, &input.time);
            if dt <= 0.0 {
                return Err( kinematic_error!("state update at {} does not advance time (last {})", input.time, last_time))
            }
            let distance = match (self.last_ground_speed, input.ground_speed) {
                (Some(gs0),Some(gs1)) => self.distance + nm_travelled( (gs0 + gs1) / 2.0, dt),
                _ => self.distance
            };
            (self.mass - self.fuel_flow * dt / 60.0, self.elapsed + dt / 60.0, distance)
        } else {
            (self.initial_mass, 0.0, 0.0)
        };

        let configuration = Configuration::for_phase( phase, input.altitude)?;
        let path_angle = path_angle( input.rocd, input.tas)?;

        self.atmosphere.update( input.altitude);
        let cas = self.atmosphere.tas_to_cas( input.tas);

        let model = &self.model;
        let drag = match configuration.high_lift() {
            None => {
                let tas = if model.requires_wave_drag() {
                    if self.n_mach_corrections == 0 {
                        warn!("{} drag includes wave drag, using Mach {:.3} to derive cruise TAS", model.type_code(), input.mach);
                    }
                    self.n_mach_corrections += 1;
                    self.atmosphere.mach_to_tas( input.mach)
                } else {
                    input.tas
                };
                model.clean_drag( mass, tas, input.altitude, path_angle)
            }
            Some(hl) => model.nonclean_drag( mass, input.tas, input.altitude, hl.flap_angle, path_angle, hl.landing_gear)
        };

        let thrust = thrust( drag, mass, input.rocd, input.tas, input.acceleration);
        let fuel_flow = kg_per_s_to_kg_per_min( model.fuel_flow( thrust, input.altitude));

        //--- commit
        if self.start_time.is_none() { self.start_time = Some(input.time) }
        self.last_time = Some(input.time);
        self.last_ground_speed = input.ground_speed;
        self.n_updates += 1;

        self.phase = Some(phase);
        self.configuration = Some(configuration);
        self.altitude = input.altitude;
        self.tas = input.tas;
        self.cas = cas;
        self.mach = input.mach;
        self.rocd = input.rocd;
        self.acceleration = input.acceleration;
        self.path_angle = path_angle;
        self.mass = mass;
        self.drag = drag;
        self.thrust = thrust;
        self.fuel_flow = fuel_flow;
        self.elapsed = elapsed;
        self.distance = distance;

        if self.n_updates % 500 == 0 {
            debug!("{} updates, mass {:.0} kg, elapsed {:.1} min", self.n_updates, self.mass, self.elapsed);
        }
        Ok(())
    }

    //--- accessors

    pub fn model (&self)->&Arc<dyn AircraftPerformance> { &self.model }
    pub fn atmosphere (&self)->&Atmosphere { &self.atmosphere }

    pub fn initial_mass (&self)->f64 { self.initial_mass }
    pub fn time (&self)->Option<DateTime<Utc>> { self.last_time }
    pub fn n_updates (&self)->usize { self.n_updates }
    pub fn n_mach_corrections (&self)->usize { self.n_mach_corrections }

    pub fn phase (&self)->Option<FlightPhase> { self.phase }
    pub fn configuration (&self)->Option<Configuration> { self.configuration }
    pub fn altitude (&self)->f64 { self.altitude }
    pub fn tas (&self)->f64 { self.tas }
    pub fn cas (&self)->f64 { self.cas }
    pub fn mach (&self)->f64 { self.mach }
    pub fn rocd (&self)->f64 { self.rocd }
    pub fn acceleration (&self)->f64 { self.acceleration }
    pub fn path_angle (&self)->f64 { self.path_angle }
    pub fn mass (&self)->f64 { self.mass }
    pub fn drag (&self)->f64 { self.drag }
    pub fn thrust (&self)->f64 { self.thrust }
    pub fn fuel_flow (&self)->f64 { self.fuel_flow }
    pub fn elapsed (&self)->f64 { self.elapsed }
    pub fn distance (&self)->f64 { self.distance }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "AircraftState( type: {}", self.model.type_code())?;
        if let Some(t) = self.last_time { write!( f, ", time: {t}")?; }
        if let Some(p) = self.phase { write!( f, ", phase: {p}")?; }
        if let Some(c) = self.configuration { write!( f, ", conf: {c}")?; }
        write!( f, ", alt: {:.0}, tas: {:.1}, rocd: {:.0}, mass: {:.0}, drag: {:.0}, thr: {:.0}, ff: {:.2})",
            self.altitude, self.tas, self.rocd, self.mass, self.drag, self.thrust, self.fuel_flow)
    }
}
