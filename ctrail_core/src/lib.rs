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

//! reconstruction of aircraft performance (drag, thrust, fuel flow, mass) from surveillance tracks.
//!
//! The crate does not contain any aircraft performance data. Hosts inject it through the
//! [`AircraftProvider`] and [`AircraftPerformance`] traits

pub mod errors;
pub mod track;
pub mod atmosphere;
pub mod filter;
pub mod signal;
pub mod phase;
pub mod aircraft;
pub mod state;
pub mod profile;
pub mod evaluator;

pub use errors::{CtrailError,Result};
pub use track::{Track,TrackColumn,TrackPoint};
pub use atmosphere::{Atmosphere,AtmosphereConfig,AtmosphereState};
pub use filter::FilterKind;
pub use phase::FlightPhase;
pub use aircraft::{AircraftPerformance,AircraftProvider,Configuration,HighLift,WeightLimits};
pub use state::{AircraftState,StateInput};
pub use profile::{EvalWarning,FlightProfile,ProfileColumn,ProfileRecord,ProfileValue,PROFILE_COLUMNS};
pub use evaluator::{EvaluatorConfig,PreparedTrack,TrackEvaluator,TrackRequest};
