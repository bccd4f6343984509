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

use thiserror::Error;

pub type Result<T> = std::result::Result<T,CtrailError>;

/// the errors of a single track evaluation. None of them affects the evaluation of other tracks
#[derive(Error,Debug,Clone,PartialEq)]
pub enum CtrailError {

    /// the track cannot be processed (empty, missing columns, unresolved duplicates, invalid filter params).
    /// No partial result is produced, callers can skip or retry with different input
    #[error("input error {0}")]
    InputError(String),

    /// the performance provider does not know the requested type. Recovered by the evaluator if there is a default type
    #[error("unknown aircraft type '{0}'")]
    UnknownAircraftType(String),

    /// corrupted input detected during simulation (path angle out of range, undefined phase, invalid configuration)
    #[error("kinematic inconsistency {0}")]
    KinematicInconsistency(String),
}

impl CtrailError {
    /// can the evaluator (or its caller) continue with modified input or a substitute
    pub fn is_recoverable (&self)->bool {
        !matches!( self, CtrailError::KinematicInconsistency(_))
    }
}

macro_rules! input_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::CtrailError::InputError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use input_error;

macro_rules! kinematic_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::CtrailError::KinematicInconsistency( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use kinematic_error;
