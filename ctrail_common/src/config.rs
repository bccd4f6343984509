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

//! RON based configuration loading.
//! Configs are plain serde structs. Callers that have an optional config path fall back to `Default`

use std::{fs, path::Path};
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T,ConfigError>;

#[derive(Error,Debug)]
pub enum ConfigError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),
}

/// deserialize a config of type C from the RON file at `path`
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read_to_string( path.as_ref())?;
    Ok( ron::de::from_str( &data)? )
}

/// load config from optional path, using the `Default` of C if there is none
pub fn load_config_or_default<C,P> (path: Option<P>) -> Result<C> where C: for <'a> Deserialize<'a> + Default, P: AsRef<Path> {
    match path {
        Some(path) => load_config_path( path),
        None => Ok( C::default())
    }
}

/// deserialize a config from a RON string (e.g. embedded or test configs)
pub fn config_from_str<C> (s: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::de::from_str( s)? )
}
