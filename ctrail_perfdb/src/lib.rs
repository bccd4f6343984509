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

use std::{collections::HashMap, fs::File, io::{Read,Write}, path::Path, sync::Arc};
use serde::{Serialize,Deserialize};
use ctrail_common::config::load_config_path;
use tracing::{debug,info};
use ctrail_core::{
    aircraft::{AircraftPerformance,AircraftProvider},
    errors::{CtrailError,Result as CtrailResult},
    profile::{FlightProfile,PROFILE_COLUMNS},
    track::TrackPoint
};

pub mod errors;
use errors::{invalid_params,Result};

pub mod model;
use model::{AircraftParams,ParametricAircraft};

/// the performance database that is compiled into this crate
pub const EMBEDDED_PERFDB: &str = include_str!("../configs/perfdb.ron");

/// the serialized form of a performance database
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct PerfDbConfig {
    pub aircraft: Vec<AircraftParams>,
}

/// a set of parametric aircraft models keyed by type code
pub struct PerfDb {
    aircraft: HashMap<String,Arc<ParametricAircraft>>,
}

impl PerfDb {
    pub fn from_config (config: PerfDbConfig)->Result<Self> {
        let mut aircraft = HashMap::with_capacity( config.aircraft.len());

        for params in config.aircraft {
            let type_code = params.type_code.clone();
            let model = ParametricAircraft::new( params)?;
            if aircraft.insert( type_code.clone(), Arc::new(model)).is_some() {
                return Err( invalid_params!("duplicated type code {type_code}"))
            }
        }

        debug!("loaded performance data for {} aircraft types", aircraft.len());
        Ok( PerfDb { aircraft })
    }

    pub fn from_ron_str (s: &str)->Result<Self> {
        let config: PerfDbConfig = ron::de::from_str( s)?;
        PerfDb::from_config( config)
    }

    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        let config: PerfDbConfig = load_config_path( path.as_ref())?;
        let db = PerfDb::from_config( config)?;
        info!("loaded performance database {:?}", path.as_ref());
        Ok(db)
    }

    pub fn embedded ()->Result<Self> {
        PerfDb::from_ron_str( EMBEDDED_PERFDB)
    }

    pub fn len (&self)->usize { self.aircraft.len() }
    pub fn is_empty (&self)->bool { self.aircraft.is_empty() }

    pub fn contains (&self, type_code: &str)->bool { self.aircraft.contains_key( type_code) }

    /// sorted list of known type codes
    pub fn type_codes (&self)->Vec<&str> {
        let mut list: Vec<&str> = self.aircraft.keys().map( |k| k.as_str()).collect();
        list.sort();
        list
    }

    pub fn get (&self, type_code: &str)->Option<&Arc<ParametricAircraft>> {
        self.aircraft.get( type_code)
    }
}

impl AircraftProvider for PerfDb {
    fn get_aircraft (&self, type_code: &str)->CtrailResult<Arc<dyn AircraftPerformance>> {
        match self.aircraft.get( type_code) {
            Some(model) => Ok( model.clone() as Arc<dyn AircraftPerformance>),
            None => Err( CtrailError::UnknownAircraftType( type_code.to_string()))
        }
    }
}

/* #region CSV track input and profile output ************************************************************************/

/// read surveillance track points from CSV. Columns that are not part of the track schema are ignored,
/// missing columns and empty fields are taken as undefined values
pub fn read_track<R: Read> (reader: R)->Result<Vec<TrackPoint>> {
    let mut rdr = csv::ReaderBuilder::new().trim( csv::Trim::All).from_reader( reader);
    let mut points = Vec::new();
    for rec in rdr.deserialize() {
        let p: TrackPoint = rec?;
        points.push( p);
    }
    Ok(points)
}

pub fn read_track_path<P: AsRef<Path>> (path: P)->Result<Vec<TrackPoint>> {
    let points = read_track( File::open( path.as_ref())?)?;
    debug!("read {} track points from {:?}", points.len(), path.as_ref());
    Ok(points)
}

/// write profile records as CSV using the fixed profile column schema
pub fn write_profile<W: Write> (writer: W, profile: &FlightProfile)->Result<()> {
    let mut wtr = csv::Writer::from_writer( writer);
    wtr.write_record( PROFILE_COLUMNS.iter().map( |c| c.header()))?;

    for rec in &profile.records {
        wtr.write_record( PROFILE_COLUMNS.iter().map( |c| (c.extract)(rec).to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_profile_path<P: AsRef<Path>> (path: P, profile: &FlightProfile)->Result<()> {
    write_profile( File::create( path.as_ref())?, profile)?;
    info!("profile with {} records written to {:?}", profile.len(), path.as_ref());
    Ok(())
}

/* #endregion CSV track input and profile output */
