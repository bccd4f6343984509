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

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::{Error as DeError}};

/// the format of surveillance position timestamps if they are not given as RFC 3339
pub const POSTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// fractional seconds from `t0` to `t1` (negative if t1 is before t0)
#[inline]
pub fn secs_between (t0: &DateTime<Utc>, t1: &DateTime<Utc>)->f64 {
    (*t1 - *t0).num_microseconds().map( |us| us as f64 / 1_000_000.0)
        .unwrap_or_else( || (*t1 - *t0).num_milliseconds() as f64 / 1000.0)
}

/// round up to the next whole second (no-op if `t` already is on a whole second)
pub fn ceil_secs (t: &DateTime<Utc>)->DateTime<Utc> {
    let floor = floor_secs(t);
    if floor == *t { floor } else { floor + TimeDelta::seconds(1) }
}

/// truncate to the whole second
pub fn floor_secs (t: &DateTime<Utc>)->DateTime<Utc> {
    t.with_nanosecond(0).unwrap_or(*t)
}

#[inline]
pub fn secs_f64 (secs: f64)->TimeDelta {
    TimeDelta::microseconds( (secs * 1_000_000.0).round() as i64)
}

/// parse either RFC 3339 or the "YYYY-MM-DD hh:mm:ss[.f]" format (interpreted as UTC) used by surveillance sources
pub fn parse_postime (s: &str)->Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        Some( dt.with_timezone(&Utc))
    } else if let Ok(ndt) = NaiveDateTime::parse_from_str( s, POSTIME_FORMAT) {
        Some( ndt.and_utc())
    } else {
        None
    }
}

//--- serde support

pub fn de_postime <'a,D>(deserializer: D) -> Result<DateTime<Utc>,D::Error> where D: Deserializer<'a> {
    let s = String::deserialize(deserializer)?;
    parse_postime( &s).ok_or_else( || D::Error::custom( format!("invalid position time '{s}'")))
}

pub fn ser_postime<S: Serializer> (dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_str( &dt.format( POSTIME_FORMAT).to_string())
}
