#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! FIPS reference table types.
//!
//! These types describe the Census Bureau geocode reference file (one row
//! per geographic entity, tagged with a summary level) and the clean
//! county reference records derived from it. They are independent of the
//! air quality data they are later joined against.

pub mod fips;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Granularity of a row in the geocode reference file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SummaryLevel {
    /// Level `040`: one row per state (or state-equivalent).
    #[strum(serialize = "040")]
    #[serde(rename = "040")]
    State,
    /// Level `050`: one row per county or county-equivalent.
    #[strum(serialize = "050")]
    #[serde(rename = "050")]
    County,
}

impl SummaryLevel {
    /// Parses a raw summary level code.
    ///
    /// Returns `None` for levels the pipeline does not use (nation,
    /// county subdivisions, places, ...).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }
}

/// A raw row from the header-less geocode reference file.
///
/// Only the positional columns the pipeline reads are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReferenceRow {
    /// 1-based line number in the source file.
    pub line: u64,
    /// Column 0: summary level code (e.g. `"040"`, `"050"`).
    pub summary_level: String,
    /// Column 1: state numeric code, possibly unpadded.
    pub state_code: String,
    /// Column 2: county numeric code, possibly unpadded.
    pub county_code: String,
    /// Column 6: free-text area name.
    pub area_name: String,
}

/// A state-level reference row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    /// Two-digit state FIPS code.
    pub state_fips: String,
    /// Full state name (e.g. "Virginia").
    pub state_name: String,
}

/// A county-level reference record with its state name attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    /// Two-digit state FIPS code.
    pub state_fips: String,
    /// Three-digit county FIPS code.
    pub county_fips: String,
    /// Five-digit county FIPS code (`state_fips` + `county_fips`).
    pub fips: String,
    /// Full state name from the matching level `040` row.
    pub state_name: String,
    /// County name as it appears in the reference file
    /// (e.g. "Charles City County").
    pub raw_county_name: String,
    /// County name with administrative suffixes removed
    /// (e.g. "Charles City").
    pub normalized_county_name: String,
}
