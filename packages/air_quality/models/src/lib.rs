#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Air quality record, bin, and aggregate types.
//!
//! A [`PrimaryRecord`] is one county-year row of the EPA annual AQI
//! summary. After it has been joined to a FIPS code it becomes a
//! [`ResolvedRecord`], carrying its "bad air days" total and the
//! [`BadAirBin`] the choropleth colors it by.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One row of the air quality dataset.
///
/// Day-count columns are optional: blank or absent cells count as zero
/// when the severity total is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryRecord {
    /// State name (e.g. "Virginia").
    #[serde(rename = "State")]
    pub state_name: String,
    /// County name as the dataset spells it (e.g. "Baltimore (City)").
    #[serde(rename = "County")]
    pub county_name: String,
    /// Days in the "Unhealthy" AQI category.
    #[serde(rename = "Unhealthy Days", default)]
    pub unhealthy_days: Option<u32>,
    /// Days in the "Very Unhealthy" AQI category.
    #[serde(rename = "Very Unhealthy Days", default)]
    pub very_unhealthy_days: Option<u32>,
    /// Days in the "Hazardous" AQI category.
    #[serde(rename = "Hazardous Days", default)]
    pub hazardous_days: Option<u32>,
    /// Days in the "Unhealthy for Sensitive Groups" AQI category.
    #[serde(rename = "Unhealthy for Sensitive Groups Days", default)]
    pub unhealthy_for_sensitive_groups_days: Option<u32>,
}

/// Severity bucket for a county's bad air day total.
///
/// Declaration order is the legend order.
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
pub enum BadAirBin {
    /// No bad air days.
    #[strum(serialize = "0")]
    #[serde(rename = "0")]
    Zero,
    /// 1 to 5 days.
    #[strum(serialize = "1–5")]
    #[serde(rename = "1–5")]
    OneToFive,
    /// 6 to 15 days.
    #[strum(serialize = "6–15")]
    #[serde(rename = "6–15")]
    SixToFifteen,
    /// 16 to 30 days.
    #[strum(serialize = "16–30")]
    #[serde(rename = "16–30")]
    SixteenToThirty,
    /// More than 30 days.
    #[strum(serialize = "30+")]
    #[serde(rename = "30+")]
    OverThirty,
}

impl BadAirBin {
    /// Returns all bins in legend order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Zero,
            Self::OneToFive,
            Self::SixToFifteen,
            Self::SixteenToThirty,
            Self::OverThirty,
        ]
    }

    /// Position of this bin in legend order (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A joined and scored air quality record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// State name.
    #[serde(rename = "State")]
    pub state_name: String,
    /// County name (after any data patch).
    #[serde(rename = "County")]
    pub county_name: String,
    /// Five-digit county FIPS code, `None` when the join missed.
    pub fips: Option<String>,
    /// Sum of the four unhealthy-or-worse day counts.
    pub bad_air_days: u32,
    /// Severity bucket for `bad_air_days`.
    pub bad_air_bin: BadAirBin,
    /// Display label, `"County, State"`.
    pub county_label: String,
}

/// Total bad air days across a state's counties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTotal {
    /// State name.
    #[serde(rename = "State")]
    pub state_name: String,
    /// Sum of `bad_air_days` over the state's rows.
    pub bad_air_days: u64,
}

/// Average bad air days per county row in a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAverage {
    /// State name.
    #[serde(rename = "State")]
    pub state_name: String,
    /// Mean of `bad_air_days` over the state's rows.
    pub bad_air_days: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_are_in_legend_order() {
        let labels: Vec<String> = BadAirBin::all().iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["0", "1–5", "6–15", "16–30", "30+"]);
    }

    #[test]
    fn bin_order_matches_index() {
        for (i, bin) in BadAirBin::all().iter().enumerate() {
            assert_eq!(bin.index(), i);
        }
        assert!(BadAirBin::Zero < BadAirBin::OverThirty);
    }

    #[test]
    fn bins_parse_from_labels() {
        assert_eq!("16–30".parse::<BadAirBin>().unwrap(), BadAirBin::SixteenToThirty);
        assert!("16-30".parse::<BadAirBin>().is_err(), "labels use an en dash");
    }
}
