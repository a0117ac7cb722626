#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! FIPS reference table construction and county boundary loading.
//!
//! Parses the Census Bureau geocode reference file into clean
//! `(state, county) -> fips` records, and fetches the county boundary
//! `GeoJSON` that the choropleth export is keyed against.

pub mod boundaries;
pub mod reference;
pub mod retry;
pub mod suffix;

use thiserror::Error;

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A reference row is unusable. These are never papered over with a
    /// fabricated FIPS code.
    #[error("Integrity error at reference line {line}: {message}")]
    Integrity {
        /// 1-based line number in the reference file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
