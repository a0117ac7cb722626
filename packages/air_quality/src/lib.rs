#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Air quality dataset loading and scoring.
//!
//! Reads the EPA annual AQI by county CSV, computes each row's bad air
//! day total and severity bin, and rolls the totals up per state for the
//! bar charts.

pub mod aggregate;
pub mod dataset;
pub mod metrics;

use thiserror::Error;

/// Errors that can occur while loading or scoring air quality data.
#[derive(Debug, Error)]
pub enum AirQualityError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset does not have the expected shape.
    #[error("Dataset error: {message}")]
    Dataset {
        /// Description of what went wrong.
        message: String,
    },
}
