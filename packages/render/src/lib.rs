#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output files for the bad air county map.
//!
//! Everything the map and charts need is written into one output
//! directory:
//!
//! - `resolved_counties.csv`: every scored row, including join misses
//! - `state_totals.csv` / `state_averages.csv`: the bar chart rows
//! - `choropleth.geojson`: county boundaries with bin and fill color
//! - `charts.json`: legend and bar chart definitions
//!
//! Each file is written to a `.tmp` sibling and renamed into place, so a
//! failed run never leaves a half-written output behind.

pub mod charts;
pub mod choropleth;
pub mod colors;
pub mod tables;

use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use bad_air_air_quality_models::{ResolvedRecord, StateAverage, StateTotal};
use bad_air_geography::boundaries::BoundarySet;

use crate::colors::BinColors;

/// File name of the per-county CSV.
pub const RESOLVED_COUNTIES_CSV: &str = "resolved_counties.csv";

/// File name of the state totals CSV.
pub const STATE_TOTALS_CSV: &str = "state_totals.csv";

/// File name of the state averages CSV.
pub const STATE_AVERAGES_CSV: &str = "state_averages.csv";

/// File name of the choropleth `GeoJSON`.
pub const CHOROPLETH_GEOJSON: &str = "choropleth.geojson";

/// File name of the chart definitions.
pub const CHARTS_JSON: &str = "charts.json";

/// Errors that can occur while writing outputs.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the exports are built from.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Scored rows after the domain filter.
    pub records: &'a [ResolvedRecord],
    /// Top states by total bad air days.
    pub totals: &'a [StateTotal],
    /// Top states by average bad air days per county.
    pub averages: &'a [StateAverage],
    /// County boundaries keyed by FIPS.
    pub boundaries: &'a BoundarySet,
    /// Fill color per bin.
    pub colors: &'a BinColors,
}

/// Writes every output file into `dir`, creating it if needed.
///
/// Returns the paths written, in a fixed order.
///
/// # Errors
///
/// Returns [`RenderError`] if the directory cannot be created or any
/// file fails to serialize or write.
pub fn write_all(dir: &Path, input: &RenderInput<'_>) -> Result<Vec<PathBuf>, RenderError> {
    std::fs::create_dir_all(dir)?;

    let written = vec![
        tables::write_resolved_counties(dir, input.records)?,
        tables::write_state_totals(dir, input.totals)?,
        tables::write_state_averages(dir, input.averages)?,
        choropleth::write_choropleth(dir, input.records, input.boundaries, input.colors)?,
        charts::write_charts(dir, input.totals, input.averages, input.colors)?,
    ];

    log::info!("Wrote {} output files to {}", written.len(), dir.display());
    Ok(written)
}

/// Writes `value` as pretty JSON to `dir/name` via a temp file.
///
/// # Errors
///
/// Returns [`RenderError`] if serialization or any file operation fails.
pub(crate) fn write_json_atomic<T: serde::Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
) -> Result<PathBuf, RenderError> {
    let path = dir.join(name);
    let tmp_path = dir.join(format!("{name}.tmp"));

    let file = std::fs::File::create(&tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    drop(writer);

    std::fs::rename(&tmp_path, &path)?;
    Ok(path)
}
