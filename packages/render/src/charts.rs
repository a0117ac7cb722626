//! Legend and bar chart definitions.

use std::path::{Path, PathBuf};

use bad_air_air_quality_models::{StateAverage, StateTotal};
use serde::Serialize;

use crate::colors::BinColors;
use crate::{CHARTS_JSON, RenderError};

/// Legend title shown next to the choropleth.
pub const LEGEND_TITLE: &str = "Unhealthy / Hazardous Air Days";

/// Title of the state totals chart.
pub const TOTALS_TITLE: &str =
    "Top 10 States with the Most Total Unhealthy/Hazardous Air Days (sum across counties)";

/// Title of the state averages chart.
pub const AVERAGES_TITLE: &str =
    "Top 10 States by Average Unhealthy/Hazardous Air Days per County";

/// X axis label of the state totals chart.
pub const TOTALS_X_LABEL: &str = "bad_air_days";

/// X axis label of the state averages chart.
pub const AVERAGES_X_LABEL: &str = "Average days (per county)";

/// The full `charts.json` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsDocument<'a> {
    /// Choropleth legend.
    pub legend: Legend,
    /// Total bad air days per state.
    pub state_totals: BarChart<'a, StateTotal>,
    /// Average bad air days per county, per state.
    pub state_averages: BarChart<'a, StateAverage>,
}

/// Choropleth legend: title plus bins in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend title.
    pub title: String,
    /// Bins in legend order.
    pub entries: Vec<LegendEntry>,
}

/// One legend swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Bin label (e.g. "6–15").
    pub label: String,
    /// Fill color.
    pub color: String,
}

/// A horizontal bar chart, one bar per row, first row on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart<'a, T> {
    /// Chart title.
    pub title: &'static str,
    /// Label of the value axis.
    pub x_label: &'static str,
    /// Label of the category axis.
    pub y_label: &'static str,
    /// Chart rows.
    pub rows: &'a [T],
}

/// Builds the legend from the color table.
#[must_use]
pub fn legend(colors: &BinColors) -> Legend {
    Legend {
        title: LEGEND_TITLE.to_string(),
        entries: colors
            .iter()
            .map(|(bin, color)| LegendEntry {
                label: bin.to_string(),
                color: color.to_string(),
            })
            .collect(),
    }
}

/// Builds the `charts.json` document.
#[must_use]
pub fn build_charts<'a>(
    totals: &'a [StateTotal],
    averages: &'a [StateAverage],
    colors: &BinColors,
) -> ChartsDocument<'a> {
    ChartsDocument {
        legend: legend(colors),
        state_totals: BarChart {
            title: TOTALS_TITLE,
            x_label: TOTALS_X_LABEL,
            y_label: "State",
            rows: totals,
        },
        state_averages: BarChart {
            title: AVERAGES_TITLE,
            x_label: AVERAGES_X_LABEL,
            y_label: "State",
            rows: averages,
        },
    }
}

/// Writes `charts.json` into `dir`.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be written.
pub fn write_charts(
    dir: &Path,
    totals: &[StateTotal],
    averages: &[StateAverage],
    colors: &BinColors,
) -> Result<PathBuf, RenderError> {
    let document = build_charts(totals, averages, colors);
    let path = crate::write_json_atomic(dir, CHARTS_JSON, &document)?;
    log::info!("Wrote chart definitions to {}", path.display());
    Ok(path)
}
