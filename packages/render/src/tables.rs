//! CSV exports.

use std::path::{Path, PathBuf};

use bad_air_air_quality_models::{ResolvedRecord, StateAverage, StateTotal};
use serde::Serialize;

use crate::{RESOLVED_COUNTIES_CSV, RenderError, STATE_AVERAGES_CSV, STATE_TOTALS_CSV};

/// Writes `rows` as a headed CSV to `dir/name` via a temp file.
fn write_csv_atomic<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
) -> Result<PathBuf, RenderError> {
    let path = dir.join(name);
    let tmp_path = dir.join(format!("{name}.tmp"));

    let mut writer = csv::Writer::from_path(&tmp_path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    drop(writer);

    std::fs::rename(&tmp_path, &path)?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Writes every scored row, join misses included (blank `fips`).
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be written.
pub fn write_resolved_counties(
    dir: &Path,
    records: &[ResolvedRecord],
) -> Result<PathBuf, RenderError> {
    write_csv_atomic(dir, RESOLVED_COUNTIES_CSV, records)
}

/// Writes the state totals chart rows.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be written.
pub fn write_state_totals(dir: &Path, totals: &[StateTotal]) -> Result<PathBuf, RenderError> {
    write_csv_atomic(dir, STATE_TOTALS_CSV, totals)
}

/// Writes the state averages chart rows.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be written.
pub fn write_state_averages(
    dir: &Path,
    averages: &[StateAverage],
) -> Result<PathBuf, RenderError> {
    write_csv_atomic(dir, STATE_AVERAGES_CSV, averages)
}

#[cfg(test)]
mod tests {
    use bad_air_air_quality_models::BadAirBin;

    use super::*;
    use crate::test_support::{resolved, temp_dir};

    #[test]
    fn resolved_counties_keep_join_misses_with_blank_fips() {
        let dir = temp_dir("resolved_counties");
        let records = vec![
            resolved("Alaska", "Wrangell", Some("02275"), 0, BadAirBin::Zero),
            resolved("Alaska", "Atlantis", None, 7, BadAirBin::SixToFifteen),
        ];

        let path = write_resolved_counties(&dir, &records).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            [
                "State,County,fips,bad_air_days,bad_air_bin,county_label",
                "Alaska,Wrangell,02275,0,0,\"Wrangell, Alaska\"",
                "Alaska,Atlantis,,7,6–15,\"Atlantis, Alaska\"",
            ]
        );
    }

    #[test]
    fn state_tables_have_state_and_days_columns() {
        let dir = temp_dir("state_tables");
        let totals = vec![StateTotal {
            state_name: "California".to_string(),
            bad_air_days: 412,
        }];
        let averages = vec![StateAverage {
            state_name: "California".to_string(),
            bad_air_days: 7.5,
        }];

        let totals_text =
            std::fs::read_to_string(write_state_totals(&dir, &totals).unwrap()).unwrap();
        let averages_text =
            std::fs::read_to_string(write_state_averages(&dir, &averages).unwrap()).unwrap();

        assert_eq!(totals_text, "State,bad_air_days\nCalifornia,412\n");
        assert_eq!(averages_text, "State,bad_air_days\nCalifornia,7.5\n");
    }
}
