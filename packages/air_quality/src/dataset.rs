//! Air quality CSV loading.

use std::io::Read;
use std::path::Path;

use bad_air_air_quality_models::PrimaryRecord;

use crate::AirQualityError;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &["State", "County"];

/// Reads air quality rows from a CSV stream with a header row.
///
/// Columns other than the state, county, and the four unhealthy-or-worse
/// day counts are ignored.
///
/// # Errors
///
/// Returns [`AirQualityError`] if the stream is not valid CSV, a required
/// column is missing, or a day count is not a non-negative integer.
pub fn read_primary_records<R: Read>(reader: R) -> Result<Vec<PrimaryRecord>, AirQualityError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(AirQualityError::Dataset {
                message: format!("missing required column '{column}'"),
            });
        }
    }

    let records = reader
        .deserialize::<PrimaryRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed {} air quality rows", records.len());

    Ok(records)
}

/// Reads air quality rows from a file on disk.
///
/// # Errors
///
/// Returns [`AirQualityError`] if the file cannot be opened or parsed.
pub fn load_primary_file(path: &Path) -> Result<Vec<PrimaryRecord>, AirQualityError> {
    log::info!("Loading air quality data from {}", path.display());
    let file = std::fs::File::open(path)?;
    let records = read_primary_records(std::io::BufReader::new(file))?;
    log::info!("Loaded {} air quality rows", records.len());
    Ok(records)
}
