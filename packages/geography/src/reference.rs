//! Geocode reference file parsing and county reference construction.
//!
//! The reference file is the Census Bureau "all geocodes" CSV: a few
//! title lines, then header-less rows whose positional columns carry the
//! summary level, state code, county code, and area name. State rows
//! (level `040`) only supply state names; county rows (level `050`) become
//! [`ReferenceRecord`]s.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use bad_air_geography_models::{
    RawReferenceRow, ReferenceRecord, StateRecord, SummaryLevel, fips,
};

use crate::GeoError;
use crate::suffix::SuffixTable;

/// Number of title lines preceding the data rows.
pub const SKIP_LINES: u64 = 4;

const COL_SUMMARY_LEVEL: usize = 0;
const COL_STATE: usize = 1;
const COL_COUNTY: usize = 2;
const COL_AREA_NAME: usize = 6;

/// The clean reference table: state names plus county records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    /// State-level rows, in source order.
    pub states: Vec<StateRecord>,
    /// County-level records with state names attached, in source order.
    pub counties: Vec<ReferenceRecord>,
}

/// Decodes a raw CSV field.
///
/// The Census file is Latin-1 encoded, so fields that are not valid UTF-8
/// are decoded byte-for-char (Latin-1 maps directly onto the first 256
/// code points).
fn decode_field(bytes: &[u8]) -> String {
    std::str::from_utf8(bytes).map_or_else(
        |_| bytes.iter().map(|&b| char::from(b)).collect(),
        ToString::to_string,
    )
}

/// Reads raw reference rows from a header-less CSV stream, skipping the
/// leading [`SKIP_LINES`] title lines.
///
/// Rows of summary levels other than state and county are dropped here.
///
/// # Errors
///
/// Returns [`GeoError`] if the stream cannot be read as CSV.
pub fn read_reference_rows<R: Read>(reader: R) -> Result<Vec<RawReferenceRow>, GeoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0u64;

    for result in reader.byte_records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        if line <= SKIP_LINES {
            continue;
        }

        let field = |i: usize| record.get(i).map(decode_field).unwrap_or_default();

        let summary_level = field(COL_SUMMARY_LEVEL);
        if SummaryLevel::from_code(&summary_level).is_none() {
            skipped += 1;
            continue;
        }

        rows.push(RawReferenceRow {
            line,
            summary_level,
            state_code: field(COL_STATE),
            county_code: field(COL_COUNTY),
            area_name: field(COL_AREA_NAME).trim().to_string(),
        });
    }

    log::debug!(
        "Read {} state/county reference rows ({skipped} rows of other levels skipped)",
        rows.len()
    );

    Ok(rows)
}

/// Reads raw reference rows from a file on disk.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be opened or parsed.
pub fn load_reference_file(path: &Path) -> Result<Vec<RawReferenceRow>, GeoError> {
    log::info!("Loading FIPS reference table from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_reference_rows(std::io::BufReader::new(file))
}

/// Builds the clean reference table from raw rows.
///
/// County rows are joined to state rows on the state code and their names
/// are stripped of administrative suffixes with `suffixes`.
///
/// # Errors
///
/// Returns [`GeoError::Integrity`] if any state or county row has an
/// empty name or a malformed code, if a state code appears twice, or if a
/// county row has no matching state row.
pub fn build_reference_table(
    rows: &[RawReferenceRow],
    suffixes: &SuffixTable,
) -> Result<ReferenceTable, GeoError> {
    let mut states = Vec::new();
    let mut state_names: BTreeMap<String, String> = BTreeMap::new();

    for row in rows
        .iter()
        .filter(|r| SummaryLevel::from_code(&r.summary_level) == Some(SummaryLevel::State))
    {
        let state_fips = fips::state_fips(&row.state_code).map_err(|e| integrity(row, &e))?;
        if row.area_name.is_empty() {
            return Err(integrity(row, "state row has an empty area name"));
        }
        if state_names.contains_key(&state_fips) {
            return Err(integrity(
                row,
                format!("duplicate state row for FIPS {state_fips}"),
            ));
        }

        state_names.insert(state_fips.clone(), row.area_name.clone());
        states.push(StateRecord {
            state_fips,
            state_name: row.area_name.clone(),
        });
    }

    let mut counties = Vec::new();

    for row in rows
        .iter()
        .filter(|r| SummaryLevel::from_code(&r.summary_level) == Some(SummaryLevel::County))
    {
        if row.area_name.is_empty() {
            return Err(integrity(row, "county row has an empty area name"));
        }
        let state_fips = fips::state_fips(&row.state_code).map_err(|e| integrity(row, &e))?;
        let county_fips = fips::county_fips(&row.county_code).map_err(|e| integrity(row, &e))?;

        let Some(state_name) = state_names.get(&state_fips) else {
            return Err(integrity(
                row,
                format!(
                    "county '{}' references state FIPS {state_fips} with no state row",
                    row.area_name
                ),
            ));
        };

        let fips = fips::compose(&state_fips, &county_fips).map_err(|e| integrity(row, &e))?;

        counties.push(ReferenceRecord {
            fips,
            state_fips,
            county_fips,
            state_name: state_name.clone(),
            raw_county_name: row.area_name.clone(),
            normalized_county_name: suffixes.strip(&row.area_name),
        });
    }

    log::info!(
        "Built FIPS reference table: {} states, {} counties",
        states.len(),
        counties.len()
    );

    Ok(ReferenceTable { states, counties })
}

fn integrity(row: &RawReferenceRow, message: impl ToString) -> GeoError {
    GeoError::Integrity {
        line: row.line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Title line
Source line
Notes line
Summary Level,State Code (FIPS),County Code (FIPS),County Subdivision Code (FIPS),Place Code (FIPS),Consolidtated City Code (FIPS),Area Name (including legal/statistical area description)
010,00,000,00000,00000,00000,United States
040,02,000,00000,00000,00000,Alaska
050,02,275,00000,00000,00000,Wrangell City and Borough
040,51,000,00000,00000,00000,Virginia
050,51,036,00000,00000,00000,Charles City County
061,51,036,90000,00000,00000,Charles City district
050,51,510,00000,00000,00000,Alexandria city
040,24,000,00000,00000,00000,Maryland
050,24,510,00000,00000,00000,Baltimore city
";

    fn raw(level: &str, state: &str, county: &str, name: &str) -> RawReferenceRow {
        RawReferenceRow {
            line: 10,
            summary_level: level.to_string(),
            state_code: state.to_string(),
            county_code: county.to_string(),
            area_name: name.to_string(),
        }
    }

    #[test]
    fn reads_rows_after_title_lines() {
        let rows = read_reference_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 7, "nation and subdivision rows are skipped");
        assert_eq!(rows[0].summary_level, "040");
        assert_eq!(rows[0].area_name, "Alaska");
        assert_eq!(rows[0].line, 6);
    }

    #[test]
    fn builds_county_records_with_state_names() {
        let rows = read_reference_rows(SAMPLE.as_bytes()).unwrap();
        let table = build_reference_table(&rows, &SuffixTable::default()).unwrap();

        assert_eq!(table.states.len(), 3);
        assert_eq!(table.counties.len(), 4);

        let charles = &table.counties[1];
        assert_eq!(charles.fips, "51036");
        assert_eq!(charles.state_name, "Virginia");
        assert_eq!(charles.raw_county_name, "Charles City County");
        assert_eq!(charles.normalized_county_name, "Charles City");

        let wrangell = &table.counties[0];
        assert_eq!(wrangell.fips, "02275");
        assert_eq!(wrangell.normalized_county_name, "Wrangell");
    }

    #[test]
    fn pads_unpadded_codes() {
        let rows = vec![
            raw("040", "1", "0", "Alabama"),
            raw("050", "1", "1", "Autauga County"),
        ];
        let table = build_reference_table(&rows, &SuffixTable::default()).unwrap();
        assert_eq!(table.counties[0].state_fips, "01");
        assert_eq!(table.counties[0].county_fips, "001");
        assert_eq!(table.counties[0].fips, "01001");
    }

    #[test]
    fn decodes_latin1_fields() {
        let mut bytes = b"a\nb\nc\nd\n040,35,000,0,0,0,New Mexico\n050,35,013,0,0,0,Do".to_vec();
        bytes.push(0xF1);
        bytes.extend_from_slice(b"a Ana County\n");

        let rows = read_reference_rows(bytes.as_slice()).unwrap();
        let table = build_reference_table(&rows, &SuffixTable::default()).unwrap();
        assert_eq!(table.counties[0].normalized_county_name, "Doña Ana");
    }

    #[test]
    fn rejects_non_numeric_county_code() {
        let rows = vec![
            raw("040", "51", "000", "Virginia"),
            raw("050", "51", "X36", "Charles City County"),
        ];
        let err = build_reference_table(&rows, &SuffixTable::default()).unwrap_err();
        assert!(matches!(err, GeoError::Integrity { line: 10, .. }), "got {err}");
    }

    #[test]
    fn rejects_empty_county_name() {
        let rows = vec![
            raw("040", "51", "000", "Virginia"),
            raw("050", "51", "036", ""),
        ];
        let err = build_reference_table(&rows, &SuffixTable::default()).unwrap_err();
        assert!(matches!(err, GeoError::Integrity { .. }));
    }

    #[test]
    fn rejects_orphan_county_rows() {
        let rows = vec![raw("050", "51", "036", "Charles City County")];
        let err = build_reference_table(&rows, &SuffixTable::default()).unwrap_err();
        assert!(
            err.to_string().contains("no state row"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_duplicate_state_rows() {
        let rows = vec![
            raw("040", "51", "000", "Virginia"),
            raw("040", "51", "000", "Virginia"),
        ];
        assert!(build_reference_table(&rows, &SuffixTable::default()).is_err());
    }

    #[test]
    fn short_county_rows_are_integrity_faults() {
        let input = "a\nb\nc\nd\n040,51,000,0,0,0,Virginia\n050,51,036\n";
        let rows = read_reference_rows(input.as_bytes()).unwrap();
        assert!(build_reference_table(&rows, &SuffixTable::default()).is_err());
    }
}
