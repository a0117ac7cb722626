//! Join diagnostics.

use serde::Serialize;

use crate::join::JoinedRecord;

/// Counts and listings describing how well the join went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinReport {
    /// Rows in the air quality dataset.
    pub total_rows: usize,
    /// Rows without a FIPS code straight after the join.
    pub missing_before_filter: usize,
    /// Rows removed by the domain filter.
    pub excluded_rows: usize,
    /// Rows without a FIPS code after the domain filter.
    pub missing_after_filter: usize,
    /// Reference counties shadowed by an earlier county with the same key.
    pub ambiguous_reference_keys: usize,
    /// `(state, county)` of every row still unresolved after filtering,
    /// sorted by state then county.
    pub unresolved: Vec<(String, String)>,
}

impl JoinReport {
    /// Builds a report, listing the unresolved rows of `filtered`.
    #[must_use]
    pub fn new(
        total_rows: usize,
        missing_before_filter: usize,
        excluded_rows: usize,
        missing_after_filter: usize,
        ambiguous_reference_keys: usize,
        filtered: &[JoinedRecord],
    ) -> Self {
        let mut unresolved: Vec<(String, String)> = filtered
            .iter()
            .filter(|r| r.fips.is_none())
            .map(|r| (r.record.state_name.clone(), r.record.county_name.clone()))
            .collect();
        unresolved.sort();

        Self {
            total_rows,
            missing_before_filter,
            excluded_rows,
            missing_after_filter,
            ambiguous_reference_keys,
            unresolved,
        }
    }

    /// Logs the counts, and each unresolved row as a warning.
    pub fn log_summary(&self) {
        log::info!("Total rows: {}", self.total_rows);
        log::info!(
            "Missing fips (before filtering non-US regions): {}",
            self.missing_before_filter
        );
        log::info!("Rows removed by region filter: {}", self.excluded_rows);
        log::info!(
            "Missing fips (after filtering non-US regions): {}",
            self.missing_after_filter
        );
        if self.ambiguous_reference_keys > 0 {
            log::warn!(
                "{} reference counties share a key with an earlier county",
                self.ambiguous_reference_keys
            );
        }
        for (state, county) in &self.unresolved {
            log::warn!("Unresolved county: {county}, {state}");
        }
    }
}
