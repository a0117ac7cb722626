//! Per-state roll-ups for the bar charts.

use std::collections::BTreeMap;

use bad_air_air_quality_models::{ResolvedRecord, StateAverage, StateTotal};

/// Number of states shown in each bar chart.
pub const TOP_STATES: usize = 10;

/// Groups `bad_air_days` by state: `(sum, row count)`.
fn group_by_state(records: &[ResolvedRecord]) -> BTreeMap<&str, (u64, u64)> {
    let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.state_name.as_str()).or_default();
        entry.0 += u64::from(record.bad_air_days);
        entry.1 += 1;
    }
    groups
}

/// Total bad air days per state, highest first, truncated to `limit`.
///
/// Ties are ordered by state name.
#[must_use]
pub fn state_totals(records: &[ResolvedRecord], limit: usize) -> Vec<StateTotal> {
    let mut totals: Vec<StateTotal> = group_by_state(records)
        .into_iter()
        .map(|(state, (sum, _))| StateTotal {
            state_name: state.to_string(),
            bad_air_days: sum,
        })
        .collect();

    // Groups come out of the map in name order and the sort is stable.
    totals.sort_by(|a, b| b.bad_air_days.cmp(&a.bad_air_days));
    totals.truncate(limit);
    totals
}

/// Mean bad air days per county row in each state, highest first,
/// truncated to `limit`.
///
/// Ties are ordered by state name.
#[must_use]
pub fn state_averages(records: &[ResolvedRecord], limit: usize) -> Vec<StateAverage> {
    #[allow(clippy::cast_precision_loss)]
    let mut averages: Vec<StateAverage> = group_by_state(records)
        .into_iter()
        .map(|(state, (sum, count))| StateAverage {
            state_name: state.to_string(),
            bad_air_days: sum as f64 / count as f64,
        })
        .collect();

    averages.sort_by(|a, b| b.bad_air_days.total_cmp(&a.bad_air_days));
    averages.truncate(limit);
    averages
}
