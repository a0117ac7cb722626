//! Domain filter for regions missing from the county map.
//!
//! The air quality dataset covers territories and border regions that
//! the US county boundary file does not draw. They are dropped after the
//! join so that join-miss diagnostics only reflect real failures.

use std::collections::BTreeSet;

use crate::join::JoinedRecord;

/// Default states/regions excluded from the map.
pub const EXCLUDED_REGIONS: &[&str] = &["Puerto Rico", "Virgin Islands", "Country Of Mexico"];

/// Exact state names removed by the domain filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    states: BTreeSet<String>,
}

impl ExclusionSet {
    /// Creates a set from exact state names.
    #[must_use]
    pub fn new<S: AsRef<str>>(states: &[S]) -> Self {
        Self {
            states: states.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Returns `true` if rows for `state` are removed.
    #[must_use]
    pub fn contains(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Removes excluded rows, returning the survivors (in order) and the
    /// number removed.
    #[must_use]
    pub fn apply(&self, records: Vec<JoinedRecord>) -> (Vec<JoinedRecord>, usize) {
        let before = records.len();
        let kept: Vec<JoinedRecord> = records
            .into_iter()
            .filter(|r| !self.contains(&r.record.state_name))
            .collect();
        let excluded = before - kept.len();
        (kept, excluded)
    }

    /// Iterates the excluded state names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(EXCLUDED_REGIONS)
    }
}
