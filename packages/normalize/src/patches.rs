//! Known data-entry fixes for the air quality dataset.
//!
//! These are exact `(state, county)` rewrites applied before keys are
//! built, not general rules.

/// Default patches: `(state, county, corrected county)`.
pub const KNOWN_PATCHES: &[(&str, &str, &str)] = &[("Virginia", "Charles", "Charles City")];

/// A single exact-match county rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPatch {
    /// State name that must match exactly.
    pub state: String,
    /// County name that must match exactly.
    pub county: String,
    /// Replacement county name.
    pub corrected_county: String,
}

/// An ordered list of [`DataPatch`]es.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTable {
    patches: Vec<DataPatch>,
}

impl PatchTable {
    /// Creates a table from `(state, county, corrected county)` triples.
    #[must_use]
    pub fn new(patches: &[(&str, &str, &str)]) -> Self {
        Self {
            patches: patches
                .iter()
                .map(|(state, county, corrected)| DataPatch {
                    state: (*state).to_string(),
                    county: (*county).to_string(),
                    corrected_county: (*corrected).to_string(),
                })
                .collect(),
        }
    }

    /// Returns the corrected county name if `(state, county)` matches a
    /// patch exactly.
    #[must_use]
    pub fn corrected_county(&self, state: &str, county: &str) -> Option<&str> {
        self.patches
            .iter()
            .find(|p| p.state == state && p.county == county)
            .map(|p| p.corrected_county.as_str())
    }

    /// Iterates the patches in order.
    pub fn iter(&self) -> impl Iterator<Item = &DataPatch> {
        self.patches.iter()
    }
}

impl Default for PatchTable {
    fn default() -> Self {
        Self::new(KNOWN_PATCHES)
    }
}
