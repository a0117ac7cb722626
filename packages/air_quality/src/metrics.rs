//! Bad air day totals and severity binning.

use bad_air_air_quality_models::{BadAirBin, PrimaryRecord, ResolvedRecord};

/// Default inclusive upper bounds of the first four bins.
///
/// Bins are half-open on the left and closed on the right:
/// `(-1, 0]`, `(0, 5]`, `(5, 15]`, `(15, 30]`, `(30, ∞)`.
pub const DEFAULT_UPPER_BOUNDS: [u32; 4] = [0, 5, 15, 30];

/// Upper bin edges for [`BadAirBin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinEdges {
    upper_bounds: [u32; 4],
}

impl BinEdges {
    /// Creates edges from the inclusive upper bounds of the first four
    /// bins. Values above the last bound fall in the open-ended bin.
    ///
    /// Returns `None` unless the bounds are strictly increasing.
    #[must_use]
    pub fn new(upper_bounds: [u32; 4]) -> Option<Self> {
        upper_bounds
            .windows(2)
            .all(|w| w[0] < w[1])
            .then_some(Self { upper_bounds })
    }

    /// Returns the inclusive upper bounds.
    #[must_use]
    pub const fn upper_bounds(&self) -> [u32; 4] {
        self.upper_bounds
    }

    /// Assigns `days` to its bin.
    #[must_use]
    pub fn bin(&self, days: u32) -> BadAirBin {
        let bins = BadAirBin::all();
        self.upper_bounds
            .iter()
            .position(|&upper| days <= upper)
            .map_or(BadAirBin::OverThirty, |i| bins[i])
    }
}

impl Default for BinEdges {
    fn default() -> Self {
        Self {
            upper_bounds: DEFAULT_UPPER_BOUNDS,
        }
    }
}

/// Sums the four unhealthy-or-worse day counts, treating missing counts
/// as zero.
#[must_use]
pub fn bad_air_days(record: &PrimaryRecord) -> u32 {
    [
        record.unhealthy_days,
        record.very_unhealthy_days,
        record.hazardous_days,
        record.unhealthy_for_sensitive_groups_days,
    ]
    .into_iter()
    .flatten()
    .fold(0u32, u32::saturating_add)
}

/// Scores a joined record.
#[must_use]
pub fn score(record: PrimaryRecord, fips: Option<String>, edges: &BinEdges) -> ResolvedRecord {
    let days = bad_air_days(&record);
    let county_label = format!("{}, {}", record.county_name, record.state_name);

    ResolvedRecord {
        state_name: record.state_name,
        county_name: record.county_name,
        fips,
        bad_air_days: days,
        bad_air_bin: edges.bin(days),
        county_label,
    }
}
