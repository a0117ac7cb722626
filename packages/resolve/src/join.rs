//! Canonical-key left join.

use std::collections::BTreeMap;

use bad_air_air_quality_models::PrimaryRecord;
use bad_air_geography_models::ReferenceRecord;
use bad_air_normalize::patches::PatchTable;
use bad_air_normalize::{CanonicalKey, KeyNormalizer, NameSource};

/// An air quality row with the FIPS code it joined to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRecord {
    /// The (possibly patched) air quality row.
    pub record: PrimaryRecord,
    /// Five-digit FIPS code, `None` on a join miss.
    pub fips: Option<String>,
}

/// Reference counties indexed by canonical key.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    keys: BTreeMap<CanonicalKey, String>,
    ambiguous_keys: usize,
}

impl ReferenceIndex {
    /// Indexes `counties` by their reference-side canonical key.
    ///
    /// When two counties normalize to the same key the first one in
    /// source order wins and the collision is logged.
    #[must_use]
    pub fn build(counties: &[ReferenceRecord], normalizer: &KeyNormalizer) -> Self {
        let mut keys = BTreeMap::new();
        let mut ambiguous_keys = 0;

        for county in counties {
            let key = reference_key(normalizer, county);
            if let Some(existing) = keys.get(&key) {
                log::warn!(
                    "Reference key '{key}' for {} ({}) collides with {existing}, keeping {existing}",
                    county.raw_county_name,
                    county.fips,
                );
                ambiguous_keys += 1;
                continue;
            }
            keys.insert(key, county.fips.clone());
        }

        log::debug!("Indexed {} reference keys", keys.len());

        Self {
            keys,
            ambiguous_keys,
        }
    }

    /// Looks up the FIPS code for a canonical key.
    #[must_use]
    pub fn lookup(&self, key: &CanonicalKey) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    /// Number of indexed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of reference counties dropped because their key collided
    /// with an earlier one.
    #[must_use]
    pub const fn ambiguous_keys(&self) -> usize {
        self.ambiguous_keys
    }
}

/// Builds the key for an air quality `(state, county)` pair.
#[must_use]
pub fn primary_key(normalizer: &KeyNormalizer, state: &str, county: &str) -> CanonicalKey {
    normalizer.key(state, county, NameSource::Primary)
}

/// Builds the key for a reference county from its suffix-stripped name.
#[must_use]
pub fn reference_key(normalizer: &KeyNormalizer, county: &ReferenceRecord) -> CanonicalKey {
    normalizer.key(
        &county.state_name,
        &county.normalized_county_name,
        NameSource::Reference,
    )
}

/// Rewrites county names that have a known data-entry fix.
#[must_use]
pub fn apply_patches(mut records: Vec<PrimaryRecord>, patches: &PatchTable) -> Vec<PrimaryRecord> {
    for record in &mut records {
        if let Some(corrected) = patches.corrected_county(&record.state_name, &record.county_name)
        {
            log::debug!(
                "Patching county '{}' -> '{corrected}' in {}",
                record.county_name,
                record.state_name
            );
            record.county_name = corrected.to_string();
        }
    }
    records
}

/// Left-joins air quality rows onto the reference index. Every row is
/// kept.
#[must_use]
pub fn left_join(
    records: Vec<PrimaryRecord>,
    index: &ReferenceIndex,
    normalizer: &KeyNormalizer,
) -> Vec<JoinedRecord> {
    records
        .into_iter()
        .map(|record| {
            let key = primary_key(normalizer, &record.state_name, &record.county_name);
            let fips = index.lookup(&key).map(ToString::to_string);
            if fips.is_none() {
                log::debug!("No reference match for key '{key}'");
            }
            JoinedRecord { record, fips }
        })
        .collect()
}

/// Number of rows without a FIPS code.
#[must_use]
pub fn count_missing(records: &[JoinedRecord]) -> usize {
    records.iter().filter(|r| r.fips.is_none()).count()
}
