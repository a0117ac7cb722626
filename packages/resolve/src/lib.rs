#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entity resolution between the air quality dataset and the FIPS
//! reference table.
//!
//! [`Resolver::resolve`] applies the known data patches, builds
//! [`CanonicalKey`]s for both sides with one shared
//! [`KeyNormalizer`], left-joins on them, drops regions that are not on
//! the county map, and reports what failed to match. Join misses are
//! never fatal: they are carried downstream with a `None` FIPS code.

pub mod filter;
pub mod join;
pub mod report;

use bad_air_air_quality_models::PrimaryRecord;
use bad_air_geography_models::ReferenceRecord;
use bad_air_normalize::patches::PatchTable;
use bad_air_normalize::{CanonicalKey, KeyNormalizer};

use crate::filter::ExclusionSet;
use crate::join::{JoinedRecord, ReferenceIndex};
use crate::report::JoinReport;

/// Output of [`Resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Joined rows that survived the domain filter, in input order.
    pub records: Vec<JoinedRecord>,
    /// Join diagnostics.
    pub report: JoinReport,
}

/// The tables that drive entity resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    normalizer: KeyNormalizer,
    patches: PatchTable,
    exclusions: ExclusionSet,
}

impl Resolver {
    /// Creates a resolver from explicit tables.
    #[must_use]
    pub const fn new(
        normalizer: KeyNormalizer,
        patches: PatchTable,
        exclusions: ExclusionSet,
    ) -> Self {
        Self {
            normalizer,
            patches,
            exclusions,
        }
    }

    /// Returns the key normalizer shared by both sides of the join.
    #[must_use]
    pub const fn normalizer(&self) -> &KeyNormalizer {
        &self.normalizer
    }

    /// Returns the data patch table.
    #[must_use]
    pub const fn patches(&self) -> &PatchTable {
        &self.patches
    }

    /// Returns the domain filter's exclusion set.
    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Resolves every air quality row to a FIPS code where possible.
    ///
    /// Steps: patch known typos, left join on canonical keys, count
    /// misses, apply the domain filter, count misses again, and list the
    /// rows that are still unresolved.
    #[must_use]
    pub fn resolve(
        &self,
        records: Vec<PrimaryRecord>,
        counties: &[ReferenceRecord],
    ) -> Resolution {
        let records = join::apply_patches(records, &self.patches);
        let index = ReferenceIndex::build(counties, &self.normalizer);
        if index.is_empty() {
            log::warn!("Reference index is empty, every row will be unresolved");
        } else {
            log::info!("Joining against {} reference keys", index.len());
        }
        let joined = join::left_join(records, &index, &self.normalizer);

        let total_rows = joined.len();
        let missing_before_filter = join::count_missing(&joined);

        let (records, excluded_rows) = self.exclusions.apply(joined);
        let missing_after_filter = join::count_missing(&records);

        let report = JoinReport::new(
            total_rows,
            missing_before_filter,
            excluded_rows,
            missing_after_filter,
            index.ambiguous_keys(),
            &records,
        );
        report.log_summary();

        Resolution { records, report }
    }

    /// Builds the primary-side key for a `(state, county)` pair, after
    /// patches.
    #[must_use]
    pub fn primary_key(&self, state: &str, county: &str) -> CanonicalKey {
        let county = self.patches.corrected_county(state, county).unwrap_or(county);
        join::primary_key(&self.normalizer, state, county)
    }

    /// Builds the reference-side key for a county record.
    #[must_use]
    pub fn reference_key(&self, county: &ReferenceRecord) -> CanonicalKey {
        join::reference_key(&self.normalizer, county)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county(
        state_fips: &str,
        county_fips: &str,
        state: &str,
        raw: &str,
        name: &str,
    ) -> ReferenceRecord {
        ReferenceRecord {
            state_fips: state_fips.to_string(),
            county_fips: county_fips.to_string(),
            fips: format!("{state_fips}{county_fips}"),
            state_name: state.to_string(),
            raw_county_name: raw.to_string(),
            normalized_county_name: name.to_string(),
        }
    }

    fn primary(state: &str, county: &str, unhealthy: u32) -> PrimaryRecord {
        PrimaryRecord {
            state_name: state.to_string(),
            county_name: county.to_string(),
            unhealthy_days: Some(unhealthy),
            very_unhealthy_days: None,
            hazardous_days: None,
            unhealthy_for_sensitive_groups_days: None,
        }
    }

    fn reference() -> Vec<ReferenceRecord> {
        vec![
            county("51", "036", "Virginia", "Charles City County", "Charles City"),
            county("24", "510", "Maryland", "Baltimore city", "Baltimore city"),
            county("29", "510", "Missouri", "St. Louis city", "St. Louis city"),
            county("29", "186", "Missouri", "Ste. Genevieve County", "Ste. Genevieve"),
            county("35", "013", "New Mexico", "Doña Ana County", "Doña Ana"),
            county("02", "275", "Alaska", "Wrangell City and Borough", "Wrangell"),
        ]
    }

    #[test]
    fn patched_typo_matches_reference_key() {
        let resolver = Resolver::default();
        let charles = &reference()[0];
        assert_eq!(
            resolver.primary_key("Virginia", "Charles"),
            resolver.reference_key(charles)
        );
    }

    #[test]
    fn independent_city_matches_reference_key() {
        let resolver = Resolver::default();
        assert_eq!(
            resolver.primary_key("Maryland", "Baltimore (City)"),
            resolver.reference_key(&reference()[1])
        );
    }

    #[test]
    fn resolves_every_known_discrepancy() {
        let records = vec![
            primary("Virginia", "Charles", 1),
            primary("Maryland", "Baltimore (City)", 2),
            primary("Missouri", "Saint Louis City", 3),
            primary("Missouri", "Sainte Genevieve", 4),
            primary("New Mexico", "Dona Ana", 5),
            primary("Alaska", "Wrangell", 6),
        ];
        let resolution = Resolver::default().resolve(records, &reference());

        let fips: Vec<Option<&str>> = resolution
            .records
            .iter()
            .map(|r| r.fips.as_deref())
            .collect();
        assert_eq!(
            fips,
            [
                Some("51036"),
                Some("24510"),
                Some("29510"),
                Some("29186"),
                Some("35013"),
                Some("02275"),
            ]
        );
        assert_eq!(resolution.report.missing_after_filter, 0);
        assert_eq!(resolution.records[0].record.county_name, "Charles City");
    }

    #[test]
    fn join_is_complete_when_reference_covers_every_pair() {
        let reference: Vec<ReferenceRecord> = (1..=40u32)
            .map(|i| {
                county(
                    &format!("{:02}", i % 4 + 1),
                    &format!("{i:03}"),
                    &format!("State {}", i % 4),
                    &format!("Place-{i} County"),
                    &format!("Place-{i}"),
                )
            })
            .collect();
        let records: Vec<PrimaryRecord> = reference
            .iter()
            .map(|c| primary(&c.state_name, &c.normalized_county_name.replace('-', " "), 1))
            .collect();

        let resolution = Resolver::default().resolve(records, &reference);
        assert_eq!(resolution.report.total_rows, 40);
        assert_eq!(resolution.report.missing_before_filter, 0);
        assert_eq!(resolution.report.missing_after_filter, 0);
        assert!(resolution.report.unresolved.is_empty());
    }

    #[test]
    fn keeps_unmatched_rows_with_no_fips() {
        let records = vec![
            primary("Virginia", "Charles", 1),
            primary("Virginia", "Atlantis", 2),
        ];
        let resolution = Resolver::default().resolve(records, &reference());
        assert_eq!(resolution.records.len(), 2);
        assert_eq!(resolution.records[1].fips, None);
        assert_eq!(resolution.report.missing_after_filter, 1);
        assert_eq!(
            resolution.report.unresolved,
            [("Virginia".to_string(), "Atlantis".to_string())]
        );
    }

    #[test]
    fn excluded_regions_never_survive_the_filter() {
        let mut reference = reference();
        reference.push(county(
            "72",
            "001",
            "Puerto Rico",
            "Adjuntas Municipio",
            "Adjuntas",
        ));
        let records = vec![
            primary("Puerto Rico", "Adjuntas", 1),
            primary("Puerto Rico", "Nowhere", 1),
            primary("Country Of Mexico", "Tijuana", 1),
            primary("Virgin Islands", "St Croix", 1),
            primary("Maryland", "Baltimore (City)", 1),
        ];

        let resolution = Resolver::default().resolve(records, &reference);

        assert_eq!(resolution.report.total_rows, 5);
        assert_eq!(resolution.report.missing_before_filter, 3);
        assert_eq!(resolution.report.excluded_rows, 4);
        assert_eq!(resolution.report.missing_after_filter, 0);
        assert_eq!(resolution.records.len(), 1);
        assert!(
            resolution
                .records
                .iter()
                .all(|r| !resolution_excludes(&r.record.state_name))
        );
    }

    #[test]
    fn empty_reference_leaves_every_row_unresolved() {
        let records = vec![
            primary("Virginia", "Charles", 1),
            primary("Maryland", "Baltimore (City)", 2),
        ];
        let resolution = Resolver::default().resolve(records, &[]);
        assert_eq!(resolution.records.len(), 2);
        assert_eq!(resolution.report.missing_before_filter, 2);
        assert_eq!(resolution.report.missing_after_filter, 2);
    }

    fn resolution_excludes(state: &str) -> bool {
        ExclusionSet::default().contains(state)
    }
}
