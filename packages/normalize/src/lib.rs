#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical join keys for state and county names.
//!
//! The air quality data and the FIPS reference file spell the same places
//! differently ("Baltimore (City)" vs "Baltimore city", "Saint Louis" vs
//! "St. Louis", "Doña Ana" vs "Dona Ana"). Both sides are run through the
//! same deterministic pipeline in [`normalize`] so that equal places
//! produce equal [`CanonicalKey`]s.

pub mod folding;
pub mod normalize;
pub mod patches;

pub use normalize::{KeyNormalizer, NameSource};

/// The normalized `(state, county)` pair used as the join predicate.
///
/// The state is part of the key, so counties that share a name across
/// states ("Washington", "Jefferson") never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey {
    /// Normalized state name.
    pub state_key: String,
    /// Normalized county name.
    pub county_key: String,
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.state_key, self.county_key)
    }
}
