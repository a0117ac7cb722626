//! Administrative suffix table for reference county names.
//!
//! The reference file names counties with their administrative unit
//! ("Charles City County", "Juneau City and Borough", "Orleans Parish").
//! The air quality data does not, so the unit is stripped before keys are
//! built.

/// Suffixes removed from reference county names, in application order.
///
/// Order matters: `" City and Borough"` must be removed before
/// `" Borough"`, otherwise "Juneau City and Borough" is left as
/// "Juneau City and".
pub const COUNTY_SUFFIXES: &[&str] = &[
    " County",
    " Parish",
    " City and Borough",
    " City and",
    " Borough",
    " Census Area",
    " Municipality",
    " Municipio",
];

/// An ordered list of literal substrings to remove from county names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTable {
    suffixes: Vec<String>,
}

impl SuffixTable {
    /// Creates a table that removes `suffixes` in the given order.
    #[must_use]
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> Self {
        Self {
            suffixes: suffixes.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Removes every suffix from `name`, one after another.
    ///
    /// Each removal is a literal substring replacement of all occurrences,
    /// not a regex and not anchored to the end of the name.
    #[must_use]
    pub fn strip(&self, name: &str) -> String {
        self.suffixes
            .iter()
            .fold(name.to_string(), |acc, suffix| acc.replace(suffix.as_str(), ""))
    }

    /// Iterates the suffixes in application order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

impl Default for SuffixTable {
    fn default() -> Self {
        Self::new(COUNTY_SUFFIXES)
    }
}
