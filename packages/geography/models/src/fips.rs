//! FIPS code utilities.
//!
//! The reference file stores state and county codes as bare numbers that
//! may have lost their leading zeros. These helpers restore the canonical
//! zero-padded widths and compose the five-digit county code.

use std::fmt;

/// Width of a state FIPS code.
pub const STATE_FIPS_WIDTH: usize = 2;

/// Width of a county FIPS code (within its state).
pub const COUNTY_FIPS_WIDTH: usize = 3;

/// Width of a full county FIPS code.
pub const FIPS_WIDTH: usize = STATE_FIPS_WIDTH + COUNTY_FIPS_WIDTH;

/// Error returned when a raw code cannot be turned into a FIPS code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFipsError {
    /// The offending raw value.
    pub value: String,
    /// The width it was expected to fit.
    pub width: usize,
}

impl fmt::Display for InvalidFipsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid FIPS code '{}': expected 1-{} ASCII digits",
            self.value, self.width
        )
    }
}

impl std::error::Error for InvalidFipsError {}

/// Left-pads a numeric code with zeros to `width`.
///
/// # Errors
///
/// Returns an error if the trimmed value is empty, contains anything other
/// than ASCII digits, or is longer than `width`.
pub fn zero_pad(value: &str, width: usize) -> Result<String, InvalidFipsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > width || !trimmed.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(InvalidFipsError {
            value: value.to_string(),
            width,
        });
    }
    Ok(format!("{trimmed:0>width$}"))
}

/// Pads a raw state code to two digits.
///
/// # Errors
///
/// Returns an error if the code is not 1-2 ASCII digits.
pub fn state_fips(value: &str) -> Result<String, InvalidFipsError> {
    zero_pad(value, STATE_FIPS_WIDTH)
}

/// Pads a raw county code to three digits.
///
/// # Errors
///
/// Returns an error if the code is not 1-3 ASCII digits.
pub fn county_fips(value: &str) -> Result<String, InvalidFipsError> {
    zero_pad(value, COUNTY_FIPS_WIDTH)
}

/// Composes the five-digit county FIPS code from raw state and county
/// codes.
///
/// # Errors
///
/// Returns an error if either code is invalid.
pub fn compose(state: &str, county: &str) -> Result<String, InvalidFipsError> {
    Ok(format!("{}{}", state_fips(state)?, county_fips(county)?))
}
