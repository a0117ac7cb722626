//! Fill colors for the severity bins.

use bad_air_air_quality_models::BadAirBin;

/// Default fill colors, in legend order (green through dark orange).
pub const DEFAULT_COLORS: [&str; 5] = ["#41ab5d", "#a1d99b", "#fec44f", "#fe9929", "#cc4c02"];

/// One fill color per [`BadAirBin`], indexed in legend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinColors {
    colors: [String; 5],
}

impl BinColors {
    /// Creates a color table from five colors in legend order.
    #[must_use]
    pub fn new(colors: [&str; 5]) -> Self {
        Self {
            colors: colors.map(ToString::to_string),
        }
    }

    /// Returns the fill color for `bin`.
    #[must_use]
    pub fn color(&self, bin: BadAirBin) -> &str {
        &self.colors[bin.index()]
    }

    /// Iterates `(bin, color)` in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (BadAirBin, &str)> {
        BadAirBin::all()
            .iter()
            .map(|&bin| (bin, self.color(bin)))
    }
}

impl Default for BinColors {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}
