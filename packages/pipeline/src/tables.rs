//! The compiled-in tables that drive every stage.

use bad_air_air_quality::metrics::BinEdges;
use bad_air_geography::suffix::SuffixTable;
use bad_air_render::colors::BinColors;
use bad_air_resolve::Resolver;

/// Every constant table the pipeline consults, bundled so a run (or a
/// test) can swap any one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineTables {
    /// County name suffixes stripped from reference names.
    pub suffixes: SuffixTable,
    /// Key normalizer, data patches, and domain filter.
    pub resolver: Resolver,
    /// Severity bin edges.
    pub bin_edges: BinEdges,
    /// Fill color per bin.
    pub colors: BinColors,
}

impl PipelineTables {
    /// Formats every table as human-readable lines.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push("County suffixes (stripped in order):".to_string());
        lines.extend(self.suffixes.iter().map(|s| format!("  {s:?}")));

        lines.push("Diacritic folds:".to_string());
        lines.extend(
            self.resolver
                .normalizer()
                .folds()
                .iter()
                .map(|(from, to)| format!("  {from} -> {to}")),
        );

        lines.push("Data patches:".to_string());
        lines.extend(
            self.resolver
                .patches()
                .iter()
                .map(|p| format!("  {} / {} -> {}", p.state, p.county, p.corrected_county)),
        );

        lines.push("Excluded regions:".to_string());
        lines.extend(self.resolver.exclusions().iter().map(|s| format!("  {s}")));

        lines.push("Bad air day bins:".to_string());
        let bounds = self.bin_edges.upper_bounds();
        lines.extend(self.colors.iter().map(|(bin, color)| {
            let upper = bounds
                .get(bin.index())
                .map_or_else(|| "and up".to_string(), |b| format!("<= {b}"));
            format!("  {:<6} {upper:<8} {color}", bin.as_ref())
        }));

        lines
    }
}
