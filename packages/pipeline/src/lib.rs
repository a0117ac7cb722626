#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! End-to-end bad air county map pipeline.
//!
//! Chains the stages in order:
//!
//! 1. Build the FIPS reference table from the Census geocode file
//! 2. Load the air quality dataset
//! 3. Resolve every row to a FIPS code and drop off-map regions
//! 4. Score rows (bad air days, bin) and roll them up per state
//! 5. Load county boundaries and write the map and chart outputs
//!
//! Steps 1 to 4 never touch the network and are exposed on their own as
//! [`check`] / [`analyze`].

pub mod progress;
pub mod tables;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bad_air_air_quality::aggregate::{self, TOP_STATES};
use bad_air_air_quality::{AirQualityError, dataset, metrics};
use bad_air_air_quality_models::{PrimaryRecord, ResolvedRecord, StateAverage, StateTotal};
use bad_air_geography::boundaries::{self, COUNTIES_GEOJSON_URL};
use bad_air_geography::{GeoError, reference};
use bad_air_geography_models::RawReferenceRow;
use bad_air_render::{RenderError, RenderInput};
use bad_air_resolve::report::JoinReport;
use thiserror::Error;

use crate::progress::ProgressCallback;
use crate::tables::PipelineTables;

/// Number of stages reported through [`ProgressCallback`] by [`run`].
pub const RUN_STEPS: u64 = 5;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reference table or boundary failure.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Air quality dataset failure.
    #[error(transparent)]
    AirQuality(#[from] AirQualityError),

    /// Output writing failure.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Input and output locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Air quality CSV.
    pub air_quality: PathBuf,
    /// Census geocode reference CSV.
    pub reference: PathBuf,
    /// County boundary `GeoJSON`, as an `http(s)` URL or a local path.
    pub boundaries: String,
    /// Directory the outputs are written to.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            air_quality: PathBuf::from("planet.csv"),
            reference: PathBuf::from("county_flip.csv"),
            boundaries: COUNTIES_GEOJSON_URL.to_string(),
            output_dir: PathBuf::from("data/generated"),
        }
    }
}

/// Scored rows, chart rows, and join diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Every row that survived the domain filter, scored.
    pub records: Vec<ResolvedRecord>,
    /// Top states by total bad air days.
    pub totals: Vec<StateTotal>,
    /// Top states by average bad air days per county.
    pub averages: Vec<StateAverage>,
    /// Join diagnostics.
    pub report: JoinReport,
}

/// What a full run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The analysis the outputs were rendered from.
    pub analysis: Analysis,
    /// Output files, in write order.
    pub written: Vec<PathBuf>,
}

/// Builds the reference table, resolves, scores, and aggregates.
///
/// Join misses stay in the output with no FIPS code; only reference
/// integrity faults are errors.
///
/// # Errors
///
/// Returns [`PipelineError::Geo`] if the reference rows fail an
/// integrity check.
pub fn analyze(
    primary: Vec<PrimaryRecord>,
    reference_rows: &[RawReferenceRow],
    tables: &PipelineTables,
) -> Result<Analysis, PipelineError> {
    let reference = reference::build_reference_table(reference_rows, &tables.suffixes)?;
    log::info!(
        "Reference table: {} states, {} counties",
        reference.states.len(),
        reference.counties.len()
    );

    let resolution = tables.resolver.resolve(primary, &reference.counties);

    let records: Vec<ResolvedRecord> = resolution
        .records
        .into_iter()
        .map(|joined| metrics::score(joined.record, joined.fips, &tables.bin_edges))
        .collect();

    let totals = aggregate::state_totals(&records, TOP_STATES);
    let averages = aggregate::state_averages(&records, TOP_STATES);

    Ok(Analysis {
        records,
        totals,
        averages,
        report: resolution.report,
    })
}

/// Loads both input files and runs [`analyze`]. No network access.
///
/// # Errors
///
/// Returns [`PipelineError`] if either file cannot be read or the
/// reference table fails an integrity check.
pub fn check(
    air_quality: &Path,
    reference: &Path,
    tables: &PipelineTables,
) -> Result<Analysis, PipelineError> {
    let reference_rows = reference::load_reference_file(reference)?;
    let primary = dataset::load_primary_file(air_quality)?;
    analyze(primary, &reference_rows, tables)
}

/// Runs every stage and writes the outputs.
///
/// # Errors
///
/// Returns [`PipelineError`] if any input cannot be loaded, the
/// reference table fails an integrity check, or an output cannot be
/// written.
pub async fn run(
    config: &PipelineConfig,
    tables: &PipelineTables,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<RunSummary, PipelineError> {
    progress.set_total(RUN_STEPS);

    progress.set_message("Building reference table".to_string());
    let reference_rows = reference::load_reference_file(&config.reference)?;
    progress.inc(1);

    progress.set_message("Loading air quality data".to_string());
    let primary = dataset::load_primary_file(&config.air_quality)?;
    progress.inc(1);

    progress.set_message("Resolving counties".to_string());
    let analysis = analyze(primary, &reference_rows, tables)?;
    progress.inc(1);

    progress.set_message("Loading county boundaries".to_string());
    let boundaries = boundaries::load_boundaries(&config.boundaries).await?;
    if boundaries.is_empty() {
        log::warn!(
            "No usable features in {}, the choropleth will be empty",
            config.boundaries
        );
    }
    progress.inc(1);

    progress.set_message("Writing outputs".to_string());
    let written = bad_air_render::write_all(
        &config.output_dir,
        &RenderInput {
            records: &analysis.records,
            totals: &analysis.totals,
            averages: &analysis.averages,
            boundaries: &boundaries,
            colors: &tables.colors,
        },
    )?;
    progress.inc(1);

    progress.finish(format!(
        "Mapped {} counties ({} unresolved)",
        analysis.records.len() - analysis.report.missing_after_filter,
        analysis.report.missing_after_filter
    ));

    Ok(RunSummary { analysis, written })
}

#[cfg(test)]
mod tests {
    use bad_air_air_quality_models::BadAirBin;

    use super::*;
    use crate::progress::null_progress;

    const REFERENCE: &str = "\
Title line
Source line
Notes line
Summary Level,State Code (FIPS),County Code (FIPS),County Subdivision Code (FIPS),Place Code (FIPS),Consolidtated City Code (FIPS),Area Name (including legal/statistical area description)
010,00,000,00000,00000,00000,United States
040,24,000,00000,00000,00000,Maryland
050,24,510,00000,00000,00000,Baltimore city
050,24,017,00000,00000,00000,Charles County
040,51,000,00000,00000,00000,Virginia
050,51,036,00000,00000,00000,Charles City County
040,72,000,00000,00000,00000,Puerto Rico
050,72,001,00000,00000,00000,Adjuntas Municipio
";

    const AIR_QUALITY: &str = "\
State,County,Year,Unhealthy for Sensitive Groups Days,Unhealthy Days,Very Unhealthy Days,Hazardous Days
Maryland,Baltimore (City),2024,3,1,0,0
Maryland,Charles,2024,0,0,0,0
Virginia,Charles,2024,10,6,1,0
Puerto Rico,Adjuntas,2024,1,0,0,0
Maryland,Atlantis,2024,2,,,
";

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "24510", "properties": {},
             "geometry": {"type": "Point", "coordinates": [-76.6, 39.3]}},
            {"type": "Feature", "id": "24017", "properties": {},
             "geometry": {"type": "Point", "coordinates": [-77.0, 38.5]}},
            {"type": "Feature", "id": "51036", "properties": {},
             "geometry": {"type": "Point", "coordinates": [-77.1, 37.4]}}
        ]
    }"#;

    fn primary_records() -> Vec<PrimaryRecord> {
        dataset::read_primary_records(AIR_QUALITY.as_bytes()).unwrap()
    }

    fn reference_rows() -> Vec<RawReferenceRow> {
        reference::read_reference_rows(REFERENCE.as_bytes()).unwrap()
    }

    #[test]
    fn analyze_resolves_scores_and_aggregates() {
        let analysis =
            analyze(primary_records(), &reference_rows(), &PipelineTables::default()).unwrap();

        let resolved: Vec<(&str, Option<&str>, u32, BadAirBin)> = analysis
            .records
            .iter()
            .map(|r| {
                (
                    r.county_name.as_str(),
                    r.fips.as_deref(),
                    r.bad_air_days,
                    r.bad_air_bin,
                )
            })
            .collect();
        assert_eq!(
            resolved,
            [
                ("Baltimore (City)", Some("24510"), 4, BadAirBin::OneToFive),
                ("Charles", Some("24017"), 0, BadAirBin::Zero),
                ("Charles City", Some("51036"), 17, BadAirBin::SixteenToThirty),
                ("Atlantis", None, 2, BadAirBin::OneToFive),
            ]
        );

        assert_eq!(analysis.report.total_rows, 5);
        assert_eq!(analysis.report.excluded_rows, 1);
        assert_eq!(analysis.report.missing_after_filter, 1);

        assert_eq!(analysis.totals[0].state_name, "Virginia");
        assert_eq!(analysis.totals[0].bad_air_days, 17);
        assert_eq!(analysis.totals[1].state_name, "Maryland");
        assert_eq!(analysis.totals[1].bad_air_days, 6);
        assert!((analysis.averages[1].bad_air_days - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn analyze_fails_on_orphan_county() {
        let rows = reference::read_reference_rows(
            "t\nt\nt\nh\n050,24,510,00000,00000,00000,Baltimore city\n".as_bytes(),
        )
        .unwrap();
        let result = analyze(primary_records(), &rows, &PipelineTables::default());
        assert!(matches!(
            result,
            Err(PipelineError::Geo(GeoError::Integrity { .. }))
        ));
    }

    #[tokio::test]
    async fn run_writes_outputs_from_local_files() {
        let dir = std::env::temp_dir()
            .join(format!("bad_air_pipeline_run_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let air_quality = dir.join("planet.csv");
        let reference = dir.join("county_flip.csv");
        let boundaries = dir.join("counties.geojson");
        std::fs::write(&air_quality, AIR_QUALITY).unwrap();
        std::fs::write(&reference, REFERENCE).unwrap();
        std::fs::write(&boundaries, BOUNDARIES).unwrap();

        let config = PipelineConfig {
            air_quality,
            reference,
            boundaries: boundaries.to_string_lossy().to_string(),
            output_dir: dir.join("out"),
        };

        let summary = run(&config, &PipelineTables::default(), &null_progress())
            .await
            .unwrap();

        assert_eq!(summary.written.len(), 5);
        let choropleth =
            std::fs::read_to_string(dir.join("out").join(bad_air_render::CHOROPLETH_GEOJSON))
                .unwrap();
        assert!(choropleth.contains("\"51036\""));
        assert!(!choropleth.contains("Atlantis"));
    }

    #[tokio::test]
    async fn run_with_empty_boundaries_writes_an_empty_map() {
        let dir = std::env::temp_dir()
            .join(format!("bad_air_pipeline_empty_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let air_quality = dir.join("planet.csv");
        let reference = dir.join("county_flip.csv");
        let boundaries = dir.join("counties.geojson");
        std::fs::write(&air_quality, AIR_QUALITY).unwrap();
        std::fs::write(&reference, REFERENCE).unwrap();
        std::fs::write(&boundaries, r#"{"type": "FeatureCollection", "features": []}"#).unwrap();

        let config = PipelineConfig {
            air_quality,
            reference,
            boundaries: boundaries.to_string_lossy().to_string(),
            output_dir: dir.join("out"),
        };

        let summary = run(&config, &PipelineTables::default(), &null_progress())
            .await
            .unwrap();

        assert_eq!(summary.written.len(), 5);
        assert_eq!(summary.analysis.records.len(), 4);
        let choropleth =
            std::fs::read_to_string(dir.join("out").join(bad_air_render::CHOROPLETH_GEOJSON))
                .unwrap();
        assert!(!choropleth.contains("\"51036\""));
    }

    #[test]
    fn check_reports_missing_file() {
        let result = check(
            Path::new("/nonexistent/planet.csv"),
            Path::new("/nonexistent/county_flip.csv"),
            &PipelineTables::default(),
        );
        assert!(result.is_err());
    }
}
