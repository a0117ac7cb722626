#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the bad air county map.
//!
//! With no subcommand the full pipeline runs with default locations.
//! Uses `indicatif-log-bridge` (via [`bad_air_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the stage bar never fight for the terminal.

use std::path::PathBuf;
use std::time::Instant;

use bad_air_cli_utils::IndicatifProgress;
use bad_air_geography::boundaries::COUNTIES_GEOJSON_URL;
use bad_air_pipeline::tables::PipelineTables;
use bad_air_pipeline::{Analysis, PipelineConfig, RUN_STEPS};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bad_air_cli",
    about = "County map of unhealthy and hazardous air days",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the map and chart outputs (default)
    Run(RunArgs),
    /// Resolve counties and print the join report without touching the network
    Check(InputArgs),
    /// Print the compiled-in normalization and binning tables
    Tables,
}

#[derive(Args, Clone)]
struct InputArgs {
    /// Air quality CSV (EPA annual AQI by county)
    #[arg(long, default_value = "planet.csv")]
    air_quality: PathBuf,
    /// Census geocode reference CSV
    #[arg(long, default_value = "county_flip.csv")]
    reference: PathBuf,
}

#[derive(Args, Clone)]
struct RunArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// County boundary `GeoJSON`, as an http(s) URL or a local path
    #[arg(long, default_value = COUNTIES_GEOJSON_URL)]
    boundaries: String,
    /// Directory the outputs are written to
    #[arg(long, default_value = "data/generated")]
    output_dir: PathBuf,
}

impl From<RunArgs> for PipelineConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            air_quality: args.inputs.air_quality,
            reference: args.inputs.reference,
            boundaries: args.boundaries,
            output_dir: args.output_dir,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = bad_air_cli_utils::init_logger();
    let cli = Cli::parse();
    let tables = PipelineTables::default();

    match cli.command.unwrap_or(Commands::Run(cli.run)) {
        Commands::Run(args) => {
            let start = Instant::now();
            let config = PipelineConfig::from(args);
            let progress = IndicatifProgress::steps_bar(&multi, "Bad air map", RUN_STEPS);

            let summary = bad_air_pipeline::run(&config, &tables, &progress).await?;

            print_report(&summary.analysis);
            println!();
            for path in &summary.written {
                println!("Wrote {}", path.display());
            }
            log::info!("Pipeline finished in {:.1}s", start.elapsed().as_secs_f64());
        }
        Commands::Check(inputs) => {
            let analysis =
                bad_air_pipeline::check(&inputs.air_quality, &inputs.reference, &tables)?;
            print_report(&analysis);
        }
        Commands::Tables => {
            for line in tables.describe() {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn print_report(analysis: &Analysis) {
    let report = &analysis.report;
    println!("{:<48} {:>6}", "Total rows", report.total_rows);
    println!(
        "{:<48} {:>6}",
        "Missing fips (before filtering non-US regions)", report.missing_before_filter
    );
    println!("{:<48} {:>6}", "Rows removed by region filter", report.excluded_rows);
    println!(
        "{:<48} {:>6}",
        "Missing fips (after filtering non-US regions)", report.missing_after_filter
    );
    if report.ambiguous_reference_keys > 0 {
        println!(
            "{:<48} {:>6}",
            "Ambiguous reference keys", report.ambiguous_reference_keys
        );
    }

    if !report.unresolved.is_empty() {
        println!();
        println!("{:<24} COUNTY", "STATE");
        println!("{}", "-".repeat(50));
        for (state, county) in &report.unresolved {
            println!("{state:<24} {county}");
        }
    }

    println!();
    println!("{:<24} TOTAL BAD AIR DAYS", "STATE");
    println!("{}", "-".repeat(50));
    for total in &analysis.totals {
        println!("{:<24} {}", total.state_name, total.bad_air_days);
    }

    println!();
    println!("{:<24} AVERAGE PER COUNTY", "STATE");
    println!("{}", "-".repeat(50));
    for average in &analysis.averages {
        println!("{:<24} {:.2}", average.state_name, average.bad_air_days);
    }
}
