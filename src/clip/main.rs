//! Geographic clip tool.
//!
//! Reads `|`-separated part files, resolves each record to a single point
//! and keeps only those inside a rectangular region.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use geoclip::config::RunConfig;
use geoclip::models::Region;
use geoclip::pipeline::{run, select_files};

#[derive(Parser, Debug)]
#[command(name = "clip")]
#[command(about = "Keep the records whose location falls inside a bounding region")]
struct Args {
    /// TOML run configuration; command-line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the part files to process
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write filtered files to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Lower-left longitude
    #[arg(long, allow_negative_numbers = true)]
    min_lon: Option<f64>,

    /// Lower-left latitude
    #[arg(long, allow_negative_numbers = true)]
    min_lat: Option<f64>,

    /// Upper-right longitude
    #[arg(long, allow_negative_numbers = true)]
    max_lon: Option<f64>,

    /// Upper-right latitude
    #[arg(long, allow_negative_numbers = true)]
    max_lat: Option<f64>,

    /// Only process files whose name starts with this
    #[arg(long)]
    prefix: Option<String>,

    /// Suffix appended to source file names for the output files
    #[arg(long)]
    suffix: Option<String>,

    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    /// Create the output directory if it is missing
    #[arg(long)]
    create_output: bool,

    /// Write a JSON run summary here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every dropped record
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Build the run configuration from the config file (if any) and flags
    fn into_config(self) -> Result<RunConfig> {
        let base = self
            .config
            .as_ref()
            .map(RunConfig::load_from_file)
            .transpose()?;

        let region = match (self.min_lon, self.min_lat, self.max_lon, self.max_lat) {
            (Some(min_lon), Some(min_lat), Some(max_lon), Some(max_lat)) => {
                Region::new(min_lon, min_lat, max_lon, max_lat)
            }
            (None, None, None, None) => base
                .as_ref()
                .map(|c| c.region)
                .context("Region bounds missing: pass --min-lon/--min-lat/--max-lon/--max-lat or --config")?,
            _ => anyhow::bail!("All four region bounds must be given together"),
        };

        let input_dir = self
            .input
            .or_else(|| base.as_ref().map(|c| c.input_dir.clone()))
            .context("Input directory missing: pass --input or --config")?;
        let output_dir = self
            .output
            .or_else(|| base.as_ref().map(|c| c.output_dir.clone()))
            .context("Output directory missing: pass --output or --config")?;

        let mut config = match base {
            Some(base) => RunConfig {
                input_dir,
                output_dir,
                region,
                ..base
            },
            None => RunConfig::new(input_dir, output_dir, region),
        };

        if let Some(prefix) = self.prefix {
            config.file_prefix = prefix;
        }
        if let Some(suffix) = self.suffix {
            config.output_suffix = suffix;
        }
        config.parallel |= self.parallel;
        config.create_output_dir |= self.create_output;

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let report = args.report.clone();
    let config = args.into_config()?;
    config.validate()?;

    info!("Input: {}", config.input_dir.display());
    info!("Output: {}", config.output_dir.display());
    info!("Region: {}", config.region);

    let files = select_files(&config.input_dir, &config.file_prefix, &config.output_suffix)?;
    if files.is_empty() {
        warn!(
            "No files starting with '{}' in {}",
            config.file_prefix,
            config.input_dir.display()
        );
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("#>-"),
    );

    let summary = run(&config, &files, &pb);
    pb.finish_with_message("Processing complete");

    info!(
        "Processed {} files ({} failed): {} records, {} unresolved, {} kept",
        summary.files.len(),
        summary.failures.len(),
        summary.records(),
        summary.failed_records(),
        summary.retained()
    );
    for failure in &summary.failures {
        warn!("Failed: {} ({})", failure.source.display(), failure.error);
    }

    if let Some(path) = report {
        summary.write_json(&path)?;
        info!("Wrote run summary to {}", path.display());
    }

    Ok(())
}
