//! Per-file load → normalize → filter → store, and the driver over a directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::RunConfig;
use crate::locate::{normalize, FailureKind};
use crate::spatial::filter;
use crate::tabular::{output_name, read_records, write_locations, BatchFailure};

/// Counts for one successfully processed file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Rows read
    pub records: usize,
    /// Rows dropped because no location could be resolved
    pub failed: usize,
    pub parse_failures: usize,
    pub malformed: usize,
    /// Rows written
    pub retained: usize,
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: String,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn records(&self) -> usize {
        self.files.iter().map(|f| f.records).sum()
    }

    pub fn retained(&self) -> usize {
        self.files.iter().map(|f| f.retained).sum()
    }

    pub fn failed_records(&self) -> usize {
        self.files.iter().map(|f| f.failed).sum()
    }

    /// Write the summary as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        Ok(())
    }
}

/// List the files to process: direct children of `dir` named `prefix*`,
/// skipping anything that already carries the output suffix.
pub fn select_files(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            warn!("Skipping non-UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if !file_name.starts_with(prefix) {
            continue;
        }
        if !suffix.is_empty() && file_name.ends_with(suffix) {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Process one part file end to end.
///
/// Record-level failures are counted and logged; only load or store
/// problems fail the file.
pub fn process_file(source: &Path, config: &RunConfig) -> Result<FileOutcome, BatchFailure> {
    let records = read_records(source)?;
    let total = records.len();

    let batch = normalize(records);
    for failure in &batch.failures {
        debug!("Dropping record: {}", failure);
    }
    let parse_failures = batch
        .failures
        .iter()
        .filter(|e| e.kind() == FailureKind::Parse)
        .count();
    let failed = batch.failures.len();

    let retained = filter(batch.locations, &config.region);

    let destination = output_name(source, &config.output_dir, &config.output_suffix);
    write_locations(&destination, &retained)?;

    info!(
        "{}: {} records, {} unresolved, {} inside region -> {}",
        source.display(),
        total,
        failed,
        retained.len(),
        destination.display()
    );

    Ok(FileOutcome {
        source: source.to_path_buf(),
        destination,
        records: total,
        failed,
        parse_failures,
        malformed: failed - parse_failures,
        retained: retained.len(),
    })
}

/// Process every selected file.
///
/// A file that fails is logged and recorded, and the run moves on. The
/// progress bar advances once per completed file.
pub fn run(config: &RunConfig, files: &[PathBuf], progress: &ProgressBar) -> RunSummary {
    let started_at = Utc::now();
    info!(
        "Filtering {} files from {} to region {}",
        files.len(),
        config.input_dir.display(),
        config.region
    );

    let process = |path: &PathBuf| {
        let result = process_file(path, config);
        match &result {
            Ok(_) => progress.inc(1),
            Err(e) => error!("Skipping {}: {}", path.display(), e),
        }
        result.map_err(|e| FileFailure {
            source: path.clone(),
            error: e.to_string(),
        })
    };

    let results: Vec<Result<FileOutcome, FileFailure>> = if config.parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    let mut summary = RunSummary {
        started_at,
        finished_at: started_at,
        files: Vec::new(),
        failures: Vec::new(),
    };
    for result in results {
        match result {
            Ok(outcome) => summary.files.push(outcome),
            Err(failure) => summary.failures.push(failure),
        }
    }
    summary.finished_at = Utc::now();
    summary
}
