//! Run configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Region;

pub const DEFAULT_FILE_PREFIX: &str = "part";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_filtered.csv";

/// Everything one run needs, built once before any file is touched.
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub region: Region,

    /// Only files whose name starts with this are processed
    #[serde(default = "default_prefix")]
    pub file_prefix: String,

    /// Appended to the source file name to name its output
    #[serde(default = "default_suffix")]
    pub output_suffix: String,

    /// Process files on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Create `output_dir` if it does not exist
    #[serde(default)]
    pub create_output_dir: bool,
}

fn default_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

fn default_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

impl RunConfig {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, region: Region) -> Self {
        Self {
            input_dir,
            output_dir,
            region,
            file_prefix: default_prefix(),
            output_suffix: default_suffix(),
            parallel: false,
            create_output_dir: false,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: RunConfig = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Check the region and directories, creating the output directory if
    /// allowed.
    pub fn validate(&self) -> Result<()> {
        self.region.validate().context("Invalid region")?;

        if !self.input_dir.is_dir() {
            anyhow::bail!(
                "Input location does not exist: {}",
                self.input_dir.display()
            );
        }

        if !self.output_dir.is_dir() {
            if !self.create_output_dir {
                anyhow::bail!(
                    "Output location does not exist: {} (pass --create-output to create it)",
                    self.output_dir.display()
                );
            }
            fs::create_dir_all(&self.output_dir).with_context(|| {
                format!(
                    "Failed to create output directory {}",
                    self.output_dir.display()
                )
            })?;
        }
        Ok(())
    }
}
