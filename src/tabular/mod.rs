//! Delimited-file load and store.

mod reader;
mod writer;

pub use reader::{read_records, records_from_reader};
pub use writer::{output_name, write_locations, write_locations_to};

use std::path::PathBuf;
use thiserror::Error;

/// A whole-file failure: the batch could not be loaded or stored
#[derive(Debug, Error)]
pub enum BatchFailure {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read records from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: line {line} has {found} field(s), expected at least 2", .path.display())]
    Format {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
