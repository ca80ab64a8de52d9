use thiserror::Error;

use crate::models::LocationField;

/// Why a single record could not be given a location.
///
/// These never abort a batch; the record is dropped and the error reported.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("record {id}: {field} text has no parseable coordinates: {reason}")]
    Parse {
        id: String,
        field: LocationField,
        reason: String,
    },

    #[error("record {id}: expected {expected} numbers in {field} text, found {found}")]
    Malformed {
        id: String,
        field: LocationField,
        expected: usize,
        found: usize,
    },

    #[error("record {id}: {field} text is missing")]
    Missing { id: String, field: LocationField },
}

/// Coarse error class used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Parse,
    MalformedLocation,
}

impl LocationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LocationError::Parse { .. } => FailureKind::Parse,
            LocationError::Malformed { .. } | LocationError::Missing { .. } => {
                FailureKind::MalformedLocation
            }
        }
    }

    /// Identifier of the record that failed
    pub fn record_id(&self) -> &str {
        match self {
            LocationError::Parse { id, .. }
            | LocationError::Malformed { id, .. }
            | LocationError::Missing { id, .. } => id,
        }
    }
}
