//! Core error types for ConstructManager RS
//!
//! The progress and analytics engines share a single error taxonomy; the
//! API layer maps `NotFound` to a not-found response and everything else
//! to a generic failure carrying the error message.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{Id, Level};

/// Core error type for all engine operations
#[derive(Error, Debug)]
pub enum CmError {
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: Id },

    #[error("Invalid date range: start={start} end={end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// An ancestor write failed after one or more descendant writes
    /// succeeded. `updated` lists the levels already persisted so the
    /// caller can decide whether to retry the remaining levels; no
    /// rollback is attempted.
    #[error("Cascade halted after updating {updated:?}: {source}")]
    PartialCascade {
        updated: Vec<Level>,
        #[source]
        source: Box<CmError>,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CmError {
    pub fn not_found(level: Level, id: Id) -> Self {
        CmError::NotFound {
            entity: level.entity_name(),
            id,
        }
    }

    /// HTTP status code mapping for the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            CmError::NotFound { .. } => 404,
            CmError::InvalidRange { .. }
            | CmError::PartialCascade { .. }
            | CmError::Store(_)
            | CmError::Internal(_)
            | CmError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CmError::NotFound { .. } => "not_found",
            CmError::InvalidRange { .. } => "invalid_range",
            CmError::PartialCascade { .. } => "partial_cascade_failure",
            CmError::Store(_) => "store_error",
            CmError::Internal(_) => "internal_error",
            CmError::Config(_) => "configuration_error",
        }
    }

    /// The levels that were persisted before this error, if any.
    pub fn updated_levels(&self) -> &[Level] {
        match self {
            CmError::PartialCascade { updated, .. } => updated,
            _ => &[],
        }
    }
}
