//! FILENAME: core/pivot-engine/src/error.rs

use thiserror::Error;
use crate::definition::ExportFormat;

/// Errors raised at the edges of the engine.
/// Pivot computation itself never fails; it degrades to an empty result.
#[derive(Error, Debug)]
pub enum PivotError {
    #[error("Invalid pivot configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Stale computation: generation {ticket} superseded by {current}")]
    StaleComputation { ticket: u64, current: u64 },

    #[error("Unsupported export format: {0:?}")]
    UnsupportedExportFormat(ExportFormat),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
