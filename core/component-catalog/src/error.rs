//! FILENAME: core/component-catalog/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Component registered twice: {0}")]
    DuplicateComponent(String),

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
