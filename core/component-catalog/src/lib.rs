//! FILENAME: core/component-catalog/src/lib.rs
//! Component metadata catalog used by the documentation pages.
//!
//! Layers:
//! - `metadata`: Serializable descriptions of components, parameters, events
//! - `catalog`: The immutable catalog built once at startup

pub mod error;
pub mod metadata;
pub mod catalog;

pub use error::CatalogError;
pub use metadata::{pivot_table_metadata, ComponentMetadata, EventMetadata, ParameterMetadata};
pub use catalog::{CatalogBuilder, ComponentCatalog};
