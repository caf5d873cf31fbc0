//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot Table engine.
//!
//! Turns a flat collection of records into a cross-tabulated summary:
//! records are grouped by row and column fields, value fields are aggregated
//! per group, and the result carries formatted cells, subtotals and grand
//! totals. Records stay opaque; fields are read through a `FieldAccessor`.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot table IS)
//! - `value` / `accessor`: How record fields are read and compared
//! - `aggregate` / `grouper` / `number_format`: Computation building blocks
//! - `engine`: Calculation engine (HOW we calculate)
//! - `view`: Renderable output for the host (WHAT we display)
//! - `session`: Interactive state with last-write-wins recomputation
//! - `export`: Encoders for finished results

pub mod value;
pub mod definition;
pub mod error;
pub mod accessor;
pub mod aggregate;
pub mod number_format;
pub mod grouper;
pub mod view;
pub mod engine;
pub mod session;
pub mod export;

pub use value::*;
pub use definition::*;
pub use error::PivotError;
pub use accessor::{json_to_field_value, FieldAccessor, NamedFields};
pub use aggregate::{aggregate, AggregateAccumulator};
pub use number_format::{format_number, format_value, NumberFormat};
pub use grouper::{group, group_columns, group_indices, ColumnGroup, Group};
pub use view::*;
pub use engine::{calculate_pivot, drill_down, PivotCalculator, GRAND_TOTAL_LABEL, TOTAL_LABEL};
pub use session::{ComputeTicket, PivotSession, DEFAULT_MAX_DRILL_DOWN_RECORDS};
pub use export::{JsonExporter, PivotExporter};
