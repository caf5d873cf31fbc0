//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - Renderable output for the host.
//!
//! A `PivotResult` is produced fresh by every computation and never mutated
//! afterwards. It carries:
//! - Column headers (flat captions plus structured header rows)
//! - Rows with nesting level and total flags
//! - Cells with raw and formatted values plus the group path behind them
//! - Summary statistics

use serde::{Deserialize, Serialize};
use crate::value::GroupPath;

// ============================================================================
// CELLS
// ============================================================================

/// The kind of a cell in the pivot view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotCellKind {
    /// Aggregated value of a data row.
    Value,
    RowHeader,
    ColumnHeader,
    GrandTotal,
    SubTotal,
    /// Blank cell (for layout purposes).
    Empty,
}

/// A single cell in the pivot view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotCell {
    /// Raw aggregated value. None for header and blank cells.
    pub value: Option<f64>,

    /// Pre-formatted display string.
    pub formatted_value: String,

    pub kind: PivotCellKind,

    pub is_grand_total: bool,

    pub is_sub_total: bool,

    /// Column group values behind a value cell (empty for the grand total
    /// column and when no column fields are configured).
    #[serde(default)]
    pub column_path: GroupPath,

    /// Label of the column group behind a value cell.
    #[serde(default)]
    pub column_label: Option<String>,

    /// Index into the configuration's value fields.
    #[serde(default)]
    pub value_field: Option<usize>,
}

impl PivotCell {
    fn base(kind: PivotCellKind) -> Self {
        PivotCell {
            value: None,
            formatted_value: String::new(),
            kind,
            is_grand_total: false,
            is_sub_total: false,
            column_path: GroupPath::new(),
            column_label: None,
            value_field: None,
        }
    }

    /// Creates an aggregated value cell.
    pub fn value(value: f64, formatted_value: String) -> Self {
        PivotCell {
            value: Some(value),
            formatted_value,
            ..Self::base(PivotCellKind::Value)
        }
    }

    /// Creates a row header cell.
    pub fn row_header(label: impl Into<String>) -> Self {
        PivotCell {
            formatted_value: label.into(),
            ..Self::base(PivotCellKind::RowHeader)
        }
    }

    /// Creates a column header cell.
    pub fn column_header(label: impl Into<String>) -> Self {
        PivotCell {
            formatted_value: label.into(),
            ..Self::base(PivotCellKind::ColumnHeader)
        }
    }

    /// Creates a blank cell.
    pub fn blank() -> Self {
        Self::base(PivotCellKind::Empty)
    }

    /// Marks the cell as part of a subtotal row.
    pub fn as_sub_total(mut self) -> Self {
        self.is_sub_total = true;
        if self.kind == PivotCellKind::Value {
            self.kind = PivotCellKind::SubTotal;
        }
        self
    }

    /// Marks the cell as part of the grand total row or column.
    pub fn as_grand_total(mut self) -> Self {
        self.is_grand_total = true;
        if matches!(self.kind, PivotCellKind::Value | PivotCellKind::SubTotal) {
            self.kind = PivotCellKind::GrandTotal;
        }
        self
    }

    pub fn with_column(mut self, path: GroupPath, label: Option<String>) -> Self {
        self.column_path = path;
        self.column_label = label;
        self
    }

    pub fn with_value_field(mut self, index: usize) -> Self {
        self.value_field = Some(index);
        self
    }

    /// True for cells that carry an aggregate.
    pub fn is_numeric(&self) -> bool {
        self.value.is_some()
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// A row of the pivot view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRow {
    pub cells: Vec<PivotCell>,

    /// Nesting depth (0 = outermost row field).
    pub level: usize,

    /// Label of the group this row summarizes. None for the grand total row.
    pub group_key: Option<String>,

    /// True for subtotal and grand total rows.
    pub is_total: bool,

    pub is_expanded: bool,

    /// Row group values from the outermost field down to `level`.
    #[serde(default)]
    pub group_path: GroupPath,
}

impl PivotRow {
    /// The row header label (first non-blank header cell).
    pub fn label(&self) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.kind == PivotCellKind::RowHeader && !c.formatted_value.is_empty())
            .map(|c| c.formatted_value.as_str())
    }

    /// Cells that carry an aggregate, in column order.
    pub fn value_cells(&self) -> impl Iterator<Item = &PivotCell> {
        self.cells.iter().filter(|c| c.is_numeric())
    }

    pub fn is_grand_total(&self) -> bool {
        self.is_total && self.group_path.is_empty()
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Derived summary of a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotStatistics {
    pub total_rows: usize,
    pub total_columns: usize,
    pub data_rows: usize,
    pub grouped_rows: usize,
    pub grand_total: f64,
}

/// The complete output of one computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResult {
    pub column_headers: Vec<String>,
    pub header_rows: Vec<Vec<PivotCell>>,
    pub rows: Vec<PivotRow>,
    pub statistics: PivotStatistics,
}

impl PivotResult {
    /// Creates an empty result (no headers, no rows, zero statistics).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the first row whose header label matches `label`.
    pub fn row_by_label(&self, label: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.label() == Some(label))
    }

    /// The trailing grand total row, if present.
    pub fn grand_total_row(&self) -> Option<&PivotRow> {
        self.rows.last().filter(|r| r.is_grand_total())
    }

    /// Recomputes the derived statistics from the headers and rows.
    pub(crate) fn refresh_statistics(&mut self) {
        let grand_total = self
            .rows
            .last()
            .and_then(|r| r.cells.last())
            .and_then(|c| c.value)
            .unwrap_or(0.0);

        self.statistics = PivotStatistics {
            total_rows: self.rows.len(),
            total_columns: self.column_headers.len(),
            data_rows: self.rows.iter().filter(|r| !r.is_total).count(),
            grouped_rows: self.rows.iter().filter(|r| r.level > 0).count(),
            grand_total,
        };
    }
}

// ============================================================================
// DRILL-DOWN
// ============================================================================

/// The detail behind one selected cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotDrillDownData<R> {
    /// Caption of the first row field.
    pub row_field: String,
    /// Caption of the first column field.
    pub column_field: String,
    pub row_value: Option<String>,
    pub column_value: Option<String>,
    /// The aggregate shown in the selected cell.
    pub cell_value: Option<f64>,
    /// Matching source records, in source order, capped at the request limit.
    pub detail_records: Vec<R>,
    /// Number of matching records before the cap.
    pub total_count: usize,
    pub is_truncated: bool,
}
