//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Configuration - The serializable description of a pivot table.
//!
//! This module contains all the types needed to DESCRIBE a pivot table.
//! These structures are designed to be:
//! - Serializable (hosts edit them interactively and ship them as JSON)
//! - Immutable for the duration of one computation
//! - Cheap to clone (the session snapshots them per computation)

use serde::{Deserialize, Serialize};
use crate::error::PivotError;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for value fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AggregationType {
    #[default]
    Sum,
    Average,
    Count,
    Min,
    Max,
    DistinctCount,
}

// ============================================================================
// FIELD DEFINITIONS
// ============================================================================

/// The area a field is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FieldRole {
    #[default]
    Row,
    Column,
    Value,
    Filter,
}

/// Declared data type of a field. Drives the default number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FieldDataType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
    Currency,
    Percentage,
}

/// Sort order for a field's group items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
    /// Keep the order in which items first appear in the source data.
    None,
}

/// A field (by name) placed in one of the pivot areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotField {
    /// Name used to read the field from a record.
    pub name: String,

    /// Display name. Falls back to `name` when empty.
    #[serde(default)]
    pub caption: String,

    #[serde(default)]
    pub role: FieldRole,

    #[serde(default)]
    pub data_type: FieldDataType,

    /// Aggregation applied when the field is in the Values area.
    #[serde(default)]
    pub aggregation: AggregationType,

    /// Number format string (e.g., "C2", "#,##0.00", "0%").
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub sort_order: SortOrder,

    /// Items that are hidden (filtered out), by display string.
    #[serde(default)]
    pub hidden_items: Vec<String>,
}

impl PivotField {
    pub fn new(name: impl Into<String>, role: FieldRole) -> Self {
        PivotField {
            name: name.into(),
            caption: String::new(),
            role,
            data_type: FieldDataType::String,
            aggregation: AggregationType::Sum,
            format: None,
            sort_order: SortOrder::Ascending,
            hidden_items: Vec::new(),
        }
    }

    pub fn row(name: impl Into<String>) -> Self {
        Self::new(name, FieldRole::Row)
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::new(name, FieldRole::Column)
    }

    pub fn filter(name: impl Into<String>) -> Self {
        Self::new(name, FieldRole::Filter)
    }

    pub fn value(name: impl Into<String>, aggregation: AggregationType) -> Self {
        let mut field = Self::new(name, FieldRole::Value);
        field.data_type = FieldDataType::Number;
        field.aggregation = aggregation;
        field
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_data_type(mut self, data_type: FieldDataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_hidden_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_items = items.into_iter().map(Into::into).collect();
        self
    }

    /// The caption shown in headers.
    pub fn display_caption(&self) -> &str {
        if self.caption.is_empty() {
            &self.name
        } else {
            &self.caption
        }
    }

    pub fn is_hidden(&self, label: &str) -> bool {
        self.hidden_items.iter().any(|h| h == label)
    }
}

// ============================================================================
// MAIN CONFIGURATION STRUCT
// ============================================================================

/// The complete configuration of a pivot table.
/// Caller-owned; each change triggers a full recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotConfiguration {
    /// Fields placed in the Row area (ordered from outer to inner).
    #[serde(default)]
    pub row_fields: Vec<PivotField>,

    /// Fields placed in the Column area (ordered from outer to inner).
    #[serde(default)]
    pub column_fields: Vec<PivotField>,

    /// Fields placed in the Values area.
    #[serde(default)]
    pub value_fields: Vec<PivotField>,

    /// Fields placed in the Filter area. Only their hidden items apply.
    #[serde(default)]
    pub filter_fields: Vec<PivotField>,

    #[serde(default)]
    pub show_sub_totals: bool,

    #[serde(default = "default_true")]
    pub show_grand_totals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PivotConfiguration {
    fn default() -> Self {
        PivotConfiguration {
            row_fields: Vec::new(),
            column_fields: Vec::new(),
            value_fields: Vec::new(),
            filter_fields: Vec::new(),
            show_sub_totals: false,
            show_grand_totals: true,
        }
    }
}

impl PivotConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration sent by a host as JSON.
    pub fn from_json(json: &str) -> Result<Self, PivotError> {
        serde_json::from_str(json).map_err(|e| PivotError::InvalidConfiguration(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, PivotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_row(mut self, field: PivotField) -> Self {
        self.row_fields.push(field);
        self
    }

    pub fn with_column(mut self, field: PivotField) -> Self {
        self.column_fields.push(field);
        self
    }

    pub fn with_value(mut self, field: PivotField) -> Self {
        self.value_fields.push(field);
        self
    }

    pub fn with_filter(mut self, field: PivotField) -> Self {
        self.filter_fields.push(field);
        self
    }

    pub fn with_sub_totals(mut self, show: bool) -> Self {
        self.show_sub_totals = show;
        self
    }

    pub fn with_grand_totals(mut self, show: bool) -> Self {
        self.show_grand_totals = show;
        self
    }

    /// True when nothing is placed in any area that produces output.
    pub fn is_empty(&self) -> bool {
        self.row_fields.is_empty() && self.column_fields.is_empty() && self.value_fields.is_empty()
    }

    /// Fields whose hidden items restrict the input records.
    pub fn filtering_fields(&self) -> impl Iterator<Item = &PivotField> {
        self.row_fields
            .iter()
            .chain(self.column_fields.iter())
            .chain(self.filter_fields.iter())
            .filter(|f| !f.hidden_items.is_empty())
    }
}

// ============================================================================
// EXPORT SETTINGS
// ============================================================================

/// Target format of an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExportFormat {
    #[default]
    Excel,
    Csv,
    Pdf,
    Json,
}

/// Options a host passes along with an export request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotExportSettings {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_true")]
    pub include_headers: bool,
    /// Only read by exporters that also receive the configuration.
    #[serde(default)]
    pub include_filters: bool,
    #[serde(default = "default_true")]
    pub include_formatting: bool,
}

fn default_file_name() -> String {
    "PivotExport".to_string()
}

impl Default for PivotExportSettings {
    fn default() -> Self {
        PivotExportSettings {
            format: ExportFormat::Excel,
            file_name: default_file_name(),
            include_headers: true,
            include_filters: false,
            include_formatting: true,
        }
    }
}
