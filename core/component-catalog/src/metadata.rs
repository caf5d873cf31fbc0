//! FILENAME: core/component-catalog/src/metadata.rs
//! Documentation metadata for a single component.

use serde::{Deserialize, Serialize};

/// A component parameter as shown in documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterMetadata {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ParameterMetadata {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        ParameterMetadata {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
            description: String::new(),
            required: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// An event a component raises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl EventMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        EventMetadata {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Everything the documentation knows about one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    #[serde(default)]
    pub events: Vec<EventMetadata>,
}

impl ComponentMetadata {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        ComponentMetadata {
            name: name.into(),
            category: category.into(),
            description: String::new(),
            parameters: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterMetadata) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_event(mut self, event: EventMetadata) -> Self {
        self.events.push(event);
        self
    }

    /// Looks up a parameter by name (case-insensitive).
    pub fn parameter(&self, name: &str) -> Option<&ParameterMetadata> {
        self.parameters.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ParameterMetadata> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// Metadata of the pivot table component.
pub fn pivot_table_metadata() -> ComponentMetadata {
    ComponentMetadata::new("PivotTable", "Data")
        .with_description("Cross-tabulates a flat dataset into grouped, aggregated rows and columns.")
        .with_parameter(
            ParameterMetadata::new("DataSource", "IEnumerable<TItem>")
                .with_description("Records to summarize.")
                .required(),
        )
        .with_parameter(
            ParameterMetadata::new("Configuration", "PivotConfiguration")
                .with_description("Row, column, value and filter fields.")
                .required(),
        )
        .with_parameter(
            ParameterMetadata::new("ShowSubTotals", "bool")
                .with_default("false")
                .with_description("Adds a subtotal row after each row group."),
        )
        .with_parameter(
            ParameterMetadata::new("ShowGrandTotals", "bool")
                .with_default("true")
                .with_description("Adds the grand total row and column."),
        )
        .with_parameter(
            ParameterMetadata::new("MaxDrillDownRecords", "int")
                .with_default("1000")
                .with_description("Cap on detail records returned for a selected cell."),
        )
        .with_event(EventMetadata::new("OnCellSelected", "Raised with the drill-down detail of a selected cell."))
        .with_event(EventMetadata::new("OnConfigurationChanged", "Raised after the field layout changes."))
        .with_event(EventMetadata::new("OnExport", "Raised when the user requests an export."))
}
