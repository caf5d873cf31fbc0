//! FILENAME: core/pivot-engine/src/export.rs
//! Export seam - turns a finished result into bytes for a host download.
//!
//! Excel, CSV and PDF encoders live with the host; this crate only ships the
//! JSON encoder and the trait the host implements for the rest.

use serde::Serialize;
use crate::definition::{ExportFormat, PivotExportSettings};
use crate::error::PivotError;
use crate::view::{PivotCell, PivotResult};

/// Encodes a pivot result according to export settings.
pub trait PivotExporter {
    fn export(&self, result: &PivotResult, settings: &PivotExportSettings) -> Result<Vec<u8>, PivotError>;
}

/// JSON encoder for pivot results.
///
/// Honors `include_headers` and `include_formatting`. `include_filters` is
/// ignored: a `PivotResult` carries no filter state, so hidden items are only
/// available to exporters that also hold the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pub pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    file_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_headers: Option<&'a [String]>,
    rows: Vec<ExportRow<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    level: usize,
    is_total: bool,
    cells: Vec<ExportCell<'a>>,
}

/// A cell as exported: formatted text, and the raw value unless formatting
/// is excluded, in which case the raw value replaces the text.
#[derive(Serialize)]
#[serde(untagged)]
enum ExportCell<'a> {
    Formatted { text: &'a str, value: Option<f64> },
    Raw(Option<f64>),
    Text(&'a str),
}

impl<'a> ExportCell<'a> {
    fn from_cell(cell: &'a PivotCell, include_formatting: bool) -> Self {
        match (include_formatting, cell.value) {
            (true, value) => ExportCell::Formatted {
                text: &cell.formatted_value,
                value,
            },
            (false, Some(value)) => ExportCell::Raw(Some(value)),
            (false, None) => ExportCell::Text(&cell.formatted_value),
        }
    }
}

impl PivotExporter for JsonExporter {
    fn export(&self, result: &PivotResult, settings: &PivotExportSettings) -> Result<Vec<u8>, PivotError> {
        if settings.format != ExportFormat::Json {
            return Err(PivotError::UnsupportedExportFormat(settings.format));
        }

        let document = ExportDocument {
            file_name: &settings.file_name,
            column_headers: settings.include_headers.then_some(result.column_headers.as_slice()),
            rows: result
                .rows
                .iter()
                .map(|row| ExportRow {
                    level: row.level,
                    is_total: row.is_total,
                    cells: row
                        .cells
                        .iter()
                        .map(|c| ExportCell::from_cell(c, settings.include_formatting))
                        .collect(),
                })
                .collect(),
        };

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };
        log::debug!(target: "PIVOT", "exported {} rows as json ({} bytes)", result.rows.len(), bytes.len());
        Ok(bytes)
    }
}
