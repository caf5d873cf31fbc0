//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - The calculation core that transforms records into a view.
//!
//! This module takes a PivotConfiguration and a slice of caller records
//! (read through a FieldAccessor) and produces a PivotResult.
//!
//! Algorithm:
//! 1. Drop records whose row/column/filter values are hidden
//! 2. Partition the remaining records by column field combination
//! 3. Walk the row fields recursively, emitting a data row per group,
//!    its child groups, then an optional subtotal row
//! 4. Append the grand total row, computed over every remaining record
//! 5. Derive statistics from the finished rows

use std::time::Instant;
use crate::accessor::FieldAccessor;
use crate::aggregate::aggregate_iter;
use crate::definition::{PivotConfiguration, PivotField};
use crate::grouper::{group_columns, group_indices, matches_path, ColumnGroup, Group};
use crate::number_format::format_value;
use crate::value::GroupPath;
use crate::view::{PivotCell, PivotDrillDownData, PivotResult, PivotRow};

/// Header of the grand total row and column.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// Label of the single row produced when no row fields are configured.
pub const TOTAL_LABEL: &str = "Total";

/// Separator between a column group label and a value field caption.
const VALUE_CAPTION_SEPARATOR: &str = " - ";

/// How a row's cells are tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Data,
    SubTotal,
    GrandTotal,
}

// ============================================================================
// PIVOT CALCULATOR
// ============================================================================

/// The main calculation engine for pivot tables.
pub struct PivotCalculator<'a, R, A: ?Sized> {
    config: &'a PivotConfiguration,
    records: &'a [R],
    accessor: &'a A,

    /// Indices of the records that survive hidden-item filtering.
    included: Vec<usize>,

    /// Column groups in display order.
    column_groups: Vec<ColumnGroup>,

    /// Column group index per record (None when not included).
    column_of: Vec<Option<usize>>,
}

impl<'a, R, A> PivotCalculator<'a, R, A>
where
    A: FieldAccessor<R> + ?Sized,
{
    /// Creates a new calculator instance.
    pub fn new(config: &'a PivotConfiguration, records: &'a [R], accessor: &'a A) -> Self {
        PivotCalculator {
            config,
            records,
            accessor,
            included: Vec::new(),
            column_groups: Vec::new(),
            column_of: Vec::new(),
        }
    }

    /// Executes the full calculation and returns the result.
    pub fn calculate(&mut self) -> PivotResult {
        if self.records.is_empty() || self.config.is_empty() {
            return PivotResult::empty();
        }

        // Step 1: Hidden items
        self.apply_filters();
        if self.included.is_empty() {
            log::debug!(target: "PIVOT", "all {} records filtered out", self.records.len());
            return PivotResult::empty();
        }

        // Step 2: Column axis
        self.build_column_axis();

        // Step 3-4: Headers and rows
        let mut result = PivotResult {
            column_headers: self.generate_column_headers(),
            header_rows: self.generate_header_rows(),
            rows: Vec::new(),
            ..PivotResult::default()
        };

        if self.config.row_fields.is_empty() {
            result.rows.push(self.generate_single_data_row());

            // Without column fields the Total row already is the grand total
            if self.config.show_grand_totals && self.has_column_fields() {
                result.rows.push(self.generate_grand_total_row());
            }
        } else {
            self.generate_row_level(&self.included, 0, &GroupPath::new(), &mut result.rows);

            if self.config.show_grand_totals {
                result.rows.push(self.generate_grand_total_row());
            }
        }

        // Step 5: Statistics
        result.refresh_statistics();
        result
    }

    // ------------------------------------------------------------------------
    // FILTERING
    // ------------------------------------------------------------------------

    fn apply_filters(&mut self) {
        let config = self.config;
        let accessor = self.accessor;
        self.included = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| passes_filters(config, *record, accessor))
            .map(|(idx, _)| idx)
            .collect();
    }

    // ------------------------------------------------------------------------
    // COLUMN AXIS
    // ------------------------------------------------------------------------

    fn build_column_axis(&mut self) {
        self.column_groups = group_columns(
            self.records,
            &self.included,
            self.accessor,
            &self.config.column_fields,
        );

        self.column_of = vec![None; self.records.len()];
        for (col_idx, group) in self.column_groups.iter().enumerate() {
            for &record_idx in &group.members {
                self.column_of[record_idx] = Some(col_idx);
            }
        }
    }

    fn has_column_fields(&self) -> bool {
        !self.config.column_fields.is_empty()
    }

    fn shows_grand_total_column(&self) -> bool {
        self.config.show_grand_totals && !self.config.value_fields.is_empty()
    }

    /// Flat captions: row fields, (column group x value field), grand total.
    fn generate_column_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = self
            .config
            .row_fields
            .iter()
            .map(|f| f.display_caption().to_string())
            .collect();

        if self.has_column_fields() {
            for group in &self.column_groups {
                for vf in &self.config.value_fields {
                    headers.push(format!(
                        "{}{}{}",
                        group.label,
                        VALUE_CAPTION_SEPARATOR,
                        vf.display_caption()
                    ));
                }
            }
        } else {
            headers.extend(
                self.config
                    .value_fields
                    .iter()
                    .map(|vf| vf.display_caption().to_string()),
            );
        }

        if self.shows_grand_total_column() {
            headers.push(GRAND_TOTAL_LABEL.to_string());
        }

        headers
    }

    /// Structured header rows: one per column field level, then a caption row.
    fn generate_header_rows(&self) -> Vec<Vec<PivotCell>> {
        let row_label_cols = self.config.row_fields.len();
        let mut header_rows = Vec::new();

        if self.has_column_fields() {
            for level in 0..self.config.column_fields.len() {
                let mut cells: Vec<PivotCell> = vec![PivotCell::blank(); row_label_cols];
                for group in &self.column_groups {
                    let label = group.path[level].label();
                    for _ in &self.config.value_fields {
                        cells.push(
                            PivotCell::column_header(label.clone())
                                .with_column(group.path.clone(), Some(group.label.clone())),
                        );
                    }
                }
                if self.shows_grand_total_column() {
                    cells.push(PivotCell::blank());
                }
                header_rows.push(cells);
            }
        }

        let mut captions: Vec<PivotCell> = self
            .config
            .row_fields
            .iter()
            .map(|f| PivotCell::column_header(f.display_caption()))
            .collect();
        let column_slots = self.column_groups.len().max(1);
        for slot in 0..column_slots {
            for (vi, vf) in self.config.value_fields.iter().enumerate() {
                let mut cell = PivotCell::column_header(vf.display_caption()).with_value_field(vi);
                if let Some(group) = self.column_groups.get(slot) {
                    cell = cell.with_column(group.path.clone(), Some(group.label.clone()));
                }
                captions.push(cell);
            }
        }
        if self.shows_grand_total_column() {
            captions.push(PivotCell::column_header(GRAND_TOTAL_LABEL).as_grand_total());
        }
        header_rows.push(captions);

        header_rows
    }

    // ------------------------------------------------------------------------
    // ROWS
    // ------------------------------------------------------------------------

    /// Emits the rows for every group of `row_fields[depth]` within `members`.
    fn generate_row_level(
        &self,
        members: &[usize],
        depth: usize,
        parent_path: &GroupPath,
        rows: &mut Vec<PivotRow>,
    ) {
        let Some(field) = self.config.row_fields.get(depth) else {
            return;
        };
        let groups = group_indices(self.records, members, self.accessor, field);
        let has_children = depth + 1 < self.config.row_fields.len();

        for group in &groups {
            let mut path = parent_path.clone();
            path.push(group.key.clone());

            rows.push(self.generate_group_row(group, depth, &path, RowKind::Data));

            if has_children {
                self.generate_row_level(&group.members, depth + 1, &path, rows);
            }

            if self.config.show_sub_totals && !self.config.value_fields.is_empty() {
                rows.push(self.generate_group_row(group, depth, &path, RowKind::SubTotal));
            }
        }
    }

    fn generate_group_row(&self, group: &Group, depth: usize, path: &GroupPath, kind: RowKind) -> PivotRow {
        let label = match kind {
            RowKind::SubTotal => format!("{} {}", group.label, TOTAL_LABEL),
            _ => group.label.clone(),
        };

        let mut cells = self.row_label_cells(&label, depth, kind);
        self.generate_data_cells(&mut cells, &group.members, kind);

        PivotRow {
            cells,
            level: depth,
            group_key: Some(group.label.clone()),
            is_total: kind != RowKind::Data,
            is_expanded: true,
            group_path: path.clone(),
        }
    }

    /// Generates the single row used when there are no row fields.
    fn generate_single_data_row(&self) -> PivotRow {
        let mut cells = vec![PivotCell::row_header(TOTAL_LABEL)];
        self.generate_data_cells(&mut cells, &self.included, RowKind::Data);

        PivotRow {
            cells,
            level: 0,
            group_key: Some(TOTAL_LABEL.to_string()),
            is_total: false,
            is_expanded: true,
            group_path: GroupPath::new(),
        }
    }

    fn generate_grand_total_row(&self) -> PivotRow {
        let mut cells = self.row_label_cells(GRAND_TOTAL_LABEL, 0, RowKind::GrandTotal);
        self.generate_data_cells(&mut cells, &self.included, RowKind::GrandTotal);

        PivotRow {
            cells,
            level: 0,
            group_key: None,
            is_total: true,
            is_expanded: true,
            group_path: GroupPath::new(),
        }
    }

    /// One header slot per row field; the label sits in the slot of `depth`.
    fn row_label_cells(&self, label: &str, depth: usize, kind: RowKind) -> Vec<PivotCell> {
        let row_label_cols = self.config.row_fields.len().max(1);
        (0..row_label_cols)
            .map(|col| {
                if col != depth {
                    return PivotCell::blank();
                }
                let cell = PivotCell::row_header(label);
                match kind {
                    RowKind::Data => cell,
                    RowKind::SubTotal => cell.as_sub_total(),
                    RowKind::GrandTotal => cell.as_grand_total(),
                }
            })
            .collect()
    }

    /// Appends one cell per (column group x value field), then the grand
    /// total column cell, all aggregated over `members`.
    fn generate_data_cells(&self, cells: &mut Vec<PivotCell>, members: &[usize], kind: RowKind) {
        let value_fields = &self.config.value_fields;
        if value_fields.is_empty() {
            return;
        }

        if self.has_column_fields() {
            let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); self.column_groups.len()];
            for &idx in members {
                if let Some(bucket) = self.column_of.get(idx).copied().flatten().and_then(|c| buckets.get_mut(c)) {
                    bucket.push(idx);
                }
            }

            for (group, bucket) in self.column_groups.iter().zip(buckets.iter()) {
                for (vi, vf) in value_fields.iter().enumerate() {
                    let cell = self
                        .aggregate_cell(bucket, vf, kind)
                        .with_column(group.path.clone(), Some(group.label.clone()))
                        .with_value_field(vi);
                    cells.push(cell);
                }
            }
        } else {
            for (vi, vf) in value_fields.iter().enumerate() {
                cells.push(self.aggregate_cell(members, vf, kind).with_value_field(vi));
            }
        }

        if self.config.show_grand_totals {
            // The grand total column always reports the first value field
            let cell = self
                .aggregate_cell(members, &value_fields[0], kind)
                .as_grand_total()
                .with_value_field(0);
            cells.push(cell);
        }
    }

    fn aggregate_cell(&self, members: &[usize], field: &PivotField, kind: RowKind) -> PivotCell {
        let records = members.iter().filter_map(|&idx| self.records.get(idx));
        let value = aggregate_iter(records, self.accessor, field);
        let cell = PivotCell::value(value, format_value(value, field));
        match kind {
            RowKind::Data => cell,
            RowKind::SubTotal => cell.as_sub_total(),
            RowKind::GrandTotal => cell.as_grand_total(),
        }
    }
}

/// False when any of the record's row, column or filter values is hidden.
fn passes_filters<R, A>(config: &PivotConfiguration, record: &R, accessor: &A) -> bool
where
    A: FieldAccessor<R> + ?Sized,
{
    config
        .filtering_fields()
        .all(|field| !field.is_hidden(&accessor.field(record, &field.name).label()))
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates a pivot table from caller records and a configuration.
/// This is the main entry point for the calculation engine. It never fails:
/// empty input or an empty configuration produce an empty result.
pub fn calculate_pivot<R, A>(records: &[R], accessor: &A, config: &PivotConfiguration) -> PivotResult
where
    A: FieldAccessor<R> + ?Sized,
{
    let started = Instant::now();
    let mut calculator = PivotCalculator::new(config, records, accessor);
    let result = calculator.calculate();

    log::debug!(
        target: "PIVOT",
        "calculate_pivot records={} rows={} columns={} elapsed={:?}",
        records.len(),
        result.statistics.total_rows,
        result.statistics.total_columns,
        started.elapsed()
    );

    result
}

/// Resolves the source records behind a selected cell.
///
/// Returns None when `row` is a subtotal or grand total row. Otherwise the
/// detail holds every (non-hidden) record matching the row's group path and
/// the cell's column group, in source order, capped at `max_records`.
pub fn drill_down<R, A>(
    row: &PivotRow,
    cell: &PivotCell,
    config: &PivotConfiguration,
    records: &[R],
    accessor: &A,
    max_records: usize,
) -> Option<PivotDrillDownData<R>>
where
    R: Clone,
    A: FieldAccessor<R> + ?Sized,
{
    if row.is_total {
        log::debug!(target: "PIVOT", "drill_down ignored on total row");
        return None;
    }

    let row_fields = &config.row_fields[..row.group_path.len().min(config.row_fields.len())];
    let column_fields = &config.column_fields[..cell.column_path.len().min(config.column_fields.len())];

    let mut detail_records = Vec::new();
    let mut total_count = 0;
    for record in records {
        let matches = passes_filters(config, record, accessor)
            && matches_path(record, accessor, row_fields, &row.group_path)
            && matches_path(record, accessor, column_fields, &cell.column_path);

        if matches {
            total_count += 1;
            if detail_records.len() < max_records {
                detail_records.push(record.clone());
            }
        }
    }

    log::debug!(
        target: "PIVOT",
        "drill_down row={:?} column={:?} matches={}",
        row.group_key,
        cell.column_label,
        total_count
    );

    Some(PivotDrillDownData {
        row_field: caption_of(config.row_fields.first()),
        column_field: caption_of(config.column_fields.first()),
        row_value: row.group_key.clone(),
        column_value: cell.column_label.clone(),
        cell_value: cell.value,
        detail_records,
        total_count,
        is_truncated: total_count > max_records,
    })
}

fn caption_of(field: Option<&PivotField>) -> String {
    field.map(|f| f.display_caption().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{AggregationType, FieldDataType};
    use crate::value::FieldValue;
    use crate::view::PivotCellKind;

    #[derive(Debug, Clone, PartialEq)]
    struct Sale {
        region: &'static str,
        product: &'static str,
        sales: FieldValue,
    }

    fn sale(region: &'static str, product: &'static str, sales: f64) -> Sale {
        Sale { region, product, sales: FieldValue::number(sales) }
    }

    fn accessor(record: &Sale, name: &str) -> FieldValue {
        match name {
            "Region" => FieldValue::from(record.region),
            "Product" => FieldValue::from(record.product),
            "Sales" => record.sales.clone(),
            _ => FieldValue::Empty,
        }
    }

    fn create_test_records() -> Vec<Sale> {
        vec![
            sale("North", "Apples", 100.0),
            sale("North", "Oranges", 150.0),
            sale("South", "Apples", 200.0),
            sale("South", "Oranges", 250.0),
        ]
    }

    fn create_test_config() -> PivotConfiguration {
        PivotConfiguration::new()
            .with_row(PivotField::row("Region"))
            .with_column(PivotField::column("Product"))
            .with_value(PivotField::value("Sales", AggregationType::Sum))
    }

    fn values(row: &PivotRow) -> Vec<f64> {
        row.value_cells().filter_map(|c| c.value).collect()
    }

    #[test]
    fn test_basic_pivot_calculation() {
        let records = create_test_records();
        let result = calculate_pivot(&records, &accessor, &create_test_config());

        assert_eq!(
            result.column_headers,
            vec!["Region", "Apples - Sales", "Oranges - Sales", "Grand Total"]
        );
        assert_eq!(result.rows.len(), 3);

        let north = result.row_by_label("North").unwrap();
        assert_eq!(values(north), vec![100.0, 150.0, 250.0]);

        let grand = result.grand_total_row().unwrap();
        assert_eq!(values(grand), vec![300.0, 400.0, 700.0]);
        assert_eq!(result.statistics.grand_total, 700.0);
    }

    #[test]
    fn test_cells_carry_column_paths() {
        let records = create_test_records();
        let result = calculate_pivot(&records, &accessor, &create_test_config());

        let south = result.row_by_label("South").unwrap();
        let cells: Vec<&PivotCell> = south.value_cells().collect();
        assert_eq!(cells[0].column_path.as_slice(), &[FieldValue::text("Apples")]);
        assert_eq!(cells[1].column_label.as_deref(), Some("Oranges"));
        assert!(cells[2].column_path.is_empty());
        assert!(cells[2].is_grand_total);
        assert_eq!(cells[2].kind, PivotCellKind::GrandTotal);
    }

    #[test]
    fn test_header_rows_layout() {
        let records = create_test_records();
        let result = calculate_pivot(&records, &accessor, &create_test_config());

        assert_eq!(result.header_rows.len(), 2);
        let levels: Vec<&str> = result.header_rows[0]
            .iter()
            .map(|c| c.formatted_value.as_str())
            .collect();
        assert_eq!(levels, vec!["", "Apples", "Oranges", ""]);
        let captions: Vec<&str> = result.header_rows[1]
            .iter()
            .map(|c| c.formatted_value.as_str())
            .collect();
        assert_eq!(captions, vec!["Region", "Sales", "Sales", "Grand Total"]);
    }

    #[test]
    fn test_no_column_fields() {
        let records = create_test_records();
        let mut config = create_test_config();
        config.column_fields.clear();

        let result = calculate_pivot(&records, &accessor, &config);
        assert_eq!(result.column_headers, vec!["Region", "Sales", "Grand Total"]);
        assert_eq!(values(result.row_by_label("South").unwrap()), vec![450.0, 450.0]);
        assert_eq!(result.header_rows.len(), 1);
    }

    #[test]
    fn test_no_value_fields() {
        let records = create_test_records();
        let mut config = create_test_config();
        config.value_fields.clear();

        let result = calculate_pivot(&records, &accessor, &config);
        assert_eq!(result.column_headers, vec!["Region"]);
        // North, South, Grand Total with header cells only
        assert_eq!(result.rows.len(), 3);
        assert!(result.rows.iter().all(|r| r.value_cells().count() == 0));
        assert_eq!(result.statistics.grand_total, 0.0);
    }

    #[test]
    fn test_column_fields_without_row_fields() {
        let records = create_test_records();
        let mut config = create_test_config();
        config.row_fields.clear();

        let result = calculate_pivot(&records, &accessor, &config);
        let summary: Vec<(Option<&str>, bool)> = result
            .rows
            .iter()
            .map(|r| (r.group_key.as_deref(), r.is_total))
            .collect();
        assert_eq!(summary, vec![(Some("Total"), false), (None, true)]);

        let grand = result.grand_total_row().unwrap();
        assert_eq!(grand.label(), Some("Grand Total"));
        assert_eq!(values(grand), vec![300.0, 400.0, 700.0]);
        assert_eq!(values(&result.rows[0]), vec![300.0, 400.0, 700.0]);
        assert_eq!(result.statistics.grand_total, 700.0);

        config.show_grand_totals = false;
        let result = calculate_pivot(&records, &accessor, &config);
        assert_eq!(result.rows.len(), 1);
        assert!(result.grand_total_row().is_none());
    }

    #[test]
    fn test_multi_level_rows() {
        let records = create_test_records();
        let config = PivotConfiguration::new()
            .with_row(PivotField::row("Region"))
            .with_row(PivotField::row("Product"))
            .with_value(PivotField::value("Sales", AggregationType::Sum))
            .with_sub_totals(true);

        let result = calculate_pivot(&records, &accessor, &config);

        let summary: Vec<(usize, Option<&str>, bool)> = result
            .rows
            .iter()
            .map(|r| (r.level, r.label(), r.is_total))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, Some("North"), false),
                (1, Some("Apples"), false),
                (1, Some("Apples Total"), true),
                (1, Some("Oranges"), false),
                (1, Some("Oranges Total"), true),
                (0, Some("North Total"), true),
                (0, Some("South"), false),
                (1, Some("Apples"), false),
                (1, Some("Apples Total"), true),
                (1, Some("Oranges"), false),
                (1, Some("Oranges Total"), true),
                (0, Some("South Total"), true),
                (0, Some("Grand Total"), true),
            ]
        );

        // Child label sits in the second header slot
        let child = &result.rows[1];
        assert_eq!(child.cells[0].kind, PivotCellKind::Empty);
        assert_eq!(child.cells[1].formatted_value, "Apples");
        assert_eq!(
            child.group_path.as_slice(),
            &[FieldValue::text("North"), FieldValue::text("Apples")]
        );
        assert_eq!(result.statistics.grouped_rows, 8);
        assert_eq!(result.statistics.data_rows, 6);
    }

    #[test]
    fn test_hidden_items_are_excluded() {
        let records = create_test_records();
        let config = PivotConfiguration::new()
            .with_row(PivotField::row("Region"))
            .with_value(PivotField::value("Sales", AggregationType::Sum))
            .with_filter(PivotField::filter("Product").with_hidden_items(["Oranges"]));

        let result = calculate_pivot(&records, &accessor, &config);
        assert_eq!(values(result.row_by_label("North").unwrap()), vec![100.0, 100.0]);
        assert_eq!(result.statistics.grand_total, 300.0);
    }

    #[test]
    fn test_blank_text_rows_are_one_blank_group() {
        let mut records = create_test_records();
        records.push(sale("", "Apples", 5.0));
        records.push(sale("   ", "Oranges", 7.0));
        let mut config = create_test_config();
        config.column_fields.clear();

        let result = calculate_pivot(&records, &accessor, &config);
        let labels: Vec<Option<&str>> = result.rows.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec![Some("(blank)"), Some("North"), Some("South"), Some("Grand Total")]);

        let blank = result.row_by_label("(blank)").unwrap();
        assert_eq!(values(blank), vec![12.0, 12.0]);
        let detail = drill_down(blank, &blank.cells[1], &config, &records, &accessor, 10).unwrap();
        assert_eq!(detail.total_count, 2);

        config.row_fields[0].hidden_items = vec!["(blank)".to_string()];
        let result = calculate_pivot(&records, &accessor, &config);
        assert!(result.row_by_label("(blank)").is_none());
        assert_eq!(result.statistics.grand_total, 700.0);
    }

    #[test]
    fn test_everything_hidden_yields_empty_result() {
        let records = create_test_records();
        let mut config = create_test_config();
        config.row_fields[0].hidden_items = vec!["North".to_string(), "South".to_string()];

        assert!(calculate_pivot(&records, &accessor, &config).is_empty());
    }

    #[test]
    fn test_formatted_values_follow_field_format() {
        let records = create_test_records();
        let mut config = create_test_config();
        config.value_fields[0] = PivotField::value("Sales", AggregationType::Sum)
            .with_data_type(FieldDataType::Currency);

        let result = calculate_pivot(&records, &accessor, &config);
        let grand = result.grand_total_row().unwrap();
        let formatted: Vec<&str> = grand.value_cells().map(|c| c.formatted_value.as_str()).collect();
        assert_eq!(formatted, vec!["$300.00", "$400.00", "$700.00"]);
    }

    #[test]
    fn test_drill_down_returns_matching_records() {
        let records = create_test_records();
        let config = create_test_config();
        let result = calculate_pivot(&records, &accessor, &config);

        let south = result.row_by_label("South").unwrap();
        let oranges = south.value_cells().nth(1).unwrap();
        let detail = drill_down(south, oranges, &config, &records, &accessor, 100).unwrap();

        assert_eq!(detail.row_field, "Region");
        assert_eq!(detail.column_field, "Product");
        assert_eq!(detail.row_value.as_deref(), Some("South"));
        assert_eq!(detail.column_value.as_deref(), Some("Oranges"));
        assert_eq!(detail.cell_value, Some(250.0));
        assert_eq!(detail.detail_records, vec![sale("South", "Oranges", 250.0)]);
        assert!(!detail.is_truncated);
    }

    #[test]
    fn test_drill_down_truncates() {
        let records = create_test_records();
        let config = create_test_config();
        let result = calculate_pivot(&records, &accessor, &config);

        let north = result.row_by_label("North").unwrap();
        let grand_column = north.cells.last().unwrap();
        let detail = drill_down(north, grand_column, &config, &records, &accessor, 1).unwrap();

        assert_eq!(detail.total_count, 2);
        assert_eq!(detail.detail_records.len(), 1);
        assert!(detail.is_truncated);
        assert_eq!(detail.column_value, None);
    }

    #[test]
    fn test_drill_down_on_total_row_is_ignored() {
        let records = create_test_records();
        let config = create_test_config().with_sub_totals(true);
        let result = calculate_pivot(&records, &accessor, &config);

        for row in result.rows.iter().filter(|r| r.is_total) {
            let cell = row.value_cells().next().unwrap();
            assert!(drill_down(row, cell, &config, &records, &accessor, 10).is_none());
        }
    }
}
