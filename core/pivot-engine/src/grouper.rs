//! FILENAME: core/pivot-engine/src/grouper.rs
//! Grouping - partitions records by the distinct values of grouping fields.
//!
//! Groups hold indices into the caller's record slice, so partitioning is
//! O(n) in records and never clones a record. Group order is decided by the
//! field's sort order (ascending, case-insensitive by default).

use rustc_hash::FxHashMap;
use crate::accessor::FieldAccessor;
use crate::definition::{PivotField, SortOrder};
use crate::value::{compare_group_keys, FieldValue, GroupPath};

/// One partition of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// The grouping value shared by every member.
    pub key: FieldValue,
    /// Display label for the key (`(blank)` for empty values).
    pub label: String,
    /// Indices of the member records, in source order.
    pub members: Vec<usize>,
}

/// One distinct combination of column field values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub path: GroupPath,
    /// Component labels joined with `" / "`.
    pub label: String,
    pub members: Vec<usize>,
}

/// Separator between component labels of a multi-field column group.
pub const COLUMN_LABEL_SEPARATOR: &str = " / ";

/// Groups every record by `field`.
pub fn group<R, A>(records: &[R], accessor: &A, field: &PivotField) -> Vec<Group>
where
    A: FieldAccessor<R> + ?Sized,
{
    let all: Vec<usize> = (0..records.len()).collect();
    group_indices(records, &all, accessor, field)
}

/// Groups a subset of records (given by index) by `field`.
pub fn group_indices<R, A>(
    records: &[R],
    indices: &[usize],
    accessor: &A,
    field: &PivotField,
) -> Vec<Group>
where
    A: FieldAccessor<R> + ?Sized,
{
    let mut slots: FxHashMap<FieldValue, usize> = FxHashMap::default();
    let mut groups: Vec<Group> = Vec::new();

    for &idx in indices {
        let Some(record) = records.get(idx) else {
            continue;
        };
        let key = accessor.field(record, &field.name).into_group_key();
        match slots.get(&key) {
            Some(&slot) => groups[slot].members.push(idx),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push(Group {
                    label: key.label(),
                    key,
                    members: vec![idx],
                });
            }
        }
    }

    // `groups` is in first-appearance order here
    match field.sort_order {
        SortOrder::Ascending => groups.sort_by(|a, b| compare_group_keys(&a.key, &b.key)),
        SortOrder::Descending => groups.sort_by(|a, b| compare_group_keys(&b.key, &a.key)),
        SortOrder::None => {}
    }

    log::trace!(
        target: "PIVOT",
        "grouped {} records by '{}' into {} groups",
        indices.len(),
        field.name,
        groups.len()
    );

    groups
}

/// Groups records by the combination of all `fields`.
/// Only combinations present in the data are produced.
pub fn group_columns<R, A>(
    records: &[R],
    indices: &[usize],
    accessor: &A,
    fields: &[PivotField],
) -> Vec<ColumnGroup>
where
    A: FieldAccessor<R> + ?Sized,
{
    if fields.is_empty() {
        return Vec::new();
    }

    let mut slots: FxHashMap<GroupPath, usize> = FxHashMap::default();
    let mut groups: Vec<ColumnGroup> = Vec::new();

    for &idx in indices {
        let Some(record) = records.get(idx) else {
            continue;
        };
        let path: GroupPath = fields
            .iter()
            .map(|f| accessor.field(record, &f.name).into_group_key())
            .collect();
        match slots.get(&path) {
            Some(&slot) => groups[slot].members.push(idx),
            None => {
                slots.insert(path.clone(), groups.len());
                let label = path
                    .iter()
                    .map(FieldValue::label)
                    .collect::<Vec<_>>()
                    .join(COLUMN_LABEL_SEPARATOR);
                groups.push(ColumnGroup {
                    path,
                    label,
                    members: vec![idx],
                });
            }
        }
    }

    // Stable sort keeps first appearance for components left unsorted
    groups.sort_by(|a, b| {
        for (i, field) in fields.iter().enumerate() {
            let ord = match field.sort_order {
                SortOrder::Ascending => compare_group_keys(&a.path[i], &b.path[i]),
                SortOrder::Descending => compare_group_keys(&b.path[i], &a.path[i]),
                SortOrder::None => std::cmp::Ordering::Equal,
            };
            if ord != std::cmp::Ordering::Equal {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    });

    groups
}

/// True when `record` carries `path` for `fields`.
pub(crate) fn matches_path<R, A>(record: &R, accessor: &A, fields: &[PivotField], path: &[FieldValue]) -> bool
where
    A: FieldAccessor<R> + ?Sized,
{
    fields
        .iter()
        .zip(path.iter())
        .all(|(field, expected)| accessor.field(record, &field.name).into_group_key() == *expected)
}
