//! FILENAME: core/pivot-engine/src/aggregate.rs
//! Aggregation - reduces a set of records to one number per value field.
//!
//! Values are coerced to numbers first; empty, non-numeric and unparsable
//! values are dropped (never counted as zero). An empty numeric set
//! aggregates to 0 for every function.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use crate::accessor::FieldAccessor;
use crate::definition::{AggregationType, PivotField};
use crate::value::OrderedFloat;

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Accumulator for computing aggregates incrementally.
/// Stores the state needed by every aggregation type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateAccumulator {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default)]
    distinct: FxHashSet<OrderedFloat>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a numeric value to the accumulator.
    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        // 0.0 and -0.0 are one distinct value
        let key = if value == 0.0 { 0.0 } else { value };
        self.distinct.insert(OrderedFloat(key));
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Computes the final aggregate value.
    pub fn compute(&self, aggregation: AggregationType) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        match aggregation {
            AggregationType::Sum => self.sum,
            AggregationType::Average => self.sum / (self.count as f64),
            AggregationType::Count => self.count as f64,
            AggregationType::Min => self.min.unwrap_or(0.0),
            AggregationType::Max => self.max.unwrap_or(0.0),
            AggregationType::DistinctCount => self.distinct.len() as f64,
        }
    }

    /// Merges another accumulator into this one.
    pub fn merge(&mut self, other: &AggregateAccumulator) {
        if other.count == 0 {
            return;
        }
        self.sum += other.sum;
        self.count += other.count;
        if let Some(other_min) = other.min {
            self.min = Some(self.min.map_or(other_min, |m| m.min(other_min)));
        }
        if let Some(other_max) = other.max {
            self.max = Some(self.max.map_or(other_max, |m| m.max(other_max)));
        }
        self.distinct.extend(other.distinct.iter().copied());
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Aggregates `field` over every record in `records`.
pub fn aggregate<R, A>(records: &[R], accessor: &A, field: &PivotField) -> f64
where
    A: FieldAccessor<R> + ?Sized,
{
    aggregate_iter(records.iter(), accessor, field)
}

/// Aggregates `field` over a selection of records.
pub(crate) fn aggregate_iter<'r, R, A, I>(records: I, accessor: &A, field: &PivotField) -> f64
where
    R: 'r,
    A: FieldAccessor<R> + ?Sized,
    I: IntoIterator<Item = &'r R>,
{
    let mut acc = AggregateAccumulator::new();
    for record in records {
        if let Some(n) = accessor.field(record, &field.name).as_number() {
            acc.add_number(n);
        }
    }
    acc.compute(field.aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn sales(values: &[FieldValue]) -> Vec<FieldValue> {
        values.to_vec()
    }

    fn by_value(record: &FieldValue, _name: &str) -> FieldValue {
        record.clone()
    }

    fn field(aggregation: AggregationType) -> PivotField {
        PivotField::value("Sales", aggregation)
    }

    #[test]
    fn test_each_aggregation() {
        let records = sales(&[
            FieldValue::number(10.0),
            FieldValue::number(30.0),
            FieldValue::number(20.0),
            FieldValue::number(20.0),
        ]);

        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Sum)), 80.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Average)), 20.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Count)), 4.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Min)), 10.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Max)), 30.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::DistinctCount)), 3.0);
    }

    #[test]
    fn test_non_numeric_values_are_dropped() {
        let records = sales(&[
            FieldValue::number(100.0),
            FieldValue::text("n/a"),
            FieldValue::Empty,
            FieldValue::Boolean(true),
        ]);

        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Sum)), 100.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Average)), 100.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Count)), 1.0);
    }

    #[test]
    fn test_numeric_text_is_parsed() {
        let records = sales(&[FieldValue::text("12.5"), FieldValue::number(7.5)]);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Sum)), 20.0);
    }

    #[test]
    fn test_empty_numeric_set_yields_zero() {
        let records = sales(&[FieldValue::text("x"), FieldValue::Empty]);
        for aggregation in [
            AggregationType::Sum,
            AggregationType::Average,
            AggregationType::Count,
            AggregationType::Min,
            AggregationType::Max,
            AggregationType::DistinctCount,
        ] {
            assert_eq!(aggregate(&records, &by_value, &field(aggregation)), 0.0);
        }
        let none: Vec<FieldValue> = Vec::new();
        assert_eq!(aggregate(&none, &by_value, &field(AggregationType::Max)), 0.0);
    }

    #[test]
    fn test_min_max_with_negatives() {
        let records = sales(&[FieldValue::number(-5.0), FieldValue::number(-1.0)]);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Min)), -5.0);
        assert_eq!(aggregate(&records, &by_value, &field(AggregationType::Max)), -1.0);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let mut left = AggregateAccumulator::new();
        let mut right = AggregateAccumulator::new();
        let mut all = AggregateAccumulator::new();
        for v in [1.0, 2.0, 2.0] {
            left.add_number(v);
            all.add_number(v);
        }
        for v in [2.0, 9.0] {
            right.add_number(v);
            all.add_number(v);
        }
        left.merge(&right);

        for aggregation in [
            AggregationType::Sum,
            AggregationType::Average,
            AggregationType::Count,
            AggregationType::Min,
            AggregationType::Max,
            AggregationType::DistinctCount,
        ] {
            assert_eq!(left.compute(aggregation), all.compute(aggregation));
        }
    }

    #[test]
    fn test_accumulator_survives_json() {
        let mut acc = AggregateAccumulator::new();
        for v in [10.0, 10.0, 20.0] {
            acc.add_number(v);
        }

        let json = serde_json::to_string(&acc).unwrap();
        let restored: AggregateAccumulator = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.compute(AggregationType::DistinctCount), 2.0);
        assert_eq!(restored.compute(AggregationType::Sum), 40.0);
        assert_eq!(restored.compute(AggregationType::Max), 20.0);
    }
}
