//! FILENAME: core/pivot-engine/src/value.rs
//! Field values - the normalized, hashable form of one record field.
//!
//! Records are opaque to the engine. Every read goes through a
//! `FieldAccessor` and comes back as a `FieldValue`, which can be:
//! - hashed and compared (grouping keys)
//! - coerced to a number (aggregation)
//! - rendered as a label (headers, hidden-item matching)

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Label used for the group of records whose grouping field is empty.
pub const BLANK_LABEL: &str = "(blank)";

/// Group values from the outermost field inwards.
pub type GroupPath = SmallVec<[FieldValue; 4]>;

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A normalized value read from a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Number(OrderedFloat),
    Text(String),
    Boolean(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(OrderedFloat(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(OrderedFloat(value as f64))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(OrderedFloat(value as f64))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}

impl FieldValue {
    pub fn number(value: f64) -> Self {
        FieldValue::Number(OrderedFloat(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// True for empty values and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The value as a grouping key: blank text groups with empty values.
    pub fn into_group_key(self) -> FieldValue {
        if self.is_blank() {
            FieldValue::Empty
        } else {
            self
        }
    }

    /// Coerces the value to a finite number.
    /// Text is parsed after trimming; anything else is not numeric.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => n.0,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Empty | FieldValue::Boolean(_) => return None,
        };
        if n.is_finite() {
            Some(n)
        } else {
            None
        }
    }

    /// Raw display string. Empty values render as an empty string.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => format_general(n.0),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(true) => "TRUE".to_string(),
            FieldValue::Boolean(false) => "FALSE".to_string(),
        }
    }

    /// Display string used for group headers (`(blank)` for blank values).
    pub fn label(&self) -> String {
        if self.is_blank() {
            BLANK_LABEL.to_string()
        } else {
            self.display()
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Empty => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
            FieldValue::Boolean(_) => 3,
        }
    }
}

/// Ordering used for group keys.
///
/// Empty sorts first. Otherwise keys compare by their display string,
/// case-insensitively; ties fall back to ordinal comparison, then to numeric
/// comparison, and then to the value kind so that distinct keys never compare
/// equal.
pub fn compare_group_keys(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Empty, FieldValue::Empty) => return Ordering::Equal,
        (FieldValue::Empty, _) => return Ordering::Less,
        (_, FieldValue::Empty) => return Ordering::Greater,
        _ => {}
    }

    let da = a.display();
    let db = b.display();
    da.to_lowercase()
        .cmp(&db.to_lowercase())
        .then_with(|| da.cmp(&db))
        .then_with(|| match (a, b) {
            // Display rounds to ten decimals
            (FieldValue::Number(x), FieldValue::Number(y)) => {
                x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        })
        .then_with(|| a.kind_rank().cmp(&b.kind_rank()))
}

/// General number format: integers without a decimal point, otherwise up to
/// ten decimals with trailing zeros trimmed.
pub(crate) fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

// ============================================================================
// ORDERED FLOAT
// ============================================================================

/// Wrapper around f64 that implements Eq and Hash for use as map keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // -0.0 and 0.0 compare equal, so they must hash equal
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

impl OrderedFloat {
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}
