//! FILENAME: tests/common/mod.rs
//! Fixtures for pivot engine integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Standard sales fixture used across pivot tests.
pub struct SalesFixture;

impl SalesFixture {
    /// (region, product, quarter, sales, quantity)
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("East", "Apples", "Q1", 100.0, 10.0),
            ("East", "Pears", "Q2", 50.0, 5.0),
            ("West", "Apples", "Q1", 120.0, 12.0),
            ("West", "Pears", "Q1", 80.0, 8.0),
            ("North", "Apples", "Q2", 40.0, 4.0),
            ("North", "Plums", "Q2", 40.0, 2.0),
        ]
    }

    /// The fixture as JSON objects, read through `NamedFields`.
    pub fn records() -> Vec<Value> {
        Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| {
                json!({
                    "Region": region,
                    "Product": product,
                    "Quarter": quarter,
                    "Sales": sales,
                    "Quantity": quantity,
                })
            })
            .collect()
    }
}

/// Builds `{ "Region": region, "Sales": sales }` records.
pub fn region_sales(rows: &[(&str, Value)]) -> Vec<Value> {
    rows.iter()
        .map(|(region, sales)| json!({ "Region": region, "Sales": sales }))
        .collect()
}
