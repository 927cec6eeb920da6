use std::collections::HashMap;

use crate::deals::model::{Deal, FieldValue};

/// Exact-match conjunction over deal fields, usually built from a query string.
///
/// Text fields compare verbatim. `id` and `capacity` compare numerically, so
/// `"075"`, `"75.0"` and `"7.5e1"` all match a capacity of 75. A key naming no deal field, or a value
/// that does not parse for a numeric field, matches nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealFilter {
    criteria: HashMap<String, String>,
}

impl DealFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        self.criteria.iter().all(|(field, expected)| {
            match deal.field(field) {
                Some(FieldValue::Text(actual)) => actual == expected.as_str(),
                Some(FieldValue::Integer(actual)) => {
                    expected.trim().parse::<f64>().is_ok_and(|n| n == actual as f64)
                }
                None => false,
            }
        })
    }
}

impl From<HashMap<String, String>> for DealFilter {
    fn from(criteria: HashMap<String, String>) -> Self {
        Self { criteria }
    }
}
