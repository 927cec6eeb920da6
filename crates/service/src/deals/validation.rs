use serde_json::{Map, Value};

use crate::deals::model::{DealInput, REQUIRED_FIELDS};
use crate::errors::ServiceError;

/// Message shared by every payload rejection.
pub const INVALID_PAYLOAD: &str = "Empty or missing properties and/or values";

/// Presence check: all seven deal fields exist and carry content.
///
/// Strings must be non-empty after trimming; JSON numbers always count.
/// `null`, booleans, arrays and objects do not. Extra keys are ignored.
pub fn validate(payload: &Map<String, Value>) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| payload.get(*field).is_some_and(has_content))
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(_) => true,
        _ => false,
    }
}

/// Coerce a capacity value into an integer.
///
/// Numbers are truncated toward zero. Strings are read up to the first
/// non-digit after an optional sign, so `"150MW"` is 150 and `"12.7"` is 12.
pub fn parse_capacity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn text(payload: &Map<String, Value>, field: &str) -> String {
    match payload.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

impl DealInput {
    /// Validate a raw payload and build the typed input from it.
    pub fn try_from_payload(payload: &Map<String, Value>) -> Result<Self, ServiceError> {
        if !validate(payload) {
            return Err(ServiceError::Validation(INVALID_PAYLOAD.into()));
        }
        let capacity = payload
            .get("capacity")
            .and_then(parse_capacity)
            .ok_or_else(|| ServiceError::Validation(INVALID_PAYLOAD.into()))?;
        Ok(Self {
            seller: text(payload, "seller"),
            buyer: text(payload, "buyer"),
            country: text(payload, "country"),
            technology: text(payload, "technology"),
            capacity,
            term: text(payload, "term"),
            date: text(payload, "date"),
        })
    }
}
