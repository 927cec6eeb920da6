use serde::{Deserialize, Serialize};

/// Fields every create/update payload must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "seller",
    "buyer",
    "country",
    "technology",
    "capacity",
    "term",
    "date",
];

/// A single power-purchase agreement.
/// - id: assigned by the store, unique, starts at 1
/// - capacity: integer, coerced from the payload
/// - date: ISO-like string, kept verbatim
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deal {
    pub id: u64,
    pub seller: String,
    pub buyer: String,
    pub country: String,
    pub technology: String,
    pub capacity: i64,
    pub term: String,
    pub date: String,
}

/// Create/update input: every field except `id`, which the store owns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealInput {
    pub seller: String,
    pub buyer: String,
    pub country: String,
    pub technology: String,
    pub capacity: i64,
    pub term: String,
    pub date: String,
}

/// Value of a named field, used by the list filter.
pub(crate) enum FieldValue<'a> {
    Text(&'a str),
    Integer(i128),
}

impl Deal {
    pub fn from_input(id: u64, input: DealInput) -> Self {
        Self {
            id,
            seller: input.seller,
            buyer: input.buyer,
            country: input.country,
            technology: input.technology,
            capacity: input.capacity,
            term: input.term,
            date: input.date,
        }
    }

    pub(crate) fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Integer(i128::from(self.id)),
            "capacity" => FieldValue::Integer(i128::from(self.capacity)),
            "seller" => FieldValue::Text(&self.seller),
            "buyer" => FieldValue::Text(&self.buyer),
            "country" => FieldValue::Text(&self.country),
            "technology" => FieldValue::Text(&self.technology),
            "term" => FieldValue::Text(&self.term),
            "date" => FieldValue::Text(&self.date),
            _ => return None,
        };
        Some(value)
    }
}
