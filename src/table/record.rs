//! Row abstraction
//!
//! The engines only need three things from a row: a stable identifier,
//! string access to declared field keys, and a way to build an empty row
//! for filter and new-record drafts. [`Record`] is the JSON-backed row the
//! backend returns.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// A keyed record with a unique, stable identifier
pub trait Row: Clone {
    fn id(&self) -> &str;

    /// Display value of a field, `None` when absent or null
    fn field(&self, key: &str) -> Option<Cow<'_, str>>;

    fn set_field(&mut self, key: &str, value: String);

    /// Row with an empty identifier and every key mapped to `""`
    fn blank<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self;

    /// Field value or `""`
    fn text(&self, key: &str) -> Cow<'_, str> {
        self.field(key).unwrap_or(Cow::Borrowed(""))
    }
}

/// Row backed by a JSON object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    id: String,
    values: Map<String, Value>,
}

impl Record {
    /// Build from a JSON object, reading the identifier from `id_key`.
    ///
    /// Returns `None` for non-objects and objects without a usable id.
    pub fn from_json(value: Value, id_key: &str) -> Option<Self> {
        let Value::Object(values) = value else {
            return None;
        };
        let id = match values.get(id_key)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(Self { id, values })
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl Row for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.values.get(key)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Null => None,
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    fn set_field(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), Value::String(value));
    }

    fn blank<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let values = keys
            .into_iter()
            .map(|k| (k.to_string(), Value::String(String::new())))
            .collect();
        Self {
            id: String::new(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_id_and_fields() {
        let record = Record::from_json(
            json!({ "_id": "b1", "name": "Acme", "price": 12, "recommend": true, "gone": null }),
            "_id",
        )
        .unwrap();
        assert_eq!(record.id(), "b1");
        assert_eq!(record.text("name"), "Acme");
        assert_eq!(record.text("price"), "12");
        assert_eq!(record.text("recommend"), "true");
        assert_eq!(record.field("gone"), None);
        assert_eq!(record.text("missing"), "");
    }

    #[test]
    fn rejects_rows_without_id() {
        assert!(Record::from_json(json!({ "name": "x" }), "_id").is_none());
        assert!(Record::from_json(json!([1, 2]), "_id").is_none());
        assert!(Record::from_json(json!({ "id": 7 }), "id").is_some());
    }

    #[test]
    fn blank_maps_every_key_to_empty() {
        let record = Record::blank(["name", "country"]);
        assert_eq!(record.id(), "");
        assert_eq!(record.to_json(), json!({ "name": "", "country": "" }));
    }

    #[test]
    fn clones_do_not_alias() {
        let original = Record::from_json(json!({ "_id": "1", "name": "a" }), "_id").unwrap();
        let mut copy = original.clone();
        copy.set_field("name", "b".into());
        assert_eq!(original.text("name"), "a");
        assert_eq!(copy.text("name"), "b");
    }
}
