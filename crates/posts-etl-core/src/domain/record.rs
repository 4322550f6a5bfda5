use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw ingested item - one JSON object exactly as the source returned it.
///
/// Fields beyond `userId`, `id`, `title` and `body` are kept but never read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// Ordered records as received from a source.
pub type RecordSet = Vec<Record>;

impl Record {
    /// The `userId` field, when it holds an integral number.
    pub fn user_id(&self) -> Option<i64> {
        self.0.get("userId").and_then(integral)
    }

    /// The `id` field, when it holds an integral number.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(integral)
    }

    /// A field read as text.
    ///
    /// Strings are returned as-is and other scalars as their JSON text.
    /// `null`, a missing field, arrays and objects all read as `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

// Sources that round-trip through floating point columns send `1.0` for `1`.
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_integral_fields() {
        let r = record(json!({"userId": 1.0, "id": 7}));
        assert_eq!(r.user_id(), Some(1));
        assert_eq!(r.id(), Some(7));

        let r = record(json!({"userId": "1", "id": 1.5}));
        assert_eq!(r.user_id(), None);
        assert_eq!(r.id(), None);
    }

    #[test]
    fn test_text_field_coercion() {
        let r = record(json!({
            "title": "Hello",
            "body": null,
            "tags": ["a"],
            "views": 42,
        }));

        assert_eq!(r.text("title").as_deref(), Some("Hello"));
        assert_eq!(r.text("body"), None);
        assert_eq!(r.text("tags"), None);
        assert_eq!(r.text("views").as_deref(), Some("42"));
        assert_eq!(r.text("missing"), None);
    }

    #[test]
    fn test_record_set_rejects_non_objects() {
        let parsed: Result<RecordSet, _> = serde_json::from_value(json!([{"id": 1}, 2]));
        assert!(parsed.is_err());
    }
}
