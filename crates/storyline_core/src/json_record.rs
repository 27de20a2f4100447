//! Record backed by a parsed JSON object.

use crate::{DecodeResult, Record};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use storyline_error::{DecodeError, FieldType};
use tracing::trace;

/// A [`Record`] over one JSON object.
///
/// This is the shape aggregated child rows take once a `json_agg` column has
/// been parsed. Null members read as absent, exactly like missing ones.
///
/// # Examples
///
/// ```
/// use storyline_core::{JsonRecord, Record};
/// use serde_json::json;
///
/// let record = JsonRecord::try_from(json!({"id": 10, "title": null})).unwrap();
/// assert_eq!(record.int("id").unwrap(), Some(10));
/// assert_eq!(record.string("title").unwrap(), None);
/// assert_eq!(record.string("text").unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonRecord {
    object: Map<String, Value>,
}

impl JsonRecord {
    /// Wraps an already-parsed JSON object.
    pub fn new(object: Map<String, Value>) -> Self {
        Self { object }
    }

    /// Keeps the object elements of `values` as records, in order.
    ///
    /// Anything that is not a JSON object is dropped without error.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Vec<Self> {
        let mut dropped = 0usize;
        let records: Vec<Self> = values
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(object) => Some(Self::new(object)),
                _ => {
                    dropped += 1;
                    None
                }
            })
            .collect();

        if dropped > 0 {
            trace!(dropped, kept = records.len(), "Dropped non-object array elements");
        }
        records
    }

    /// Parses raw bytes holding a JSON array into child records.
    ///
    /// This is the step a row-backed record takes to hand its aggregated
    /// column over to JSON-backed records.
    ///
    /// # Errors
    ///
    /// - `MalformedSource` when `bytes` is not JSON at all
    /// - `ParseFailure` when it is JSON but not an array
    pub fn parse_array(field: &str, bytes: &[u8]) -> DecodeResult<Vec<Self>> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| DecodeError::malformed(field, e))?;

        match value {
            Value::Array(values) => Ok(Self::from_values(values)),
            other => Err(DecodeError::parse_failure(
                field,
                format!("expected a JSON array, found {}", json_kind(&other)),
            )),
        }
    }

    /// Non-null value stored under `key`.
    fn value(&self, key: &str) -> Option<&Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }
}

/// Fails with the original value when it is not a JSON object.
impl TryFrom<Value> for JsonRecord {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Ok(Self::new(object)),
            other => Err(other),
        }
    }
}

impl Record for JsonRecord {
    fn string(&self, key: &str) -> DecodeResult<Option<String>> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(DecodeError::type_mismatch(key, FieldType::String)),
        }
    }

    fn int(&self, key: &str) -> DecodeResult<Option<i32>> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(Some)
                .ok_or_else(|| DecodeError::type_mismatch(key, FieldType::Int)),
            Some(_) => Err(DecodeError::type_mismatch(key, FieldType::Int)),
        }
    }

    fn timestamp(&self, key: &str) -> DecodeResult<Option<DateTime<FixedOffset>>> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(Some)
                .map_err(|e| DecodeError::parse_failure(key, e)),
            Some(_) => Err(DecodeError::type_mismatch(key, FieldType::Timestamp)),
        }
    }

    fn nested_records(&self, key: &str) -> DecodeResult<Option<Vec<JsonRecord>>> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::Array(values)) => Ok(Some(Self::from_values(values.iter().cloned()))),
            Some(_) => Err(DecodeError::type_mismatch(key, FieldType::RecordList)),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storyline_error::DecodeErrorKind;

    fn record(value: Value) -> JsonRecord {
        JsonRecord::try_from(value).expect("test value is an object")
    }

    #[test]
    fn int_rejects_values_outside_i32() {
        let r = record(json!({"big": 3_000_000_000i64, "frac": 1.5, "text": "7"}));

        for key in ["big", "frac", "text"] {
            let err = r.int(key).unwrap_err();
            assert_eq!(
                err.kind,
                DecodeErrorKind::TypeMismatch {
                    field: key.to_string(),
                    expected: FieldType::Int,
                }
            );
        }
    }

    #[test]
    fn string_rejects_non_string_values() {
        let r = record(json!({"title": 42}));
        let err = r.string("title").unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn timestamp_keeps_offset() {
        let r = record(json!({"created_at": "2023-05-01T09:30:00+02:00"}));
        let ts = r.timestamp("created_at").unwrap().unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(ts.to_rfc3339(), "2023-05-01T09:30:00+02:00");
    }

    #[test]
    fn timestamp_accepts_postgres_json_output() {
        let r = record(json!({"created_at": "2023-05-01T00:00:00.123456+00:00"}));
        assert!(r.timestamp("created_at").unwrap().is_some());
    }

    #[test]
    fn timestamp_without_offset_is_parse_failure() {
        let r = record(json!({"created_at": "2023-05-01 00:00:00"}));
        let err = r.timestamp("created_at").unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::ParseFailure { ref field, .. } if field == "created_at"
        ));
    }

    #[test]
    fn nested_records_drop_non_objects() {
        let r = record(json!({"chapters": [{"id": 1}, 2, "x", null, [], {"id": 3}]}));
        let children = r.nested_records("chapters").unwrap().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].int("id").unwrap(), Some(3));
    }

    #[test]
    fn nested_records_require_an_array() {
        let r = record(json!({"chapters": {"id": 1}}));
        let err = r.nested_records("chapters").unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::TypeMismatch {
                field: "chapters".to_string(),
                expected: FieldType::RecordList,
            }
        );
    }

    #[test]
    fn parse_array_separates_malformed_from_wrong_shape() {
        let err = JsonRecord::parse_array("chapters", b"[{").unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::MalformedSource { .. }));

        let err = JsonRecord::parse_array("chapters", b"{\"id\": 1}").unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::ParseFailure { .. }));
        assert!(err.to_string().contains("found an object"));

        let empty = JsonRecord::parse_array("chapters", b"[]").unwrap();
        assert!(empty.is_empty());
    }
}
