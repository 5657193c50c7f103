//! Structured document conversions.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConversionError;
use crate::source::{parse_or, RawValue};

/// Parse a JSON object or array.
pub fn parse_document(text: &str) -> Result<Value, ConversionError> {
    match serde_json::from_str::<Value>(text)? {
        doc @ (Value::Object(_) | Value::Array(_)) => Ok(doc),
        _ => Err(ConversionError::unparseable(text, "document")),
    }
}

/// Convert to a structured document (a JSON object or array).
///
/// Scalars and malformed text yield `default`.
pub fn to_document<V: RawValue + ?Sized>(value: &V, default: Value) -> Value {
    parse_or(value, default, parse_document)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render the top-level fields of a record as a flat object of strings.
///
/// Fields that serialize to `null` are left out. Nested values are not
/// expanded; they appear as their JSON text.
pub fn to_flat_document<T: Serialize + ?Sized>(
    record: &T,
) -> Result<Map<String, Value>, ConversionError> {
    let fields = match serde_json::to_value(record)? {
        Value::Object(fields) => fields,
        other => return Err(ConversionError::NotARecord(type_name(&other))),
    };
    Ok(fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, Value::String(text))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_core::CellValue;
    use serde_json::json;

    #[test]
    fn test_document() {
        let doc = to_document(r#"{"key": "value", "count": 42}"#, Value::Null);
        assert_eq!(doc, json!({"key": "value", "count": 42}));
        assert_eq!(to_document("[1, 2]", Value::Null), json!([1, 2]));
    }

    #[test]
    fn test_document_fallbacks() {
        assert_eq!(to_document("<root/>", json!({})), json!({}));
        assert_eq!(to_document("42", json!({})), json!({}));
        assert_eq!(to_document("{\"unterminated\": ", Value::Null), Value::Null);
        assert_eq!(to_document(&CellValue::Null, json!([])), json!([]));
    }

    #[derive(Serialize)]
    struct Profile {
        name: String,
        age: Option<u32>,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_flat_document_skips_nulls_and_stringifies() {
        let profile = Profile {
            name: "Ada".to_string(),
            age: None,
            active: true,
            tags: vec!["x".to_string()],
        };
        let flat = to_flat_document(&profile).unwrap();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["name"], json!("Ada"));
        assert_eq!(flat["active"], json!("true"));
        assert_eq!(flat["tags"], json!("[\"x\"]"));
        assert!(!flat.contains_key("age"));
    }

    #[test]
    fn test_flat_document_requires_a_record() {
        let err = to_flat_document(&vec![1, 2]).unwrap_err();
        assert_eq!(err.to_string(), "Expected a record with named fields, got array");
    }
}
