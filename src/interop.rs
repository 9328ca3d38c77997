//! Conversions to and from `serde_json::Value`.

use anyhow::{
    Result,
    bail,
};

use crate::document::JsonStruct;
use crate::json_value::{
    JsonMap,
    JsonValue,
};

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => JsonValue::Integer(i),
                None => n.as_f64().map_or(JsonValue::Null, JsonValue::Float),
            },
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            serde_json::Value::Object(map) => JsonValue::Object(
                map.into_iter().map(|(key, value)| (key, JsonValue::from(value))).collect::<JsonMap>(),
            ),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Boolean(b) => serde_json::Value::Bool(b),
            JsonValue::Integer(n) => serde_json::Value::from(n),
            JsonValue::Float(f) => serde_json::Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number),
            JsonValue::String(s) => serde_json::Value::String(s),
            JsonValue::Array(items) => serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect()),
            JsonValue::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(key, value)| (key, serde_json::Value::from(value))).collect(),
            ),
        }
    }
}

impl TryFrom<serde_json::Value> for JsonStruct {
    type Error = anyhow::Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match JsonValue::from(value) {
            JsonValue::Object(map) => Ok(JsonStruct::from(map)),
            other => bail!("json document must be an object, found {}", other.type_name()),
        }
    }
}

impl From<JsonStruct> for serde_json::Value {
    fn from(document: JsonStruct) -> Self {
        serde_json::Value::from(JsonValue::Object(document.into_inner()))
    }
}

#[cfg(test)]
mod interop_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_serde_value() -> Result<()> {
        let doc = JsonStruct::try_from(json!({"a": {"n": 5, "f": 0.5, "l": [true, null]}}))?;
        assert_eq!(doc.int(".a.n"), Some(5));
        assert_eq!(doc.find_element(".a.n")?, &JsonValue::Integer(5));
        assert_eq!(doc.float(".a.f"), Some(0.5));
        assert_eq!(doc.list(".a.l"), Some(&vec![JsonValue::Boolean(true), JsonValue::Null]));
        assert!(JsonStruct::try_from(json!([1])).is_err());
        Ok(())
    }

    #[test]
    fn test_into_serde_value() -> Result<()> {
        let mut doc = JsonStruct::new();
        doc.set_string(".a.b", "x")?;
        doc.set_int(".a.n", -3)?;
        doc.set_float(".nan", f64::NAN)?;
        assert_eq!(serde_json::Value::from(doc), json!({"a": {"b": "x", "n": -3}, "nan": null}));
        Ok(())
    }
}
