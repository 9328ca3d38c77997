//! Typed getters and setters on [`JsonStruct`].
//!
//! The `try_*` getters tell a missing value apart from one of the wrong type.
//! The plain getters return `Option` and treat both the same way, and the
//! `*_with_default` getters fall back to the caller's default in either case.

use std::time::Duration;

use crate::document::JsonStruct;
use crate::duration::{
    format_duration,
    parse_duration,
};
use crate::error::AccessError;
use crate::json_value::{
    JsonValue,
    format_float,
};

fn coercion_error(dot_path: &str, expected: &'static str, found: &JsonValue) -> AccessError {
    AccessError::TypeCoercion {
        path: dot_path.to_owned(),
        expected,
        found: found.type_name(),
    }
}

impl JsonStruct {
    pub fn try_string(&self, dot_path: &str) -> Result<String, AccessError> {
        match self.find_element(dot_path)? {
            JsonValue::String(s) => Ok(s.clone()),
            JsonValue::Integer(n) => Ok(n.to_string()),
            JsonValue::Float(f) => Ok(format_float(*f)),
            other @ (JsonValue::Null
            | JsonValue::Boolean(_)
            | JsonValue::Array(_)
            | JsonValue::Object(_)) => Err(coercion_error(dot_path, "string", other)),
        }
    }

    pub fn string(&self, dot_path: &str) -> Option<String> {
        self.try_string(dot_path).ok()
    }

    pub fn string_with_default(&self, dot_path: &str, default_value: &str) -> String {
        self.string(dot_path).unwrap_or_else(|| default_value.to_owned())
    }

    /// Floats are truncated toward zero, saturating at the `i64` bounds.
    pub fn try_int(&self, dot_path: &str) -> Result<i64, AccessError> {
        match self.find_element(dot_path)? {
            JsonValue::Float(f) => Ok(*f as i64),
            JsonValue::Integer(n) => Ok(*n),
            other @ (JsonValue::Null
            | JsonValue::Boolean(_)
            | JsonValue::String(_)
            | JsonValue::Array(_)
            | JsonValue::Object(_)) => Err(coercion_error(dot_path, "int", other)),
        }
    }

    pub fn int(&self, dot_path: &str) -> Option<i64> {
        self.try_int(dot_path).ok()
    }

    pub fn int_with_default(&self, dot_path: &str, default_value: i64) -> i64 {
        self.int(dot_path).unwrap_or(default_value)
    }

    pub fn try_float(&self, dot_path: &str) -> Result<f64, AccessError> {
        match self.find_element(dot_path)? {
            JsonValue::Float(f) => Ok(*f),
            JsonValue::Integer(n) => Ok(*n as f64),
            other @ (JsonValue::Null
            | JsonValue::Boolean(_)
            | JsonValue::String(_)
            | JsonValue::Array(_)
            | JsonValue::Object(_)) => Err(coercion_error(dot_path, "float", other)),
        }
    }

    pub fn float(&self, dot_path: &str) -> Option<f64> {
        self.try_float(dot_path).ok()
    }

    pub fn float_with_default(&self, dot_path: &str, default_value: f64) -> f64 {
        self.float(dot_path).unwrap_or(default_value)
    }

    pub fn try_bool(&self, dot_path: &str) -> Result<bool, AccessError> {
        match self.find_element(dot_path)? {
            JsonValue::Boolean(b) => Ok(*b),
            other => Err(coercion_error(dot_path, "bool", other)),
        }
    }

    pub fn bool(&self, dot_path: &str) -> Option<bool> {
        self.try_bool(dot_path).ok()
    }

    pub fn bool_with_default(&self, dot_path: &str, default_value: bool) -> bool {
        self.bool(dot_path).unwrap_or(default_value)
    }

    /// The value at `dot_path` read as text (see [`try_string`](Self::try_string))
    /// and then as a duration literal such as `"1m30s"`.
    pub fn duration(&self, dot_path: &str) -> Result<Duration, AccessError> {
        let literal = self.try_string(dot_path)?;
        parse_duration(&literal).map_err(|source| AccessError::DurationParse {
            path: dot_path.to_owned(),
            source,
        })
    }

    /// Falls back to `default_value` only when the value is missing or not text;
    /// a malformed duration or path is still an error.
    pub fn duration_with_default(&self, dot_path: &str, default_value: Duration) -> Result<Duration, AccessError> {
        match self.duration(dot_path) {
            Err(e) if e.is_not_found() => Ok(default_value),
            result => result,
        }
    }

    pub fn try_list(&self, dot_path: &str) -> Result<&Vec<JsonValue>, AccessError> {
        match self.find_element(dot_path)? {
            JsonValue::Array(items) => Ok(items),
            other => Err(coercion_error(dot_path, "list", other)),
        }
    }

    pub fn list(&self, dot_path: &str) -> Option<&Vec<JsonValue>> {
        self.try_list(dot_path).ok()
    }

    pub fn list_with_default<'a>(&'a self, dot_path: &str, default_value: &'a Vec<JsonValue>) -> &'a Vec<JsonValue> {
        self.list(dot_path).unwrap_or(default_value)
    }

    pub fn set_string(&mut self, dot_path: &str, value: &str) -> Result<(), AccessError> {
        self.set(dot_path, value)
    }

    pub fn set_int(&mut self, dot_path: &str, value: i64) -> Result<(), AccessError> {
        self.set(dot_path, value)
    }

    pub fn set_float(&mut self, dot_path: &str, value: f64) -> Result<(), AccessError> {
        self.set(dot_path, value)
    }

    pub fn set_bool(&mut self, dot_path: &str, value: bool) -> Result<(), AccessError> {
        self.set(dot_path, value)
    }

    /// Stored as text in canonical form, e.g. `"32s"`.
    pub fn set_duration(&mut self, dot_path: &str, value: Duration) -> Result<(), AccessError> {
        self.set(dot_path, format_duration(value))
    }

    pub fn set_list(&mut self, dot_path: &str, value: Vec<JsonValue>) -> Result<(), AccessError> {
        self.set(dot_path, value)
    }
}
