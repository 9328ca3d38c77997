use std::io::Read;
use std::ops::{
    Deref,
    DerefMut,
};
use std::str::FromStr;

use anyhow::{
    Result,
    bail,
};
use tracing::{
    debug,
    trace,
};

use crate::error::AccessError;
use crate::json_path::JsonPath;
use crate::json_tag::JsonTag;
use crate::json_value::{
    JsonMap,
    JsonValue,
};

/// A JSON object read and written through dot paths.
///
/// The document derefs to its top-level [`JsonMap`], so keys can also be used directly.
#[derive(Debug, Default, PartialEq)]
pub struct JsonStruct(JsonMap);

impl JsonStruct {
    pub fn new() -> Self {
        JsonStruct(JsonMap::new())
    }

    /// Reads a JSON object from `reader`.
    pub fn parse<R>(reader: R) -> Result<Self>
        where R: Read
    {
        let result = JsonTag::parse(reader).and_then(|tags| JsonValue::parse(&tags));
        match result {
            Ok(JsonValue::Object(map)) => {
                trace!(keys = map.len(), "parsed json document");
                Ok(JsonStruct(map))
            }
            Ok(other) => {
                debug!(found = other.type_name(), "json document is not an object");
                bail!("json document must be an object, found {}", other.type_name())
            }
            Err(e) => {
                debug!(error = %e, "failed to parse json document");
                Err(e)
            }
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        JsonStruct::parse(json.as_bytes())
    }

    pub fn to_json(&self) -> String {
        let mut out = String::new();
        JsonValue::write_object(&self.0, &mut out, None, 0);
        out
    }

    pub fn to_json_pretty(&self) -> String {
        let mut out = String::new();
        JsonValue::write_object(&self.0, &mut out, Some(2), 0);
        out
    }

    pub fn into_inner(self) -> JsonMap {
        self.0
    }

    /// The value at `dot_path`, untyped.
    ///
    /// Every key before the last must name an object; a missing key or a
    /// non-object along the way is [`AccessError::NotFound`].
    pub fn find_element(&self, dot_path: &str) -> Result<&JsonValue, AccessError> {
        let path = JsonPath::parse(dot_path)?;
        let not_found = || AccessError::NotFound { path: dot_path.to_owned() };

        let mut parent = &self.0;
        for key in path.parent_keys() {
            parent = parent.get(key).and_then(JsonValue::as_object).ok_or_else(not_found)?;
        }

        parent.get(path.last_key()).ok_or_else(not_found)
    }

    /// Like [`find_element`](Self::find_element), but mutations land in this document.
    pub fn find_element_mut(&mut self, dot_path: &str) -> Result<&mut JsonValue, AccessError> {
        let path = JsonPath::parse(dot_path)?;
        let not_found = || AccessError::NotFound { path: dot_path.to_owned() };

        let mut parent = &mut self.0;
        for key in path.parent_keys() {
            parent = parent.get_mut(key).and_then(JsonValue::as_object_mut).ok_or_else(not_found)?;
        }

        parent.get_mut(path.last_key()).ok_or_else(not_found)
    }

    /// The object at `dot_path`, borrowed mutably out of this document.
    pub fn object_mut(&mut self, dot_path: &str) -> Option<&mut JsonMap> {
        self.find_element_mut(dot_path).ok().and_then(JsonValue::as_object_mut)
    }

    pub fn contains(&self, dot_path: &str) -> bool {
        self.find_element(dot_path).is_ok()
    }

    /// The object that holds the last key of `dot_path`, and that key.
    ///
    /// Missing objects along the way are created. A value that is in the way
    /// but is not an object is replaced by an empty object.
    pub fn find_parent(&mut self, dot_path: &str) -> Result<(&mut JsonMap, String), AccessError> {
        let path = JsonPath::parse(dot_path)?;

        let mut parent = &mut self.0;
        for key in path.parent_keys() {
            let child = parent
                .entry(key.clone())
                .or_insert_with(|| JsonValue::Object(JsonMap::new()));
            if !matches!(child, JsonValue::Object(_)) {
                debug!(path = dot_path, key = key.as_str(), found = child.type_name(), "replacing non-object value with an object");
                *child = JsonValue::Object(JsonMap::new());
            }
            parent = child
                .as_object_mut()
                .ok_or_else(|| AccessError::NotFound { path: dot_path.to_owned() })?;
        }

        Ok((parent, path.last_key().to_owned()))
    }

    /// Stores `value` at `dot_path`, creating intermediate objects as needed.
    pub fn set<V>(&mut self, dot_path: &str, value: V) -> Result<(), AccessError>
        where V: Into<JsonValue>
    {
        let (parent, last_key) = self.find_parent(dot_path)?;
        parent.insert(last_key, value.into());
        Ok(())
    }

    /// Removes and returns the value at `dot_path`. Never creates objects.
    pub fn remove(&mut self, dot_path: &str) -> Result<Option<JsonValue>, AccessError> {
        let path = JsonPath::parse(dot_path)?;

        let mut parent = &mut self.0;
        for key in path.parent_keys() {
            match parent.get_mut(key).and_then(JsonValue::as_object_mut) {
                Some(child) => parent = child,
                None => return Ok(None),
            }
        }

        Ok(parent.remove(path.last_key()))
    }

    /// A copy sharing no objects, arrays or strings with this document.
    pub fn deep_copy(&self) -> JsonStruct {
        trace!(keys = self.0.len(), "deep copying json document");
        JsonStruct(deep_copy_map(&self.0))
    }
}

fn deep_copy_map(map: &JsonMap) -> JsonMap {
    map.iter()
        .map(|(key, value)| (key.clone(), deep_copy_value(value)))
        .collect()
}

fn deep_copy_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(deep_copy_map(map)),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(deep_copy_value).collect()),
        JsonValue::String(s) => JsonValue::String(s.clone()),
        JsonValue::Null => JsonValue::Null,
        JsonValue::Boolean(b) => JsonValue::Boolean(*b),
        JsonValue::Integer(n) => JsonValue::Integer(*n),
        JsonValue::Float(f) => JsonValue::Float(*f),
    }
}

impl Clone for JsonStruct {
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

impl Deref for JsonStruct {
    type Target = JsonMap;

    fn deref(&self) -> &JsonMap {
        &self.0
    }
}

impl DerefMut for JsonStruct {
    fn deref_mut(&mut self) -> &mut JsonMap {
        &mut self.0
    }
}

impl From<JsonMap> for JsonStruct {
    fn from(map: JsonMap) -> Self {
        JsonStruct(map)
    }
}

impl From<JsonStruct> for JsonValue {
    fn from(document: JsonStruct) -> Self {
        JsonValue::Object(document.0)
    }
}

impl FromStr for JsonStruct {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        JsonStruct::from_json_str(s)
    }
}
