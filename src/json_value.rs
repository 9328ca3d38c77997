use std::collections::BTreeMap;
use std::fmt;

use anyhow::{
    Result,
    Context,
    bail,
};

use crate::json_tag::*;

/// Deepest nesting of arrays and objects the reader accepts.
pub const MAX_DEPTH: usize = 128;

pub type JsonMap = BTreeMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonMap),
}

impl JsonValue {
    /// Builds exactly one value from a tag stream.
    pub fn parse(json_tags: &[JsonTag]) -> Result<JsonValue> {
        let mut i = 0;
        let value = JsonValue::parse_value(json_tags, &mut i, 0)?;
        if i < json_tags.len() {
            bail!("unexpected trailing data after json value: {}", JsonValue::describe(&json_tags[i..]));
        }

        Ok(value)
    }

    fn describe(json_tags: &[JsonTag]) -> String {
        json_tags.iter().take(8).map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
    }

    fn next_tag<'a>(json_tags: &'a [JsonTag], i: &mut usize) -> Result<&'a JsonTag> {
        match json_tags.get(*i) {
            None => bail!("unexpected end of json input"),
            Some(tag) => {
                *i += 1;
                Ok(tag)
            }
        }
    }

    fn parse_value(json_tags: &[JsonTag], i: &mut usize, depth: usize) -> Result<JsonValue> {
        match JsonValue::next_tag(json_tags, i)? {
            JsonTag::Literal(literal) => JsonValue::parse_plain(literal),
            JsonTag::LeftCurly => JsonValue::parse_object(json_tags, i, depth + 1),
            JsonTag::LeftSquare => JsonValue::parse_array(json_tags, i, depth + 1),
            tag => bail!("unexpected '{}' where a json value was expected", tag),
        }
    }

    fn parse_object(json_tags: &[JsonTag], i: &mut usize, depth: usize) -> Result<JsonValue> {
        if depth > MAX_DEPTH {
            bail!("json nesting exceeds maximum depth of {}", MAX_DEPTH);
        }

        let mut map = JsonMap::new();
        if json_tags.get(*i) == Some(&JsonTag::RightCurly) {
            *i += 1;
            return Ok(JsonValue::Object(map));
        }

        loop {
            let name = match JsonValue::next_tag(json_tags, i)? {
                JsonTag::Literal(literal) if literal.starts_with('"') => JsonValue::unquote(literal)?,
                tag => bail!("expected object member name, found '{}'", tag),
            };
            match JsonValue::next_tag(json_tags, i)? {
                JsonTag::Colon => (),
                tag => bail!("expected ':' after member name {:?}, found '{}'", name, tag),
            }
            let value = JsonValue::parse_value(json_tags, i, depth)
                .with_context(|| format!("in object member {:?}", name))?;
            map.insert(name, value);

            match JsonValue::next_tag(json_tags, i)? {
                JsonTag::Comma => continue,
                JsonTag::RightCurly => break,
                tag => bail!("expected ',' or '}}' in object, found '{}'", tag),
            }
        }

        Ok(JsonValue::Object(map))
    }

    fn parse_array(json_tags: &[JsonTag], i: &mut usize, depth: usize) -> Result<JsonValue> {
        if depth > MAX_DEPTH {
            bail!("json nesting exceeds maximum depth of {}", MAX_DEPTH);
        }

        let mut items = Vec::new();
        if json_tags.get(*i) == Some(&JsonTag::RightSquare) {
            *i += 1;
            return Ok(JsonValue::Array(items));
        }

        loop {
            items.push(JsonValue::parse_value(json_tags, i, depth)?);
            match JsonValue::next_tag(json_tags, i)? {
                JsonTag::Comma => continue,
                JsonTag::RightSquare => break,
                tag => bail!("expected ',' or ']' in array, found '{}'", tag),
            }
        }

        Ok(JsonValue::Array(items))
    }

    fn parse_plain(plain_literal: &str) -> Result<JsonValue> {
        match plain_literal {
            "null" => Ok(JsonValue::Null),
            "true" => Ok(JsonValue::Boolean(true)),
            "false" => Ok(JsonValue::Boolean(false)),
            s if s.starts_with('"') => Ok(JsonValue::String(JsonValue::unquote(s)?)),
            s if is_json_number(s) => {
                // Numbers are always read as floats; integers only come from setters.
                let number = s.parse::<f64>().with_context(|| format!("invalid number {}", s))?;
                Ok(JsonValue::Float(number))
            }
            s => bail!("invalid json literal: {}", s),
        }
    }

    fn unquote(quoted: &str) -> Result<String> {
        let inner = quoted.strip_prefix('"').and_then(|s| s.strip_suffix('"'));
        let inner = match inner {
            Some(inner) if quoted.len() >= 2 => inner,
            _ => bail!("malformed string literal: {}", quoted),
        };

        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = match chars.next() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => JsonValue::read_unicode_escape(&mut chars)?,
                        Some(other) => bail!("invalid escape '\\{}' in {}", other, quoted),
                        None => bail!("dangling escape in {}", quoted),
                    };
                    out.push(escaped);
                }
                c if (c as u32) < 0x20 => bail!("unescaped control character in {}", quoted),
                c => out.push(c),
            }
        }

        Ok(out)
    }

    fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u32> {
        let hex: String = chars.by_ref().take(4).collect();
        if hex.chars().count() != 4 {
            bail!("truncated \\u escape: {}", hex);
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid \\u escape: {}", hex);
        }
        u32::from_str_radix(&hex, 16).with_context(|| format!("invalid \\u escape: {}", hex))
    }

    fn read_unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char> {
        let high = JsonValue::read_hex4(chars)?;
        let code = if (0xD800..0xDC00).contains(&high) {
            if chars.next() != Some('\\') || chars.next() != Some('u') {
                bail!("unpaired surrogate \\u{:04x}", high);
            }
            let low = JsonValue::read_hex4(chars)?;
            if !(0xDC00..0xE000).contains(&low) {
                bail!("invalid low surrogate \\u{:04x}", low);
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };

        match char::from_u32(code) {
            Some(c) => Ok(c),
            None => bail!("invalid code point \\u{:04x}", code),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Integer(_) => "integer",
            JsonValue::Float(_) => "float",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut JsonMap> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Compact JSON text.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out, None, 0);
        out
    }

    /// JSON text indented by two spaces per level.
    pub fn to_json_pretty(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out, Some(2), 0);
        out
    }

    fn write_json(&self, out: &mut String, indent: Option<usize>, level: usize) {
        match self {
            JsonValue::Null => out.push_str("null"),
            JsonValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            JsonValue::Integer(n) => out.push_str(&n.to_string()),
            JsonValue::Float(f) if f.is_finite() => out.push_str(&format_float(*f)),
            JsonValue::Float(_) => out.push_str("null"),
            JsonValue::String(s) => write_escaped(out, s),
            JsonValue::Array(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push('[');
                for (n, item) in items.iter().enumerate() {
                    if n > 0 {
                        out.push(',');
                    }
                    write_newline(out, indent, level + 1);
                    item.write_json(out, indent, level + 1);
                }
                write_newline(out, indent, level);
                out.push(']');
            }
            JsonValue::Object(map) => JsonValue::write_object(map, out, indent, level),
        }
    }

    pub(crate) fn write_object(map: &JsonMap, out: &mut String, indent: Option<usize>, level: usize) {
        if map.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push('{');
        for (n, (key, value)) in map.iter().enumerate() {
            if n > 0 {
                out.push(',');
            }
            write_newline(out, indent, level + 1);
            write_escaped(out, key);
            out.push(':');
            if indent.is_some() {
                out.push(' ');
            }
            value.write_json(out, indent, level + 1);
        }
        write_newline(out, indent, level);
        out.push('}');
    }
}

fn write_newline(out: &mut String, indent: Option<usize>, level: usize) {
    if let Some(width) = indent {
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(width * level));
    }
}

fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Shortest decimal text that reads back as the same float, never in exponent form.
pub fn format_float(value: f64) -> String {
    format!("{}", value)
}

fn is_json_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }

    i == bytes.len()
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_owned())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Integer(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Integer(value.into())
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Float(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(value: JsonMap) -> Self {
        JsonValue::Object(value)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}
