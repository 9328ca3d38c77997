use std::fmt;
use std::str::FromStr;

use crate::error::AccessError;

const SEPARATOR: char = '.';

/// A dot path such as `.parent.child`: one or more keys, walked from the document root.
///
/// There is no escaping, so a key containing `.` cannot be addressed. Empty keys
/// are kept as written: `.a..b` has the keys `a`, `` and `b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonPath {
    keys: Vec<String>,
}

impl JsonPath {
    pub fn parse(path_str: &str) -> Result<Self, AccessError> {
        let rest = match path_str.strip_prefix(SEPARATOR) {
            Some(rest) => rest,
            None => {
                return Err(AccessError::InvalidPath {
                    path: path_str.to_owned(),
                })
            }
        };

        let keys = rest.split(SEPARATOR).map(String::from).collect();
        Ok(JsonPath { keys })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// The terminal key, naming the slot being read or written.
    pub fn last_key(&self) -> &str {
        self.keys.last().map(String::as_str).unwrap_or_default()
    }

    /// Every key but the terminal one.
    pub fn parent_keys(&self) -> &[String] {
        &self.keys[..self.keys.len().saturating_sub(1)]
    }
}

impl FromStr for JsonPath {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonPath::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.keys {
            write!(f, "{}{}", SEPARATOR, key)?;
        }
        Ok(())
    }
}
