//! This library provides:
//! - JsonStruct: A JSON object document whose values are read and written by dot paths such as `.parent.child`,
//!   with typed getters (string, int, float, bool, duration, list), defaults, setters which create missing
//!   intermediate objects, and deep copy
//! - JsonValue: The value tree, with a reader built on JsonTag and a compact or pretty writer
//! - JsonTag: A low-level JSON tag parser which reads JSON tags from an instance which implements trait std::io::Read
//!
//! ```
//! use jsonstruct::JsonStruct;
//!
//! let mut values = JsonStruct::from_json_str(r#"{"parent": {"child": 1.2}}"#).unwrap();
//! assert_eq!(values.string(".parent.child").as_deref(), Some("1.2"));
//! assert_eq!(values.int(".parent.child"), Some(1));
//!
//! values.set_string(".one.two.three", "hi").unwrap();
//! assert_eq!(values.string_with_default(".one.two.three", "default"), "hi");
//! ```
//!
//! Note: Paths only name object keys; array indexing, wildcards and filters are not supported.

mod peekable_codepoints;
mod json_tag;
mod json_value;
mod json_path;
mod document;
mod typed;
mod error;
pub mod duration;
#[cfg(feature = "serde_json")]
mod interop;

pub use crate::json_tag::JsonTag;
pub use crate::json_value::{
    JsonMap,
    JsonValue,
    MAX_DEPTH,
};
pub use crate::json_path::JsonPath;
pub use crate::document::JsonStruct;
pub use crate::error::{
    AccessError,
    DurationParseError,
};
pub use crate::duration::{
    format_duration,
    parse_duration,
};
