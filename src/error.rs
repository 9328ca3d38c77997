use thiserror::Error;

/// Failures of path lookups and typed access on a [`JsonStruct`](crate::JsonStruct).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("invalid path {path:?}: only paths starting with '.' are supported")]
    InvalidPath { path: String },

    #[error("value not found at {path}")]
    NotFound { path: String },

    #[error("value at {path} is {found}, cannot be read as {expected}")]
    TypeCoercion {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("value at {path} is not a valid duration")]
    DurationParse {
        path: String,
        #[source]
        source: DurationParseError,
    },
}

impl AccessError {
    /// True when the value is absent or unusable as the requested type,
    /// i.e. the cases a default value may stand in for.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::NotFound { .. } | AccessError::TypeCoercion { .. })
    }

    pub fn path(&self) -> &str {
        match self {
            AccessError::InvalidPath { path }
            | AccessError::NotFound { path }
            | AccessError::TypeCoercion { path, .. }
            | AccessError::DurationParse { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {literal:?}")]
    UnknownUnit { unit: String, literal: String },

    #[error("invalid number in duration {0:?}")]
    InvalidNumber(String),

    #[error("negative duration {0:?}")]
    Negative(String),

    #[error("duration {0:?} overflows")]
    Overflow(String),
}
