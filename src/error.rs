use serde::Serialize;
use thiserror::Error;

use crate::kind::Kind;

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed, but does not match the requested type.
    ///
    /// Only returned by fail-fast entry points. The collecting entry points
    /// report mismatches through their error list instead.
    #[error(transparent)]
    Cast(#[from] ConfigError),
}

/// A mismatch between a document and the requested type.
///
/// Every variant carries the path of the offending node, written with
/// `.field` for object members and `[index]` for array elements, starting
/// from the empty root path. The rendered message always ends with the path
/// in parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum ConfigError {
    #[error("{expected} is expected, but {actual} is given. ({path})")]
    TypeError {
        path: String,
        expected: Kind,
        actual: Kind,
    },

    #[error("Out of range 0..{size}: {index} ({path})")]
    OutOfRange {
        path: String,
        size: usize,
        index: usize,
    },

    #[error("\"{key}\" is not found ({path})")]
    NotFound { path: String, key: String },

    /// An Integer node that does not fit the requested integer type.
    #[error("{value} does not fit in {target} ({path})")]
    Overflow {
        path: String,
        value: String,
        target: &'static str,
    },

    /// An object member that the record does not declare.
    ///
    /// Only reported when [`CastOptions::deny_unknown_fields`](crate::CastOptions)
    /// is set.
    #[error("\"{key}\" is not a known field ({path})")]
    UnknownField { path: String, key: String },
}

impl ConfigError {
    pub fn type_error(path: impl Into<String>, expected: Kind, actual: Kind) -> Self {
        ConfigError::TypeError {
            path: path.into(),
            expected,
            actual,
        }
    }

    pub fn out_of_range(path: impl Into<String>, size: usize, index: usize) -> Self {
        ConfigError::OutOfRange {
            path: path.into(),
            size,
            index,
        }
    }

    pub fn not_found(path: impl Into<String>, key: impl Into<String>) -> Self {
        ConfigError::NotFound {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ConfigError::TypeError { path, .. }
            | ConfigError::OutOfRange { path, .. }
            | ConfigError::NotFound { path, .. }
            | ConfigError::Overflow { path, .. }
            | ConfigError::UnknownField { path, .. } => path,
        }
    }

    /// The rendered, human-readable message, including the path.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn expected(&self) -> Option<Kind> {
        match self {
            ConfigError::TypeError { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    pub fn actual(&self) -> Option<Kind> {
        match self {
            ConfigError::TypeError { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<usize> {
        match self {
            ConfigError::OutOfRange { size, .. } => Some(*size),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            ConfigError::OutOfRange { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The missing or unexpected key, for `NotFound` and `UnknownField`.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { key, .. } | ConfigError::UnknownField { key, .. } => Some(key),
            _ => None,
        }
    }
}
