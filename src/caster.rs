//! Entry points of the casting engine.
//!
//! Two drivers share the same dispatcher:
//!
//! - [`Caster::cast`] stops at the first mismatch and returns it.
//! - [`Caster::cast_with_errors`] visits the whole document, collects every
//!   mismatch in visitation order and always returns a complete value, with
//!   defaults standing in for the nodes that failed.
//!
//! # Example
//!
//! ```rust
//! use json_config::{CastOptions, Caster, Config};
//!
//! #[derive(Debug, Default, Config)]
//! struct WebConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Config)]
//! struct ServerConfig {
//!     web_server: WebConfig,
//!     users: Vec<String>,
//! }
//!
//! let doc = serde_json::json!({
//!     "web_server": {"host": 123},
//!     "users": ["abc", 1],
//! });
//!
//! let caster = Caster::new(CastOptions::default());
//! let (config, errors) = caster.cast_with_errors::<ServerConfig>(&doc);
//! assert_eq!(config.users, ["abc", ""]);
//! assert_eq!(errors.len(), 3);
//!
//! assert!(caster.cast::<ServerConfig>(&doc).is_err());
//! ```
use std::path::Path;

use derive_builder::Builder;
use serde_json::Value;

use crate::{
    cast::{FromConfig, contained},
    context::{Context, ErrorSink},
    error::{ConfigError, Error},
    source,
};

/// Knobs for a [`Caster`].
///
/// ```rust
/// use json_config::CastOptionsBuilder;
///
/// let options = CastOptionsBuilder::default()
///     .integer_as_float(true)
///     .build()
///     .unwrap();
/// assert!(options.integer_as_float);
/// assert!(!options.deny_unknown_fields);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(default)]
pub struct CastOptions {
    /// Accept an Integer node where a Float is requested.
    pub integer_as_float: bool,

    /// Report object members that a record does not declare.
    pub deny_unknown_fields: bool,
}

impl CastOptions {
    pub fn builder() -> CastOptionsBuilder {
        CastOptionsBuilder::default()
    }
}

/// Casts JSON documents into typed values under a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Caster {
    options: CastOptions,
}

impl Caster {
    pub fn new(options: CastOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CastOptions {
        &self.options
    }

    /// A fail-fast root context over `document`, for navigating it by hand.
    pub fn root<'a>(&'a self, document: &'a Value) -> Context<'a> {
        Context::with_options(document, None, &self.options)
    }

    /// Casts `document` into `T`, returning the first mismatch.
    pub fn cast<T: FromConfig>(&self, document: &Value) -> Result<T, ConfigError> {
        T::from_config(&self.root(document))
    }

    /// Casts `document` into `T`, collecting every mismatch.
    ///
    /// Never fails. The error list is empty exactly when [`Caster::cast`]
    /// would succeed on the same document.
    pub fn cast_with_errors<T>(&self, document: &Value) -> (T, Vec<ConfigError>)
    where
        T: FromConfig,
    {
        let sink = ErrorSink::new();
        let value = {
            let ctx = Context::with_options(document, Some(&sink), &self.options);
            // A collecting context never hands an error back.
            contained::<T>(&ctx).unwrap_or_default()
        };
        let errors = sink.into_errors();
        log::debug!(
            "cast {} collected {} error(s)",
            std::any::type_name::<T>(),
            errors.len()
        );
        (value, errors)
    }

    /// Parses `src` as JSON and casts it, failing fast.
    pub fn cast_str<T: FromConfig>(&self, src: &str) -> Result<T, Error> {
        let document = source::parse_str(src)?;
        Ok(self.cast(&document)?)
    }

    /// Reads a JSON file and casts it, failing fast.
    pub fn load_file<T: FromConfig>(&self, path: impl AsRef<Path>) -> Result<T, Error> {
        let document = source::read_file(path)?;
        Ok(self.cast(&document)?)
    }

    /// Reads a JSON file and casts it, collecting mismatches.
    ///
    /// I/O and syntax errors still abort, since there is no document to
    /// traverse.
    pub fn load_file_with_errors<T>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(T, Vec<ConfigError>), Error>
    where
        T: FromConfig,
    {
        let document = source::read_file(path)?;
        Ok(self.cast_with_errors(&document))
    }
}

/// Casts `document` into `T` with default options, returning the first
/// mismatch.
pub fn cast<T: FromConfig>(document: &Value) -> Result<T, ConfigError> {
    Caster::default().cast(document)
}

/// Casts `document` into `T` with default options, collecting every
/// mismatch.
pub fn cast_with_errors<T: FromConfig>(document: &Value) -> (T, Vec<ConfigError>) {
    Caster::default().cast_with_errors(document)
}
