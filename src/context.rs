//! Path tracking for the casting engine.
//!
//! A [`Context`] pairs a borrowed JSON node with the path that leads to it
//! from the document root. Object members extend the path with `.name` and
//! array elements with `[index]`; the root path is empty. Contexts are cheap,
//! short-lived values: every descent creates a fresh one.
//!
//! In collecting mode every context of one cast call shares a single
//! [`ErrorSink`], so mismatches found anywhere in the tree land in one
//! ordered list.
use std::cell::RefCell;

use serde_json::Value;

use crate::{caster::CastOptions, cast::FromConfig, error::ConfigError, kind::Kind};

/// Ordered, append-only collector of cast errors.
///
/// A sink belongs to exactly one top-level cast call. Errors are kept in the
/// order they were found, which is depth-first visitation order.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: RefCell<Vec<ConfigError>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, error: ConfigError) {
        log::debug!("collected: {error}");
        self.errors.borrow_mut().push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    pub fn into_errors(self) -> Vec<ConfigError> {
        self.errors.into_inner()
    }
}

static DEFAULT_OPTIONS: CastOptions = CastOptions {
    integer_as_float: false,
    deny_unknown_fields: false,
};

/// A JSON node together with its path from the document root.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    node: &'a Value,
    path: String,
    sink: Option<&'a ErrorSink>,
    options: &'a CastOptions,
}

impl<'a> Context<'a> {
    /// A fail-fast root context over `document` with default options.
    pub fn root(document: &'a Value) -> Self {
        Self::with_options(document, None, &DEFAULT_OPTIONS)
    }

    pub(crate) fn with_options(
        document: &'a Value,
        sink: Option<&'a ErrorSink>,
        options: &'a CastOptions,
    ) -> Self {
        Self {
            node: document,
            path: String::new(),
            sink,
            options,
        }
    }

    pub fn node(&self) -> &'a Value {
        self.node
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> Kind {
        Kind::of(self.node)
    }

    pub fn options(&self) -> &'a CastOptions {
        self.options
    }

    /// Whether mismatches are collected instead of returned.
    pub fn is_collecting(&self) -> bool {
        self.sink.is_some()
    }

    /// Descends into the object member `key`.
    ///
    /// Fails with a `TypeError` when this node is not an Object and with
    /// `NotFound` when the member is absent. The error is returned to the
    /// caller in both modes; it is never recorded in the sink.
    pub fn get(&self, key: &str) -> Result<Context<'a>, ConfigError> {
        let Value::Object(object) = self.node else {
            return Err(self.type_error(Kind::Object));
        };
        match object.get(key) {
            Some(node) => Ok(self.member(key, node)),
            None => Err(ConfigError::not_found(&self.path, key)),
        }
    }

    /// Descends into the array element at `index`.
    ///
    /// Fails with a `TypeError` when this node is not an Array and with
    /// `OutOfRange` when `index` is past the end.
    pub fn at(&self, index: usize) -> Result<Context<'a>, ConfigError> {
        let Value::Array(items) = self.node else {
            return Err(self.type_error(Kind::Array));
        };
        match items.get(index) {
            Some(node) => Ok(self.element(index, node)),
            None => Err(ConfigError::out_of_range(&self.path, items.len(), index)),
        }
    }

    /// Number of elements of an Array or members of an Object.
    pub fn len(&self) -> Result<usize, ConfigError> {
        match self.node {
            Value::Array(items) => Ok(items.len()),
            Value::Object(object) => Ok(object.len()),
            _ => Err(self.type_error(Kind::Array)),
        }
    }

    /// Member names of an Object in document order; empty for other kinds.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let node: &'a Value = self.node;
        node.as_object()
            .into_iter()
            .flat_map(|object| object.keys().map(String::as_str))
    }

    /// Casts this subtree to `T`, in this context's mode.
    pub fn cast<T: FromConfig>(&self) -> Result<T, ConfigError> {
        T::from_config(self)
    }

    pub(crate) fn member(&self, key: &str, node: &'a Value) -> Context<'a> {
        Context {
            node,
            path: format!("{}.{}", self.path, key),
            sink: self.sink,
            options: self.options,
        }
    }

    pub(crate) fn element(&self, index: usize, node: &'a Value) -> Context<'a> {
        Context {
            node,
            path: format!("{}[{}]", self.path, index),
            sink: self.sink,
            options: self.options,
        }
    }

    pub(crate) fn type_error(&self, expected: Kind) -> ConfigError {
        ConfigError::type_error(&self.path, expected, self.kind())
    }

    /// Records `error` in the sink, or hands it back in fail-fast mode.
    ///
    /// Callers follow a successful report with a substitute value so that
    /// traversal continues.
    pub(crate) fn report(&self, error: ConfigError) -> Result<(), ConfigError> {
        match self.sink {
            Some(sink) => {
                sink.push(error);
                Ok(())
            }
            None => Err(error),
        }
    }

    /// Reports a `TypeError` for this node against `expected`.
    pub(crate) fn mismatch(&self, expected: Kind) -> Result<(), ConfigError> {
        self.report(self.type_error(expected))
    }
}
