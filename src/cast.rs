//! The casting engine.
//!
//! [`FromConfig`] is implemented per requested shape: scalars, sequences,
//! string-keyed mappings, optionals and records. Dispatch is chosen by the
//! Rust type being produced, never by inspecting the document first, so every
//! mismatch names both the kind that was expected and the kind that was found.
//!
//! A failing node never aborts its siblings in collecting mode. The failure
//! is reported through [`Context`] and a default value stands in for the
//! node, so the returned structure is always complete.
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

use crate::{context::Context, error::ConfigError, kind::Kind};

/// A type that can be cast out of a JSON subtree.
///
/// `Default` supplies the substitute for a node that failed to cast.
pub trait FromConfig: Sized + Default {
    /// Casts the node at `ctx` into `Self`.
    ///
    /// In fail-fast mode the first mismatch is returned as `Err`. In
    /// collecting mode mismatches are recorded in the context's sink and a
    /// substitute value is returned instead. An `Err` returned anyway in
    /// collecting mode is recorded by the caller, which then substitutes
    /// `Self::default()`.
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError>;

    /// The value of a record field whose key is absent from the object.
    ///
    /// `None` means the field is required and its absence is reported as
    /// `NotFound`.
    fn absent() -> Option<Self> {
        None
    }
}

/// Casts the node at `ctx`, keeping a failure local to that node.
///
/// In collecting mode an `Err` from `T` is recorded and replaced by
/// `T::default()`, so siblings are still visited.
pub(crate) fn contained<T: FromConfig>(ctx: &Context<'_>) -> Result<T, ConfigError> {
    match T::from_config(ctx) {
        Err(error) if ctx.is_collecting() => {
            ctx.report(error)?;
            Ok(T::default())
        }
        result => result,
    }
}

impl FromConfig for bool {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        log::trace!("cast bool at {:?}", ctx.path());
        match ctx.node() {
            Value::Bool(b) => Ok(*b),
            _ => {
                ctx.mismatch(Kind::Bool)?;
                Ok(false)
            }
        }
    }
}

impl FromConfig for String {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        log::trace!("cast string at {:?}", ctx.path());
        match ctx.node() {
            Value::String(s) => Ok(s.clone()),
            _ => {
                ctx.mismatch(Kind::String)?;
                Ok(String::new())
            }
        }
    }
}

macro_rules! impl_from_config_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromConfig for $ty {
                fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
                    log::trace!("cast {} at {:?}", stringify!($ty), ctx.path());
                    let Value::Number(n) = ctx.node() else {
                        ctx.mismatch(Kind::Integer)?;
                        return Ok(0);
                    };
                    let fitted = if let Some(v) = n.as_i64() {
                        <$ty>::try_from(v).ok()
                    } else if let Some(v) = n.as_u64() {
                        <$ty>::try_from(v).ok()
                    } else {
                        ctx.mismatch(Kind::Integer)?;
                        return Ok(0);
                    };
                    match fitted {
                        Some(v) => Ok(v),
                        None => {
                            ctx.report(ConfigError::Overflow {
                                path: ctx.path().to_owned(),
                                value: n.to_string(),
                                target: stringify!($ty),
                            })?;
                            Ok(0)
                        }
                    }
                }
            }
        )*
    };
}

impl_from_config_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn float(ctx: &Context<'_>) -> Result<f64, ConfigError> {
    if let Value::Number(n) = ctx.node() {
        let accepted = match ctx.kind() {
            Kind::Float => true,
            Kind::Integer => ctx.options().integer_as_float,
            _ => false,
        };
        if let (true, Some(v)) = (accepted, n.as_f64()) {
            return Ok(v);
        }
    }
    ctx.mismatch(Kind::Float)?;
    Ok(0.0)
}

impl FromConfig for f64 {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        log::trace!("cast f64 at {:?}", ctx.path());
        float(ctx)
    }
}

impl FromConfig for f32 {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        log::trace!("cast f32 at {:?}", ctx.path());
        let wide = float(ctx)?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            ctx.report(ConfigError::Overflow {
                path: ctx.path().to_owned(),
                value: ctx.node().to_string(),
                target: "f32",
            })?;
            return Ok(0.0);
        }
        Ok(narrow)
    }
}

/// Any node is accepted as-is.
impl FromConfig for Value {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        log::trace!("cast value at {:?}", ctx.path());
        Ok(ctx.node().clone())
    }
}

/// `null` is `None`; anything else must cast to `T`.
///
/// A present but invalid value yields `Some` of the substitute in collecting
/// mode, so the field still reads as present.
impl<T: FromConfig> FromConfig for Option<T> {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        log::trace!("cast option at {:?}", ctx.path());
        match ctx.node() {
            Value::Null => Ok(None),
            _ => contained::<T>(ctx).map(Some),
        }
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

/// Casts every element of an Array in index order.
fn sequence<T, C>(ctx: &Context<'_>) -> Result<C, ConfigError>
where
    T: FromConfig,
    C: FromIterator<T> + Default,
{
    log::trace!("cast sequence at {:?}", ctx.path());
    let Value::Array(items) = ctx.node() else {
        ctx.mismatch(Kind::Array)?;
        return Ok(C::default());
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| contained::<T>(&ctx.element(index, item)))
        .collect()
}

impl<T: FromConfig> FromConfig for Vec<T> {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        sequence::<T, _>(ctx)
    }
}

impl<T: FromConfig> FromConfig for VecDeque<T> {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        sequence::<T, _>(ctx)
    }
}

/// Casts every member value of an Object, keyed by member name.
fn mapping<T, C>(ctx: &Context<'_>) -> Result<C, ConfigError>
where
    T: FromConfig,
    C: FromIterator<(String, T)> + Default,
{
    log::trace!("cast mapping at {:?}", ctx.path());
    let Value::Object(object) = ctx.node() else {
        ctx.mismatch(Kind::Object)?;
        return Ok(C::default());
    };
    object
        .iter()
        .map(|(key, node)| {
            contained::<T>(&ctx.member(key, node)).map(|value| (key.clone(), value))
        })
        .collect()
}

impl<T: FromConfig, S: BuildHasher + Default> FromConfig for HashMap<String, T, S> {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        mapping::<T, _>(ctx)
    }
}

impl<T: FromConfig> FromConfig for BTreeMap<String, T> {
    fn from_config(ctx: &Context<'_>) -> Result<Self, ConfigError> {
        mapping::<T, _>(ctx)
    }
}

/// A user-defined composite that lists its fields in declaration order.
///
/// Usually derived with [`#[derive(Config)]`](crate::Config). A manual
/// implementation calls [`Fields::field`] once per field and is paired with
/// [`impl_from_config!`](crate::impl_from_config):
///
/// ```rust
/// use json_config::{ConfigError, Fields, Record, impl_from_config};
///
/// #[derive(Debug, Default)]
/// struct WebConfig {
///     host: String,
///     port: u16,
/// }
///
/// impl Record for WebConfig {
///     fn fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ConfigError> {
///         fields.field("host", &mut self.host)?;
///         fields.field("port", &mut self.port)?;
///         Ok(())
///     }
/// }
///
/// impl_from_config!(WebConfig);
///
/// let doc = serde_json::json!({"host": "localhost", "port": 8080});
/// let web: WebConfig = json_config::cast(&doc).unwrap();
/// assert_eq!(web.port, 8080);
/// ```
pub trait Record: Default {
    fn fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ConfigError>;
}

/// The object a [`Record`] is being filled from.
pub struct Fields<'c, 'a> {
    ctx: &'c Context<'a>,
    object: &'a Map<String, Value>,
    listed: Vec<&'static str>,
}

impl<'c, 'a> Fields<'c, 'a> {
    /// Fills `slot` from the member `name`.
    ///
    /// An absent member is reported as `NotFound` at the record's path and
    /// leaves `slot` untouched, unless the field type has an
    /// [`absent`](FromConfig::absent) value.
    pub fn field<T: FromConfig>(
        &mut self,
        name: &'static str,
        slot: &mut T,
    ) -> Result<(), ConfigError> {
        self.listed.push(name);
        match self.object.get(name) {
            Some(node) => *slot = contained(&self.ctx.member(name, node))?,
            None => match T::absent() {
                Some(value) => *slot = value,
                None => self
                    .ctx
                    .report(ConfigError::not_found(self.ctx.path(), name))?,
            },
        }
        Ok(())
    }

    /// Path of the record itself.
    pub fn path(&self) -> &str {
        self.ctx.path()
    }

    fn report_unknown(&self) -> Result<(), ConfigError> {
        for key in self.object.keys() {
            if !self.listed.iter().any(|name| *name == key.as_str()) {
                self.ctx.report(ConfigError::UnknownField {
                    path: self.ctx.path().to_owned(),
                    key: key.clone(),
                })?;
            }
        }
        Ok(())
    }
}

/// Casts the node at `ctx` into the record `R`.
///
/// This is the body of every derived [`FromConfig`] for records. A node that
/// is not an Object yields one `TypeError` and `R::default()`.
pub fn record<R: Record>(ctx: &Context<'_>) -> Result<R, ConfigError> {
    log::trace!("cast record {} at {:?}", std::any::type_name::<R>(), ctx.path());
    let mut value = R::default();
    let Value::Object(object) = ctx.node() else {
        ctx.mismatch(Kind::Object)?;
        return Ok(value);
    };
    let mut fields = Fields {
        ctx,
        object,
        listed: Vec::new(),
    };
    value.fields(&mut fields)?;
    if ctx.options().deny_unknown_fields {
        fields.report_unknown()?;
    }
    Ok(value)
}

/// Implements [`FromConfig`] for a type with a manual [`Record`] impl.
#[macro_export]
macro_rules! impl_from_config {
    ($record:ty) => {
        impl $crate::FromConfig for $record {
            fn from_config(
                ctx: &$crate::Context<'_>,
            ) -> ::std::result::Result<Self, $crate::ConfigError> {
                $crate::record(ctx)
            }
        }
    };
}
