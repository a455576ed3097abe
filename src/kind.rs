use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The kind of a JSON node, as seen by the casting engine.
///
/// Numbers are split by representation: anything that fits an `i64` or `u64`
/// is an [`Kind::Integer`], everything else is a [`Kind::Float`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    Null,
    Integer,
    Float,
    Bool,
    String,
    Array,
    Object,
}

impl Kind {
    /// Returns the kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Kind::Integer,
            Value::Number(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "Null",
            Kind::Integer => "Integer",
            Kind::Float => "Float",
            Kind::Bool => "Bool",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
