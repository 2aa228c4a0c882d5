//! Dynamic Value Layer
//!
//! `Value` is the closed set of concrete data a node can hold at runtime.
//! Node rules are written generically against the capability traits in
//! [`super::caps`]; `Value` is the dynamically typed boundary those rules
//! are wrapped behind so that heterogeneous nodes can live in one graph.
//!
//! Implicit casts are the declared promotions a value may undergo without
//! the caller asking: `Int -> Float`, and any of `Bool`/`Int`/`Float` to
//! `Str`. The only explicit-only cast is the truncating `Float -> Int`.

use std::fmt;

/// The closed set of runtime data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int,
    Float,
    Str,
}

impl DataType {
    /// Human-readable type name.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "string",
        }
    }

    /// The default value a fresh node of this type holds.
    pub fn default_value(self) -> Value {
        match self {
            DataType::Bool => Value::Bool(false),
            DataType::Int => Value::Int(0),
            DataType::Float => Value::Float(0.0),
            DataType::Str => Value::Str(String::new()),
        }
    }

    /// True if a value of `self` may be silently promoted to `to`.
    ///
    /// A type is not considered implicitly castable to itself; exactness
    /// is scored separately during overload matching.
    pub fn implicit_casts_to(self, to: DataType) -> bool {
        matches!(
            (self, to),
            (DataType::Int, DataType::Float)
                | (DataType::Bool, DataType::Str)
                | (DataType::Int, DataType::Str)
                | (DataType::Float, DataType::Str)
        )
    }

    /// True if an explicit cast from `self` to `to` exists. Every implicit
    /// cast may also be requested explicitly.
    pub fn explicit_casts_to(self, to: DataType) -> bool {
        self.implicit_casts_to(to) || matches!((self, to), (DataType::Float, DataType::Int))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value held by a value-bearing node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// The runtime type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::Str(_) => DataType::Str,
        }
    }

    /// The bare value rendered as text, without the type name.
    pub fn value_string(&self) -> String {
        match self {
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Str(v) => v.clone(),
        }
    }

    /// Apply a declared implicit promotion, or return the value unchanged
    /// when it already has the requested type. `None` when no such
    /// promotion exists.
    pub fn cast_implicit(&self, to: DataType) -> Option<Value> {
        if self.data_type() == to {
            return Some(self.clone());
        }
        match (self, to) {
            (Value::Int(v), DataType::Float) => Some(Value::Float(*v as f64)),
            (Value::Bool(_), DataType::Str)
            | (Value::Int(_), DataType::Str)
            | (Value::Float(_), DataType::Str) => Some(Value::Str(self.value_string())),
            _ => None,
        }
    }

    /// Apply an explicit cast. Covers every implicit promotion plus the
    /// truncating float-to-int conversion.
    pub fn cast_explicit(&self, to: DataType) -> Option<Value> {
        if let Some(value) = self.cast_implicit(to) {
            return Some(value);
        }
        match (self, to) {
            (Value::Float(v), DataType::Int) => Some(Value::Int(v.trunc() as i64)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.data_type(), self.value_string())
    }
}
