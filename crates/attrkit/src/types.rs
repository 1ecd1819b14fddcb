//! Declared attribute types.
//!
//! This module defines the closed set of target kinds an attribute can be
//! declared with. Coercion dispatches on this tag instead of inspecting
//! arbitrary runtime types.

use std::fmt;
use std::sync::Arc;

use crate::class::ClassRef;
use crate::object::ValueObject;
use crate::value::Value;

/// Scalar target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Float,
    Bool,
    String,
    Symbol,
    /// UTC timestamp (RFC 3339 text or Unix seconds on input)
    Time,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Int => "Int",
            Primitive::Float => "Float",
            Primitive::Bool => "Bool",
            Primitive::String => "String",
            Primitive::Symbol => "Symbol",
            Primitive::Time => "Time",
        }
    }

    /// Check if a value is already of this kind.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Primitive::Int, Value::Int(_))
                | (Primitive::Float, Value::Float(_))
                | (Primitive::Bool, Value::Bool(_))
                | (Primitive::String, Value::String(_))
                | (Primitive::Symbol, Value::Symbol(_))
                | (Primitive::Time, Value::Time(_))
        )
    }
}

/// The declared type of an attribute.
///
/// The element type of a [`AttrType::Sequence`] is carried by the
/// declaration's `of` option and reaches the gateway as
/// [`CoercionOptions::element_type`](crate::CoercionOptions::element_type).
#[derive(Clone)]
pub enum AttrType {
    Primitive(Primitive),

    /// Ordered list; elements are coerced individually.
    Sequence,

    /// String-keyed map, taken as-is.
    Mapping,

    /// Nested value object of the given class (or a subclass).
    Object(ClassRef),

    /// Accepts any value, nil included, without coercion.
    Any,
}

impl AttrType {
    pub const INT: AttrType = AttrType::Primitive(Primitive::Int);
    pub const FLOAT: AttrType = AttrType::Primitive(Primitive::Float);
    pub const BOOL: AttrType = AttrType::Primitive(Primitive::Bool);
    pub const STRING: AttrType = AttrType::Primitive(Primitive::String);
    pub const SYMBOL: AttrType = AttrType::Primitive(Primitive::Symbol);
    pub const TIME: AttrType = AttrType::Primitive(Primitive::Time);

    /// Nested value object type for a class reference.
    pub fn object(class: &ClassRef) -> Self {
        AttrType::Object(Arc::clone(class))
    }

    /// Nested value object type for a declared value object.
    pub fn value_object<T: ValueObject>() -> Self {
        AttrType::object(T::class())
    }

    /// The only kind that gets an empty default and never takes the fast path.
    pub fn is_sequence(&self) -> bool {
        matches!(self, AttrType::Sequence)
    }

    /// Check if a value already satisfies this type without coercion.
    ///
    /// Nil satisfies only [`AttrType::Any`]; everything else routes nil
    /// through the gateway so `allow_nil` is honoured.
    pub fn is_satisfied_by(&self, value: &Value) -> bool {
        match self {
            AttrType::Primitive(primitive) => primitive.matches(value),
            AttrType::Sequence => matches!(value, Value::Sequence(_)),
            AttrType::Mapping => matches!(value, Value::Mapping(_)),
            AttrType::Object(class) => value
                .as_object()
                .is_some_and(|instance| instance.class().is_a(class)),
            AttrType::Any => true,
        }
    }
}

impl PartialEq for AttrType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrType::Primitive(a), AttrType::Primitive(b)) => a == b,
            (AttrType::Sequence, AttrType::Sequence)
            | (AttrType::Mapping, AttrType::Mapping)
            | (AttrType::Any, AttrType::Any) => true,
            (AttrType::Object(a), AttrType::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::Primitive(primitive) => f.write_str(primitive.name()),
            AttrType::Sequence => f.write_str("Sequence"),
            AttrType::Mapping => f.write_str("Mapping"),
            AttrType::Object(class) => f.write_str(class.name()),
            AttrType::Any => f.write_str("Any"),
        }
    }
}

impl fmt::Debug for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::Object(class) => write!(f, "Object({})", class.name()),
            other => fmt::Display::fmt(other, f),
        }
    }
}
