//! Dynamically-typed call arguments and results.
//!
//! Proxied calls carry their arguments and results as [`Value`]s. Rust types
//! enter and leave that model through [`IntoValue`] and [`FromValue`].

use crate::{error::ValueTypeError, target::Target};
use std::{any::Any, fmt, sync::Arc};

/// A reference-counted opaque object compared by identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Any + Send + Sync>);

impl ObjectRef {
    /// Wrap a value into a new object.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the object as `T` if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }

    /// Returns `true` if both references point to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A call argument or result.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value; also the result of void methods.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// Immutable text.
    Text(Arc<str>),
    /// An opaque object, compared by identity.
    Object(ObjectRef),
    /// An invocable object such as a delegate or another proxy.
    Instance(Arc<dyn Target>),
}

impl Value {
    /// Build a text value.
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Value::Text(text.into())
    }

    /// Wrap a value into a new [`ObjectRef`].
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Value::Object(ObjectRef::new(value))
    }

    /// Wrap an invocable object.
    pub fn instance<T: Target>(target: T) -> Self {
        Value::Instance(Arc::new(target))
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Text(_) => ValueKind::Text,
            Value::Object(_) => ValueKind::Object,
            Value::Instance(_) => ValueKind::Instance,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Read as integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Read as boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as opaque object.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow as invocable object.
    pub fn as_instance(&self) -> Option<&Arc<dyn Target>> {
        match self {
            Value::Instance(target) => Some(target),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => a.object_id() == b.object_id(),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Value::Object(o) => o.fmt(f),
            Value::Instance(t) => write!(f, "Instance({:#x})", t.object_id()),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.into())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

/// The kind of a runtime [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Text`]
    Text,
    /// [`Value::Object`]
    Object,
    /// [`Value::Instance`]
    Instance,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Text => "text",
            ValueKind::Object => "object",
            ValueKind::Instance => "instance",
        })
    }
}

/// The declared return category of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    /// No result; whatever a callback produces is discarded.
    Void,
    /// A boolean.
    Bool,
    /// An integer.
    Int,
    /// Text, possibly null.
    Text,
    /// Any value.
    Object,
}

impl ReturnKind {
    /// Returns `true` if `value` may be returned from a method of this kind.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ReturnKind::Void | ReturnKind::Object => true,
            ReturnKind::Bool => matches!(value, Value::Bool(_)),
            ReturnKind::Int => matches!(value, Value::Int(_)),
            ReturnKind::Text => matches!(value, Value::Text(_) | Value::Null),
        }
    }

    /// The value a freshly created field of this kind holds.
    pub fn default_value(self) -> Value {
        match self {
            ReturnKind::Bool => Value::Bool(false),
            ReturnKind::Int => Value::Int(0),
            ReturnKind::Void | ReturnKind::Text | ReturnKind::Object => Value::Null,
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnKind::Void => "void",
            ReturnKind::Bool => "bool",
            ReturnKind::Int => "int",
            ReturnKind::Text => "text",
            ReturnKind::Object => "object",
        })
    }
}

/// Conversion of a Rust value into a [`Value`].
pub trait IntoValue {
    /// The return kind a method producing this type declares.
    const KIND: ReturnKind = ReturnKind::Object;

    /// Performs the conversion.
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    const KIND: ReturnKind = ReturnKind::Void;

    fn into_value(self) -> Value {
        Value::Null
    }
}

impl IntoValue for bool {
    const KIND: ReturnKind = ReturnKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for i64 {
    const KIND: ReturnKind = ReturnKind::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoValue for i32 {
    const KIND: ReturnKind = ReturnKind::Int;

    fn into_value(self) -> Value {
        Value::Int(self.into())
    }
}

impl IntoValue for u32 {
    const KIND: ReturnKind = ReturnKind::Int;

    fn into_value(self) -> Value {
        Value::Int(self.into())
    }
}

impl IntoValue for usize {
    const KIND: ReturnKind = ReturnKind::Int;

    fn into_value(self) -> Value {
        Value::Int(i64::try_from(self).unwrap_or(i64::MAX))
    }
}

impl IntoValue for String {
    const KIND: ReturnKind = ReturnKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self.into())
    }
}

impl IntoValue for &str {
    const KIND: ReturnKind = ReturnKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self.into())
    }
}

impl IntoValue for Arc<str> {
    const KIND: ReturnKind = ReturnKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for ObjectRef {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl IntoValue for Arc<dyn Target> {
    fn into_value(self) -> Value {
        Value::Instance(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    const KIND: ReturnKind = match T::KIND {
        ReturnKind::Text => ReturnKind::Text,
        _ => ReturnKind::Object,
    };

    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

/// Conversion of a [`Value`] argument into a Rust value.
pub trait FromValue: Sized {
    /// Performs the conversion.
    fn from_value(value: &Value) -> Result<Self, ValueTypeError>;
}

fn mismatch(expected: &'static str, value: &Value) -> ValueTypeError {
    ValueTypeError {
        expected,
        found: value.kind(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_int().ok_or_else(|| mismatch("int", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value
            .as_int()
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| mismatch("i32", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value
            .as_text()
            .map(str::to_owned)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl FromValue for Arc<str> {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Text(text) => Ok(text.clone()),
            other => Err(mismatch("text", other)),
        }
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_object().cloned().ok_or_else(|| mismatch("object", value))
    }
}

impl FromValue for Arc<dyn Target> {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value
            .as_instance()
            .cloned()
            .ok_or_else(|| mismatch("instance", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
