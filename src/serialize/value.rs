//! Runtime value model accepted by the serializer.
//!
//! Scalars are held inline. Composite kinds (arrays, maps, sets, objects) are
//! shared handles over `Arc<RwLock<_>>`, so the same composite can be reachable
//! from several places, including from inside itself. Handle identity is the
//! address of the shared allocation.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard};
use regex::Regex;
use serde::Serialize;

use crate::serialize::options::SerializeOptions;
use crate::serialize::walker::serialize;
use crate::serialize::LogValue;

/// An opaque object supplied by the host application.
///
/// The serializer renders it through its `Display` impl. When formatting
/// fails (returns `Err` or panics) the [`type_tag`](HostObject::type_tag) is
/// used instead. No composite lock is held while `Display` runs, so it may
/// write to handles that contain the object.
pub trait HostObject: fmt::Display + Send + Sync {
    fn type_tag(&self) -> &str {
        "Object"
    }
}

/// Any value that can be handed to a logger.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    BigInt(i128),
    /// Symbol with an optional description.
    Symbol(Option<String>),
    String(String),
    Date(DateTime<Utc>),
    Regex(Regex),
    Error(Arc<ErrorValue>),
    /// Callable, identified only by its name.
    Function(Option<String>),
    Array(ArrayRef),
    Map(MapRef),
    Set(SetRef),
    Object(ObjectRef),
    Host(Arc<dyn HostObject>),
}

impl Value {
    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Some(description.into()))
    }

    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Some(name.into()))
    }

    pub fn host<H: HostObject + 'static>(object: H) -> Self {
        Value::Host(Arc::new(object))
    }

    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Value::Error(Arc::new(ErrorValue::from_error(err)))
    }

    /// Capture any `Serialize` type through its JSON form.
    ///
    /// A failing `Serialize` impl is captured as an error value instead.
    pub fn capture<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::from(json),
            Err(err) => Value::Error(Arc::new(ErrorValue::new("SerializeError", err.to_string()))),
        }
    }

    /// Same-value comparison: scalars by value (NaN equals NaN, `1` equals
    /// `1.0`), shared kinds by identity.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::UInt(b)) | (Value::UInt(b), Value::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::UInt(a), Value::Float(b)) | (Value::Float(b), Value::UInt(a)) => *a as f64 == *b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::Error(a), Value::Error(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.identity() == b.identity(),
            (Value::Map(a), Value::Map(b)) => a.identity() == b.identity(),
            (Value::Set(a), Value::Set(b)) => a.identity() == b.identity(),
            (Value::Object(a), Value::Object(b)) => a.identity() == b.identity(),
            (Value::Host(a), Value::Host(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

/// Renders through the serializer with default limits, so cyclic values
/// print safely.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serialize(self, &SerializeOptions::default()))
    }
}

fn identity_of<T>(shared: &Arc<T>) -> usize {
    Arc::as_ptr(shared).cast::<()>() as usize
}

/// Error payload: name, message, optional stack and extra fields.
#[derive(Clone)]
pub struct ErrorValue {
    name: String,
    message: String,
    stack: Option<String>,
    fields: IndexMap<String, Value>,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            fields: IndexMap::new(),
        }
    }

    /// Build from a Rust error. The name is the error's type name and the
    /// `source()` chain becomes the stack.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let mut value = Self::new(short_type_name::<E>(), err.to_string());
        if !causes.is_empty() {
            value.stack = Some(causes.join("\n"));
        }
        value
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Shared, ordered sequence.
#[derive(Clone, Default)]
pub struct ArrayRef(Arc<RwLock<Vec<Value>>>);

impl ArrayRef {
    pub fn new(items: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(items)))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.write().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn identity(&self) -> usize {
        identity_of(&self.0)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.0.read_recursive()
    }
}

/// Shared keyed collection; keys may be any value and keep insertion order.
#[derive(Clone, Default)]
pub struct MapRef(Arc<RwLock<Vec<(Value, Value)>>>);

impl MapRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.write();
        match entries.iter_mut().find(|(existing, _)| existing.same_value(&key)) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn identity(&self) -> usize {
        identity_of(&self.0)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<(Value, Value)>> {
        self.0.read_recursive()
    }
}

/// Shared membership list, de-duplicated on insert.
#[derive(Clone, Default)]
pub struct SetRef(Arc<RwLock<Vec<Value>>>);

impl SetRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal member was already present.
    pub fn add(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        let mut members = self.0.write();
        if members.iter().any(|member| member.same_value(&value)) {
            return false;
        }
        members.push(value);
        true
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn identity(&self) -> usize {
        identity_of(&self.0)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.0.read_recursive()
    }
}

/// Plain keyed object with an optional class name.
#[derive(Clone, Default)]
pub struct ObjectValue {
    class: Option<String>,
    fields: IndexMap<String, Value>,
}

impl ObjectValue {
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<ObjectValue>>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object whose constructor is `class`; the name shows up in depth
    /// placeholders.
    pub fn named(class: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(ObjectValue {
            class: Some(class.into()),
            fields: IndexMap::new(),
        })))
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.write().fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().fields.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.read().fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn identity(&self) -> usize {
        identity_of(&self.0)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ObjectValue> {
        self.0.read_recursive()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::UInt(u64::from(n))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::UInt(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(at: DateTime<Utc>) -> Self {
        Value::Date(at)
    }
}

impl From<SystemTime> for Value {
    fn from(at: SystemTime) -> Self {
        Value::Date(DateTime::<Utc>::from(at))
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::Regex(re)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(Arc::new(err))
    }
}

impl From<ArrayRef> for Value {
    fn from(array: ArrayRef) -> Self {
        Value::Array(array)
    }
}

impl From<MapRef> for Value {
    fn from(map: MapRef) -> Self {
        Value::Map(map)
    }
}

impl From<SetRef> for Value {
    fn from(set: SetRef) -> Self {
        Value::Set(set)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(ArrayRef::new(items.into_iter().map(Into::into).collect()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<LogValue> for Value {
    fn from(json: LogValue) -> Self {
        match json {
            LogValue::Null => Value::Null,
            LogValue::Bool(b) => Value::Bool(b),
            LogValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            LogValue::String(s) => Value::String(s),
            LogValue::Array(items) => Value::from(items),
            LogValue::Object(fields) => {
                let object = ObjectRef::new();
                for (key, value) in fields {
                    object.insert(key, value);
                }
                Value::Object(object)
            }
        }
    }
}
