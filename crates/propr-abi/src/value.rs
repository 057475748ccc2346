//! Host-facing values

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::decode::{DecoderConfig, Update};
use crate::host::HostObject;
use crate::record::{Prop, PropValue};
use crate::tag::Tag;
use crate::ConversionError;

/// Props and state maps as handed to the UI runtime.
pub type Map = hashbrown::HashMap<String, Value>;

/// A value that can be stored in a props or state map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,

    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    S8(i8),
    S16(i16),
    S32(i32),
    S64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Containers
    List(Vec<Value>),
    Map(Map),

    // Owned by the host
    Host(HostObject),
    Callback(Callback),
}

impl Value {
    /// Short name of this value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::S8(_) => "i8",
            Value::S16(_) => "i16",
            Value::S32(_) => "i32",
            Value::S64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Host(_) => "host object",
            Value::Callback(_) => "callback",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Whether this value equals the zero value of its kind.
    ///
    /// Callbacks are never zero; a host handle is zero only when null.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::U8(n) => *n == 0,
            Value::U16(n) => *n == 0,
            Value::U32(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::S8(n) => *n == 0,
            Value::S16(n) => *n == 0,
            Value::S32(n) => *n == 0,
            Value::S64(n) => *n == 0,
            Value::F32(n) => *n == 0.0,
            Value::F64(n) => *n == 0.0,
            Value::Char(c) => *c == '\0',
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Host(handle) => handle.is_null(),
            Value::Callback(_) => false,
        }
    }

    /// Integer view across all numeric kinds. Floats qualify only when integral.
    fn as_i128(&self) -> Option<i128> {
        match *self {
            Value::U8(n) => Some(n.into()),
            Value::U16(n) => Some(n.into()),
            Value::U32(n) => Some(n.into()),
            Value::U64(n) => Some(n.into()),
            Value::S8(n) => Some(n.into()),
            Value::S16(n) => Some(n.into()),
            Value::S32(n) => Some(n.into()),
            Value::S64(n) => Some(n.into()),
            Value::F32(n) => integral(n.into()),
            Value::F64(n) => integral(n),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::U8(n) => Some(n.into()),
            Value::U16(n) => Some(n.into()),
            Value::U32(n) => Some(n.into()),
            Value::U64(n) => Some(n as f64),
            Value::S8(n) => Some(n.into()),
            Value::S16(n) => Some(n.into()),
            Value::S32(n) => Some(n.into()),
            Value::S64(n) => Some(n as f64),
            Value::F32(n) => Some(n.into()),
            Value::F64(n) => Some(n),
            _ => None,
        }
    }
}

fn integral(n: f64) -> Option<i128> {
    let truncated = n as i128;
    (truncated as f64 == n).then_some(truncated)
}

fn mismatch(expected: &'static str, got: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        got: got.kind(),
    }
}

/// A host-callable function stored in props (event handlers and the like).
///
/// Callbacks compare by identity and are never a zero value.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&[Value]) -> Value>);

impl Callback {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Callback(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl Default for Callback {
    fn default() -> Self {
        Callback::new(|_| Value::Null)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

// ============================================================================
// Primitive conversions
// ============================================================================

macro_rules! int_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self { Value::$variant(v) }
        }

        impl Prop for $ty {
            fn to_prop(&self) -> PropValue<'_> {
                PropValue::Value(Value::$variant(*self))
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                let wide = value.as_i128().ok_or_else(|| mismatch(stringify!($ty), &value))?;
                <$ty>::try_from(wide).map_err(|_| ConversionError::OutOfRange {
                    expected: stringify!($ty),
                    value: wide.to_string(),
                })
            }
        }
    )*};
}

int_conversions! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => S8,
    i16 => S16,
    i32 => S32,
    i64 => S64,
}

impl From<f32> for Value {
    fn from(v: f32) -> Self { Value::F32(v) }
}

impl Prop for f32 {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::F32(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::F32(n) => Ok(n),
            other => {
                let n = other.as_f64().ok_or_else(|| mismatch("f32", &other))?;
                if n.is_finite() && !(f64::from(f32::MIN)..=f64::from(f32::MAX)).contains(&n) {
                    return Err(ConversionError::OutOfRange {
                        expected: "f32",
                        value: n.to_string(),
                    });
                }
                Ok(n as f32)
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::F64(v) }
}

impl Prop for f64 {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::F64(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        value.as_f64().ok_or_else(|| mismatch("f64", &value))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl Prop for bool {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::Bool(*self))
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self { Value::Char(v) }
}

impl Prop for char {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::Char(*self))
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Char(c) => Ok(c),
            // Hosts without a char type hand back one-character strings.
            Value::String(ref s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(mismatch("char", &value)),
                }
            }
            other => Err(mismatch("char", &other)),
        }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::String(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::String(String::from(v)) }
}

impl Prop for String {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::String(self.clone()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self { Value::Map(v) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<HostObject> for Value {
    fn from(v: HostObject) -> Self { Value::Host(v) }
}

impl From<Callback> for Value {
    fn from(v: Callback) -> Self { Value::Callback(v) }
}

// ============================================================================
// Container and pass-through props
// ============================================================================

/// Untyped field: stored as-is, decoded without conversion.
impl Prop for Value {
    fn to_prop(&self) -> PropValue<'_> {
        match self {
            Value::Host(handle) => PropValue::Host(handle),
            Value::Null => PropValue::Nil,
            other => PropValue::Value(other.clone()),
        }
    }

    fn is_zero(&self) -> bool {
        Value::is_zero(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl Prop for Map {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::Map(self.clone()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(ConversionError::ExpectedMap(other.kind())),
        }
    }
}

impl Prop for Callback {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Value(Value::Callback(self.clone()))
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Callback(cb) => Ok(cb),
            other => Err(mismatch("callback", &other)),
        }
    }
}

impl<T: Prop> Prop for Vec<T> {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::List(self.iter().map(Prop::to_prop).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    T::from_value(item).map_err(|e| ConversionError::IndexError(i, Box::new(e)))
                })
                .collect(),
            other => Err(ConversionError::ExpectedList(other.kind())),
        }
    }
}

impl<T: Prop> Prop for Option<T> {
    fn to_prop(&self) -> PropValue<'_> {
        match self {
            Some(inner) => inner.to_prop(),
            None => PropValue::Nil,
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn lookup_update(
        map: &Map,
        field_name: &str,
        tag: &Tag<'_>,
        config: &DecoderConfig,
    ) -> Result<Option<Update<Self>>, ConversionError> {
        match map.get(tag.key(field_name)) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(Update::Replace(None))),
            Some(_) => Ok(T::lookup_update(map, field_name, tag, config)?
                .map(|update| update.lift(Some, option_slot::<T>))),
        }
    }
}

/// A `None` slot is filled with the default before a merge.
fn option_slot<T: Default>(dest: &mut Option<T>) -> &mut T {
    dest.get_or_insert_with(T::default)
}

impl<T: Prop> Prop for Box<T> {
    fn to_prop(&self) -> PropValue<'_> {
        (**self).to_prop()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        T::from_value(value).map(Box::new)
    }

    fn lookup(map: &Map, field_name: &str, tag: &Tag<'_>) -> Result<Option<Self>, ConversionError> {
        Ok(T::lookup(map, field_name, tag)?.map(Box::new))
    }

    fn lookup_update(
        map: &Map,
        field_name: &str,
        tag: &Tag<'_>,
        config: &DecoderConfig,
    ) -> Result<Option<Update<Self>>, ConversionError> {
        Ok(T::lookup_update(map, field_name, tag, config)?.map(|update| update.lift(Box::new, box_slot::<T>)))
    }
}

fn box_slot<T>(dest: &mut Box<T>) -> &mut T {
    dest
}
