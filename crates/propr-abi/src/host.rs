//! Handles to values owned by the host runtime

use alloc::rc::Rc;
use core::any::Any;
use core::fmt;

use crate::record::{Prop, PropValue};
use crate::{ConversionError, Value};

/// A reference to a value tracked by the host (a JavaScript object, say).
///
/// Null-ness is a host concept, distinct from `Option::None` or
/// [`Value::Null`]: a handle may exist and still refer to the host's null.
pub trait HostHandle: fmt::Debug {
    fn is_null(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug)]
struct NullHandle;

impl HostHandle for NullHandle {
    fn is_null(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared, opaque host handle.
///
/// Handles compare by identity. The default handle is null.
#[derive(Clone)]
pub struct HostObject(Rc<dyn HostHandle>);

impl HostObject {
    pub fn new(handle: impl HostHandle + 'static) -> Self {
        HostObject(Rc::new(handle))
    }

    pub fn null() -> Self {
        HostObject::new(NullHandle)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Live handles are never treated as empty.
    pub fn is_live(&self) -> bool {
        !self.is_null()
    }

    pub fn downcast_ref<T: HostHandle + 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Default for HostObject {
    fn default() -> Self {
        HostObject::null()
    }
}

impl PartialEq for HostObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostObject").field(&self.0).finish()
    }
}

impl Prop for HostObject {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Host(self)
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Host(handle) => Ok(handle),
            Value::Null => Ok(HostObject::null()),
            other => Err(ConversionError::TypeMismatch {
                expected: "host object",
                got: other.kind(),
            }),
        }
    }
}
