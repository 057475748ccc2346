//! Host capabilities
//!
//! The UI runtime owns JSON parsing and the component instances; this crate
//! only calls into it. [`crate::JsonHost`] is a reference implementation.

use propr_abi::Value;

use crate::{Error, HostError};

/// Services provided by the host environment.
pub trait Host {
    /// Parse JSON text into a host-native value.
    fn json_parse(&self, json: &str) -> Result<Value, HostError>;
}

/// Parse JSON through the host's native parser.
///
/// A parse that yields nothing usable (`null`, or a null host handle) is an
/// error.
pub fn json_unmarshal<H: Host + ?Sized>(host: &H, json: &str) -> Result<Value, Error> {
    let value = host.json_parse(json)?;
    match &value {
        Value::Null => Err(HostError::NullResult.into()),
        Value::Host(handle) if handle.is_null() => Err(HostError::NullResult.into()),
        _ => Ok(value),
    }
}
