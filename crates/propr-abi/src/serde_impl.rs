//! `serde::Serialize` for values handed to a host that speaks serde.

use serde::ser::{Error, SerializeMap, SerializeSeq, Serialize, Serializer};

use crate::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::U8(n) => serializer.serialize_u8(*n),
            Value::U16(n) => serializer.serialize_u16(*n),
            Value::U32(n) => serializer.serialize_u32(*n),
            Value::U64(n) => serializer.serialize_u64(*n),
            Value::S8(n) => serializer.serialize_i8(*n),
            Value::S16(n) => serializer.serialize_i16(*n),
            Value::S32(n) => serializer.serialize_i32(*n),
            Value::S64(n) => serializer.serialize_i64(*n),
            Value::F32(n) => serializer.serialize_f32(*n),
            Value::F64(n) => serializer.serialize_f64(*n),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            // Null handles carry nothing host-specific.
            Value::Host(handle) if handle.is_null() => serializer.serialize_unit(),
            Value::Host(_) => Err(S::Error::custom("host objects cannot be serialized")),
            Value::Callback(_) => Err(S::Error::custom("callbacks cannot be serialized")),
        }
    }
}
