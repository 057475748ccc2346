//! Record -> map conversion

use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;

use crate::html::{self, RAW_HTML_FIELD, RAW_HTML_KEY};
use crate::record::{PropValue, Record};
use crate::{ConversionError, HostObject, Map, Value};

/// Input accepted by [`to_map`].
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Nil,
    Record(&'a dyn Record),
    /// An already-built map, passed through.
    Map(&'a Map),
    Host(&'a HostObject),
    Value(&'a Value),
}

impl<'a> Source<'a> {
    /// `None` is treated as nil, like a null record pointer.
    pub fn from_option(record: Option<&'a dyn Record>) -> Self {
        record.map_or(Source::Nil, Source::Record)
    }
}

impl<'a> From<&'a Map> for Source<'a> {
    fn from(map: &'a Map) -> Self {
        Source::Map(map)
    }
}

impl<'a> From<&'a Value> for Source<'a> {
    fn from(value: &'a Value) -> Self {
        Source::Value(value)
    }
}

impl<'a> From<&'a HostObject> for Source<'a> {
    fn from(handle: &'a HostObject) -> Self {
        Source::Host(handle)
    }
}

/// Convert a record, or pass through a map.
///
/// Nil input and null host handles yield `None`, never an empty map.
///
/// # Panics
///
/// On input that is neither nil, a record nor a map; see [`try_to_map`].
pub fn to_map<'a>(source: impl Into<Source<'a>>) -> Option<Map> {
    match try_to_map(source) {
        Ok(map) => map,
        Err(e) => panic!("to_map: {}", e),
    }
}

/// Non-panicking form of [`to_map`].
pub fn try_to_map<'a>(source: impl Into<Source<'a>>) -> Result<Option<Map>, ConversionError> {
    match source.into() {
        Source::Nil => Ok(None),
        Source::Host(handle) if handle.is_null() => Ok(None),
        Source::Host(_) => Err(ConversionError::UnsupportedType("host object")),
        Source::Record(record) => Ok(Some(record_to_map(record))),
        Source::Map(map) => Ok(Some(map.clone())),
        Source::Value(value) => match value {
            Value::Null => Ok(None),
            Value::Host(handle) if handle.is_null() => Ok(None),
            Value::Map(map) => Ok(Some(map.clone())),
            other => Err(ConversionError::UnsupportedType(other.kind())),
        },
    }
}

/// Walk a record's field table and build its map.
pub fn record_to_map(record: &dyn Record) -> Map {
    let mut out = Map::new();

    for field in record.fields() {
        let tag = field.directive();

        if tag.is_skip() {
            trace!(record = record.type_name(), field = field.name, "skipped");
            continue;
        }

        // Live host handles are present whatever their contents.
        if tag.omit_empty() && !field.value.is_live_host() && (field.zero || field.value.is_nil()) {
            trace!(record = record.type_name(), field = field.name, "omitted empty");
            continue;
        }

        if let PropValue::Set(set) = field.value {
            let base = tag.name();
            if base.trim().is_empty() {
                trace!(record = record.type_name(), field = field.name, "set without base key");
                continue;
            }
            out.extend(set.expand(base));
            continue;
        }

        let key = tag.key(field.name);

        if field.name == RAW_HTML_FIELD && key == RAW_HTML_KEY {
            let markup = match field.value {
                PropValue::RawHtml(raw) => Value::String(raw.render()),
                other => prop_to_value(other),
            };
            out.insert(String::from(RAW_HTML_KEY), html::wrap(markup));
            continue;
        }

        out.insert(String::from(key), prop_to_value(field.value));
    }

    out
}

fn prop_to_value(prop: PropValue<'_>) -> Value {
    match prop {
        PropValue::Value(value) => value,
        PropValue::Record(record) => Value::Map(record_to_map(record)),
        PropValue::List(items) => Value::List(items.into_iter().map(prop_to_value).collect::<Vec<_>>()),
        PropValue::Set(set) => set.to_value(),
        PropValue::RawHtml(raw) => Value::String(raw.render()),
        PropValue::Host(handle) => Value::Host(handle.clone()),
        PropValue::Nil => Value::Null,
    }
}
