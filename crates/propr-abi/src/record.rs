//! Field tables: the schema a record exposes to the converter

use alloc::vec::Vec;
use core::fmt;

use crate::html::RawHtml;
use crate::host::HostObject;
use crate::set::Set;
use crate::tag::Tag;
use crate::decode::{DecoderConfig, Update};
use crate::{ConversionError, Map, Value};

/// A structured value with named, tagged fields.
///
/// Implementations list their fields in declaration order. `#[derive(Record)]`
/// generates this from `#[react("...")]` attributes; hand-written
/// implementations may also list `-` tagged fields, which the converter drops.
pub trait Record {
    fn type_name(&self) -> &'static str;

    fn fields(&self) -> Vec<Field<'_>>;

    /// Convert into a props/state map. See [`crate::record_to_map`].
    fn to_map(&self) -> Map
    where
        Self: Sized,
    {
        crate::record_to_map(self)
    }
}

impl fmt::Debug for dyn Record + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({})", self.type_name())
    }
}

/// One entry of a record's field table.
#[derive(Debug)]
pub struct Field<'a> {
    /// Declared field name.
    pub name: &'static str,
    /// Raw tag directive, `""` when the field has none.
    pub tag: &'static str,
    /// Whether the value equals its type's zero value.
    pub zero: bool,
    pub value: PropValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new<T: Prop>(name: &'static str, tag: &'static str, value: &'a T) -> Self {
        Field {
            name,
            tag,
            zero: value.is_zero(),
            value: value.to_prop(),
        }
    }

    pub fn directive(&self) -> Tag<'static> {
        Tag::parse(self.tag)
    }
}

/// What the converter sees for a field value.
pub enum PropValue<'a> {
    /// Stored as-is.
    Value(Value),
    /// Converted into a nested map.
    Record(&'a dyn Record),
    /// Ordered sequence, converted element by element.
    List(Vec<PropValue<'a>>),
    /// Expanded into zero or more entries of the parent map.
    Set(&'a dyn Set),
    RawHtml(&'a RawHtml),
    /// Host-owned value, never converted.
    Host(&'a HostObject),
    /// Absent value (`None`).
    Nil,
}

impl PropValue<'_> {
    pub fn is_live_host(&self) -> bool {
        matches!(self, PropValue::Host(handle) if handle.is_live())
    }

    /// `None`, `Value::Null` or a null host handle.
    pub fn is_nil(&self) -> bool {
        match self {
            PropValue::Nil | PropValue::Value(Value::Null) => true,
            PropValue::Host(handle) => handle.is_null(),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            PropValue::Record(r) => f.debug_tuple("Record").field(&r.type_name()).finish(),
            PropValue::List(items) => f.debug_tuple("List").field(items).finish(),
            PropValue::Set(set) => f.debug_tuple("Set").field(&set.to_value()).finish(),
            PropValue::RawHtml(html) => f.debug_tuple("RawHtml").field(html).finish(),
            PropValue::Host(handle) => f.debug_tuple("Host").field(handle).finish(),
            PropValue::Nil => f.write_str("Nil"),
        }
    }
}

/// A type that can appear as a record field.
pub trait Prop: Sized + Default + 'static {
    fn to_prop(&self) -> PropValue<'_>;

    /// Whether `self` equals the type's zero value. Only comparable state is
    /// considered; function values are never zero.
    fn is_zero(&self) -> bool;

    fn from_value(value: Value) -> Result<Self, ConversionError>;

    /// Find and decode this field in a source map.
    ///
    /// Returns `Ok(None)` when the map has no entry for the field. A `null`
    /// entry decodes to the default value.
    fn lookup(map: &Map, field_name: &str, tag: &Tag<'_>) -> Result<Option<Self>, ConversionError> {
        match map.get(tag.key(field_name)) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(Self::default())),
            Some(value) => Self::from_value(value.clone()).map(Some),
        }
    }

    /// Find and decode this field as an update to its current value.
    ///
    /// Replaces the value by default. Records override this to merge into
    /// the current value when `config.zero_fields` is off.
    fn lookup_update(
        map: &Map,
        field_name: &str,
        tag: &Tag<'_>,
        _config: &DecoderConfig,
    ) -> Result<Option<Update<Self>>, ConversionError> {
        Ok(Self::lookup(map, field_name, tag)?.map(Update::Replace))
    }
}
