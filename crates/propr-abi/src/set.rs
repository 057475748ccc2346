//! Multi-entry fields that expand into their parent map

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::record::{Prop, PropValue};
use crate::tag::Tag;
use crate::{ConversionError, Map, Value};

/// A field value that contributes entries directly to the parent map.
///
/// `base` is the field's tag name (options stripped). The converter never
/// calls `expand` with a blank base.
pub trait Set {
    fn expand(&self, base: &str) -> Map;

    /// Standalone representation, used where there is no parent map
    /// (list elements, debugging).
    fn to_value(&self) -> Value;
}

/// Class-name flags, expanded to a single space-separated entry.
///
/// ```ignore
/// #[react("className")]
/// class: ClassSet,   // ClassSet::from_iter(["btn", "active"]) -> {"className": "active btn"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet(BTreeSet<String>);

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, class: impl Into<String>) -> Self {
        self.insert(class);
        self
    }

    pub fn insert(&mut self, class: impl Into<String>) -> bool {
        self.0.insert(class.into())
    }

    pub fn remove(&mut self, class: &str) -> bool {
        self.0.remove(class)
    }

    /// Set or clear a flag.
    pub fn toggle(&mut self, class: impl Into<String>, on: bool) {
        let class = class.into();
        if on {
            self.0.insert(class);
        } else {
            self.0.remove(&class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for ClassSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ClassSet(iter.into_iter().map(Into::into).collect())
    }
}

impl Set for ClassSet {
    fn expand(&self, base: &str) -> Map {
        let mut out = Map::new();
        if !self.is_empty() {
            out.insert(String::from(base), Value::String(self.joined()));
        }
        out
    }

    fn to_value(&self) -> Value {
        Value::String(self.joined())
    }
}

impl Prop for ClassSet {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Set(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(ClassSet::new()),
            Value::String(classes) => Ok(classes.split_whitespace().collect()),
            Value::List(items) => items
                .into_iter()
                .map(String::from_value)
                .collect::<Result<ClassSet, _>>(),
            other => Err(ConversionError::TypeMismatch {
                expected: "class list",
                got: other.kind(),
            }),
        }
    }

    fn lookup(map: &Map, _field_name: &str, tag: &Tag<'_>) -> Result<Option<Self>, ConversionError> {
        let base = tag.name();
        if base.trim().is_empty() {
            return Ok(None);
        }
        map.get(base).cloned().map(Self::from_value).transpose()
    }
}

/// Prefixed attribute bag such as `data-*` or `aria-*`.
///
/// Each entry expands to `"{base}-{key}"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet(BTreeMap<String, Value>);

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Set for DataSet {
    fn expand(&self, base: &str) -> Map {
        self.0
            .iter()
            .map(|(key, value)| (format!("{}-{}", base, key), value.clone()))
            .collect()
    }

    fn to_value(&self) -> Value {
        Value::Map(self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl Prop for DataSet {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::Set(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(DataSet::new()),
            Value::Map(map) => Ok(DataSet(map.into_iter().collect())),
            other => Err(ConversionError::ExpectedMap(other.kind())),
        }
    }

    /// Gathers every `"{base}-*"` entry of the source map.
    fn lookup(map: &Map, _field_name: &str, tag: &Tag<'_>) -> Result<Option<Self>, ConversionError> {
        let base = tag.name();
        if base.trim().is_empty() {
            return Ok(None);
        }
        let prefix = format!("{}-", base);
        let entries: BTreeMap<String, Value> = map
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix.as_str())
                    .map(|rest| (String::from(rest), value.clone()))
            })
            .collect();
        Ok((!entries.is_empty()).then_some(DataSet(entries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_set_joins_flags() {
        let mut classes: ClassSet = ["btn", "active"].into_iter().collect();
        classes.toggle("disabled", false);
        let out = classes.expand("className");
        assert_eq!(out.len(), 1);
        assert_eq!(out["className"], Value::from("active btn"));
    }

    #[test]
    fn empty_class_set_contributes_nothing() {
        assert!(ClassSet::new().expand("class").is_empty());
    }

    #[test]
    fn data_set_prefixes_keys() {
        let data = DataSet::new().with("id", 7u32).with("role", "tab");
        let out = data.expand("data");
        assert_eq!(out.len(), 2);
        assert_eq!(out["data-id"], Value::U32(7));
        assert_eq!(out["data-role"], Value::from("tab"));
    }

    #[test]
    fn data_set_lookup_collects_prefixed_keys() {
        let mut map = Map::new();
        map.insert(String::from("aria-label"), Value::from("Close"));
        map.insert(String::from("aria-hidden"), Value::Bool(false));
        map.insert(String::from("label"), Value::from("ignored"));

        let found = DataSet::lookup(&map, "aria", &Tag::parse("aria")).unwrap().unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found.get("label"), Some(&Value::from("Close")));

        assert_eq!(DataSet::lookup(&map, "data", &Tag::parse("data")), Ok(None));
        assert_eq!(DataSet::lookup(&map, "aria", &Tag::parse(",omitempty")), Ok(None));
    }

    #[test]
    fn class_set_decodes_from_string() {
        let classes = ClassSet::from_value(Value::from("  a  b ")).unwrap();
        assert!(classes.contains("a") && classes.contains("b"));
        assert_eq!(classes.iter().count(), 2);
    }
}
