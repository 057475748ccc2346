//! Map -> record decoding

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use tracing::debug;

use crate::record::Prop;
use crate::tag::Tag;
use crate::{ConversionError, Map};

/// Decoder options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Reset fields missing from the source map to their default. When
    /// `false`, missing fields keep their current value.
    pub zero_fields: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { zero_fields: true }
    }
}

/// Deferred assignment of decoded fields onto a record.
pub struct Patch<T>(Box<dyn FnOnce(&mut T)>);

impl<T> Patch<T> {
    pub fn new(apply: impl FnOnce(&mut T) + 'static) -> Self {
        Patch(Box::new(apply))
    }

    pub fn apply(self, dest: &mut T) {
        (self.0)(dest)
    }
}

impl<T> fmt::Debug for Patch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Patch")
    }
}

/// A decoded field value: either a replacement, or a patch merged into the
/// current value (nested records under sparse decoding).
#[derive(Debug)]
pub enum Update<T> {
    Replace(T),
    Merge(Patch<T>),
}

impl<T: 'static> Update<T> {
    pub fn apply(self, dest: &mut T) {
        match self {
            Update::Replace(value) => *dest = value,
            Update::Merge(patch) => patch.apply(dest),
        }
    }

    /// Lift into an update of `U`, reaching the inner value through `project`.
    pub fn lift<U: 'static>(self, wrap: fn(T) -> U, project: fn(&mut U) -> &mut T) -> Update<U> {
        match self {
            Update::Replace(value) => Update::Replace(wrap(value)),
            Update::Merge(patch) => Update::Merge(Patch::new(move |dest: &mut U| patch.apply(project(dest)))),
        }
    }
}

/// A record that can be populated from a map.
///
/// [`FromMap::patch`] decodes every present field before anything is
/// assigned, so a failed decode leaves the destination unchanged. Generated
/// by `#[derive(Record)]`.
pub trait FromMap: Sized + 'static {
    /// Decode `map` into a patch for an existing record.
    fn patch(map: &Map, config: &DecoderConfig) -> Result<Patch<Self>, ConversionError>;

    fn decode_into(&mut self, map: &Map, config: &DecoderConfig) -> Result<(), ConversionError> {
        Self::patch(map, config)?.apply(self);
        Ok(())
    }

    fn from_map(map: &Map) -> Result<Self, ConversionError>
    where
        Self: Default,
    {
        let mut out = Self::default();
        out.decode_into(map, &DecoderConfig::default())?;
        Ok(out)
    }
}

/// Decode a map into a record using the default configuration.
///
/// Fields absent from `map` are reset; keys without a matching field are
/// ignored.
pub fn from_map<T: FromMap>(map: &Map, dest: &mut T) -> Result<(), ConversionError> {
    Decoder::default().decode(map, dest)
}

#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn decode<T: FromMap>(&self, map: &Map, dest: &mut T) -> Result<(), ConversionError> {
        debug!(keys = map.len(), zero_fields = self.config.zero_fields, "decoding map");
        let result = dest.decode_into(map, &self.config);
        if let Err(e) = &result {
            debug!(error = %e, "decode failed");
        }
        result
    }
}

/// Look up and decode one field, attributing errors to its key.
///
/// Used by generated [`FromMap`] implementations.
pub fn decode_field<T: Prop>(
    map: &Map,
    field_name: &'static str,
    tag: &'static str,
    config: &DecoderConfig,
) -> Result<Option<Update<T>>, ConversionError> {
    let tag = Tag::parse(tag);
    T::lookup_update(map, field_name, &tag, config)
        .map_err(|e| ConversionError::FieldError(String::from(tag.key(field_name)), Box::new(e)))
}
