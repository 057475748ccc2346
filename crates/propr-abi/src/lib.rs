//! Props and state marshalling for Rust UI components.
//!
//! A JavaScript component runtime consumes a component's *props* and *state*
//! as plain key/value maps. This crate turns native records into such maps
//! ([`to_map`], [`record_to_map`]) and decodes maps back into records
//! ([`from_map`], [`Decoder`]).
//!
//! ```text
//!   #[derive(Record)] struct  ──record_to_map──▶  Map { "className": "box", .. }
//!            ▲                                          │
//!            └──────────────── from_map ◀───────────────┘
//! ```
//!
//! Field naming and omission follow a tag directive on each field:
//!
//! ```ignore
//! #[derive(Debug, Default, Record)]
//! struct Props {
//!     #[react("className")]
//!     name: String,
//!     #[react("count,omitempty")]
//!     count: i64,
//!     #[react("-")]
//!     scratch: Vec<u8>,
//! }
//! ```
//!
//! Without runtime reflection, every record carries an explicit field table
//! (see [`Record`]), normally generated by `#[derive(Record)]`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// Lets the derive macro's `propr_abi::` paths resolve inside this crate.
extern crate self as propr_abi;

mod convert;
mod decode;
mod error;
mod host;
mod html;
mod record;
mod set;
mod tag;
mod value;

#[cfg(feature = "serde")]
mod serde_impl;

pub use convert::{record_to_map, to_map, try_to_map, Source};
pub use decode::{decode_field, from_map, Decoder, DecoderConfig, FromMap, Patch, Update};
pub use error::ConversionError;
pub use host::{HostHandle, HostObject};
pub use html::{RawHtml, RAW_HTML_FIELD, RAW_HTML_INNER_KEY, RAW_HTML_KEY};
pub use record::{Field, Prop, PropValue, Record};
pub use set::{ClassSet, DataSet, Set};
pub use tag::{Tag, OMIT_EMPTY, SKIP};
pub use value::{Callback, Map, Value};

#[cfg(feature = "derive")]
pub use propr_derive::Record;

/// Items used by generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
    pub use alloc::vec::Vec;
    pub use core::default::Default;
    pub use core::option::Option::{self, None, Some};
    pub use core::result::Result::{self, Err, Ok};
}
