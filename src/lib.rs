//! propr: props and state marshalling for Rust UI components
//!
//! Components written in Rust hand their props and state to a JavaScript UI
//! runtime as plain key/value maps, and read them back the same way. This
//! crate wires the converter and decoder from [`propr_abi`] to the host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                 propr                   │
//! │                                         │
//! │  component - props/state -> records     │
//! │  host      - host capabilities          │
//! │  json      - serde_json reference host  │
//! │                                         │
//! ├─────────────────────────────────────────┤
//! │  propr-abi: Value, to_map, from_map     │
//! │  propr-derive: #[derive(Record)]        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use propr::{unmarshal_state, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct Counter {
//!     #[react("count")]
//!     count: i64,
//! }
//!
//! let mut state = Counter::default();
//! unmarshal_state(&this, &mut state)?;
//! state.count += 1;
//! let next = state.to_map();
//! ```
//!
//! Generated code refers to `propr_abi`, so crates deriving `Record` depend on
//! `propr-abi` as well.

pub mod component;
pub mod error;
pub mod host;
pub mod json;

pub use component::{
    unmarshal_props, unmarshal_state, Component, Snapshot, PROPS_KEY, STATE_KEY,
};
#[allow(deprecated)]
pub use component::{hydrate_props, hydrate_state};
pub use error::{Error, HostError};
pub use host::{json_unmarshal, Host};
pub use json::{to_json, value_from_json, JsonHost};

pub use propr_abi::{
    from_map, record_to_map, to_map, try_to_map, Callback, ClassSet, ConversionError, DataSet,
    Decoder, DecoderConfig, Field, FromMap, HostHandle, HostObject, Map, Patch, Prop, PropValue,
    RawHtml, Record, Set, Source, Tag, Update, Value, RAW_HTML_KEY,
};
