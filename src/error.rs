//! Error types for host integration

use propr_abi::ConversionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Decode failed: {0}")]
    Decode(#[from] ConversionError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Component {key} is not a map (got {got})")]
    NotAMap { key: &'static str, got: &'static str },
}

/// Failures reported by a [`crate::Host`].
#[derive(Error, Debug)]
pub enum HostError {
    #[error("JSON parse failed: {0}")]
    Parse(String),

    #[error("JSON parse produced null")]
    NullResult,

    #[error("Value cannot be handed to the host: {0}")]
    Unrepresentable(String),
}
