use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Failure while converting between records and maps.
///
/// Every variant except [`ConversionError::UnsupportedType`] is produced by
/// decoding and is meant to be handled by the caller. `UnsupportedType` is a
/// caller contract violation; [`crate::to_map`] panics with it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A value of the wrong kind for the destination type.
    TypeMismatch { expected: &'static str, got: &'static str },
    /// A numeric value that does not fit the destination type.
    OutOfRange { expected: &'static str, value: String },
    /// Decoding the field stored under this key failed.
    FieldError(String, Box<ConversionError>),
    /// Decoding the list element at this index failed.
    IndexError(usize, Box<ConversionError>),
    /// A map was required (nested record, props, state).
    ExpectedMap(&'static str),
    /// A list was required.
    ExpectedList(&'static str),
    /// Top-level converter input that is neither nil, a record nor a map.
    UnsupportedType(&'static str),
}

impl ConversionError {
    /// The innermost error, following field and index wrappers.
    pub fn root_cause(&self) -> &ConversionError {
        match self {
            Self::FieldError(_, inner) | Self::IndexError(_, inner) => inner.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {}", expected, got)
            }
            Self::OutOfRange { expected, value } => {
                write!(f, "value {} out of range for {}", value, expected)
            }
            Self::FieldError(key, inner) => write!(f, "field '{}': {}", key, inner),
            Self::IndexError(index, inner) => write!(f, "index {}: {}", index, inner),
            Self::ExpectedMap(got) => write!(f, "expected map, got {}", got),
            Self::ExpectedList(got) => write!(f, "expected list, got {}", got),
            Self::UnsupportedType(got) => write!(f, "unsupported type: {}", got),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConversionError {}
