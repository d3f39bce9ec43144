//! Codec errors.

use thiserror::Error;
use wire_types::{FourCc, WireError};

/// Error while encoding a host value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The host value has no defined wire mapping. Caller bug.
    #[error("value has no wire mapping: {0}")]
    Unsupported(String),

    /// An encoder may open exactly one container per value.
    #[error("encoder already produced a value")]
    AlreadyEncoded,

    /// The structural encode finished without producing anything.
    #[error("no value was encoded")]
    Empty,

    /// The produced value could not be coerced to the advertised wire
    /// type.
    #[error("cannot coerce {found} to wire type {target}")]
    Coercion { target: FourCc, found: String },

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Error while decoding a tagged value into a host type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The wire value's shape does not match the requested host type.
    /// Never substituted with a default.
    #[error("type mismatch: requested {requested}, found {found}")]
    WrongType {
        requested: &'static str,
        found: String,
    },

    /// A keyed decode asked for a field the record does not carry.
    /// Presence is observable separately via `contains`.
    #[error("record has no field {key}")]
    MissingKey { key: FourCc },

    /// An unkeyed decode read past the end of the list.
    #[error("no more values: item {index} of {len}")]
    NoMoreValues { index: usize, len: usize },

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl DecodeError {
    /// Convenience constructor carrying the offending value's debug
    /// form.
    pub fn wrong_type(requested: &'static str, found: &impl std::fmt::Debug) -> Self {
        DecodeError::WrongType {
            requested,
            found: format!("{found:?}"),
        }
    }
}
