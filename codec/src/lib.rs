//! # Structural Codec
//!
//! This crate bridges host values to and from the tagged value model
//! without dynamic introspection of the host type system.
//!
//! ## Philosophy
//!
//! - **Structure over reflection**: a host value describes itself by
//!   opening exactly one of three containers (single, keyed, unkeyed)
//! - **Intrinsics first**: a small closed table of wire-exact types
//!   (raw bytes, timestamp, point, rect) bypasses structural walking
//!   entirely, so their wire semantics cannot degrade
//! - **No silent defaults**: every shape mismatch is a typed error
//!   carrying the offending value's debug form
//!
//! ## Architecture
//!
//! [`encode_value`] and [`decode_value`] are the only entry points.
//! Both consult the intrinsic handler table before structural
//! dispatch, then hand the value an [`Encoder`] or [`Decoder`] to walk
//! its own structure.

pub mod decode;
pub mod encode;
pub mod error;
mod impls;
mod intrinsic;

pub use decode::{Decode, Decoder, KeyedDecoder, ListDecoder, SingleDecoder};
pub use encode::{Encode, Encoder, KeyedEncoder, ListEncoder, SingleEncoder};
pub use error::{DecodeError, EncodeError};
pub use impls::Blob;

use std::any::Any;
use wire_types::Value;

/// Encodes a host value into a tagged value.
///
/// Intrinsic types (raw bytes, timestamp, point, rect) encode directly
/// to their wire descriptor form; everything else encodes through its
/// own structural [`Encode`] implementation, after which any
/// advertised required wire type is applied by coercion.
pub fn encode_value<T>(value: &T) -> Result<Value, EncodeError>
where
    T: Encode + Any,
{
    if let Some(encoded) = intrinsic::encode(value) {
        return Ok(encoded);
    }
    let mut encoder = Encoder::new();
    value.encode(&mut encoder)?;
    let produced = encoder.finish()?;
    match value.required_type() {
        Some(type_tag) => encode::coerce(produced, type_tag),
        None => Ok(produced),
    }
}

/// Decodes a tagged value into a host value.
///
/// Dispatches on the target host type first: intrinsic targets read
/// the wire value as that intrinsic type regardless of its declared
/// shape; everything else decodes through its structural [`Decode`]
/// implementation.
pub fn decode_value<T>(value: &Value) -> Result<T, DecodeError>
where
    T: Decode + Any,
{
    if let Some(decoded) = intrinsic::decode::<T>(value) {
        return decoded;
    }
    let mut decoder = Decoder::new(value);
    T::decode(&mut decoder)
}
