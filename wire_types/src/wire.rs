//! The self-describing wire value tree.
//!
//! This is the surface the external transport serializes: a 4-byte
//! type tag plus either scalar payload bytes, an ordered list of
//! children, or a keyed set of (code, child) pairs. Scalar integers
//! and doubles are big-endian.

use crate::error::WireError;
use crate::four_cc::FourCc;
use serde::{Deserialize, Serialize};

/// Payload of a wire value: exactly one of three shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WirePayload {
    /// Raw scalar bytes interpreted per the type tag.
    Scalar(Vec<u8>),
    /// Ordered children.
    List(Vec<WireValue>),
    /// Keyed children; keys unique, order not significant.
    Record(Vec<(FourCc, WireValue)>),
}

/// A tagged, self-describing wire value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireValue {
    pub type_tag: FourCc,
    pub payload: WirePayload,
}

impl WireValue {
    /// Creates a scalar value.
    pub fn scalar(type_tag: FourCc, bytes: Vec<u8>) -> Self {
        Self {
            type_tag,
            payload: WirePayload::Scalar(bytes),
        }
    }

    /// Creates a zero-payload sentinel value.
    pub fn empty(type_tag: FourCc) -> Self {
        Self::scalar(type_tag, Vec::new())
    }

    /// Creates a list value.
    pub fn list(type_tag: FourCc, items: Vec<WireValue>) -> Self {
        Self {
            type_tag,
            payload: WirePayload::List(items),
        }
    }

    /// Creates a record value. Duplicate keys keep the first write.
    pub fn record(type_tag: FourCc, fields: Vec<(FourCc, WireValue)>) -> Self {
        let mut unique: Vec<(FourCc, WireValue)> = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            if !unique.iter().any(|(existing, _)| *existing == key) {
                unique.push((key, value));
            }
        }
        Self {
            type_tag,
            payload: WirePayload::Record(unique),
        }
    }

    /// Returns the scalar bytes, if this value is scalar-shaped.
    pub fn scalar_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            WirePayload::Scalar(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the ordered children, if this value is list-shaped.
    pub fn items(&self) -> Option<&[WireValue]> {
        match &self.payload {
            WirePayload::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the keyed children, if this value is record-shaped.
    pub fn fields(&self) -> Option<&[(FourCc, WireValue)]> {
        match &self.payload {
            WirePayload::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a record field by key.
    pub fn field(&self, key: FourCc) -> Option<&WireValue> {
        self.fields()?
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    /// Looks up a record field, raising a typed error when absent.
    pub fn required_field(&self, key: FourCc) -> Result<&WireValue, WireError> {
        self.field(key).ok_or(WireError::MissingField {
            record: self.type_tag,
            key,
        })
    }

    fn fixed_bytes<const N: usize>(&self) -> Result<[u8; N], WireError> {
        let bytes = self.scalar_bytes().ok_or_else(|| WireError::Malformed {
            tag: self.type_tag,
            detail: "expected scalar payload".to_string(),
        })?;
        bytes.try_into().map_err(|_| WireError::Malformed {
            tag: self.type_tag,
            detail: format!("expected {} payload bytes, found {}", N, bytes.len()),
        })
    }

    pub fn read_i16(&self) -> Result<i16, WireError> {
        Ok(i16::from_be_bytes(self.fixed_bytes()?))
    }

    pub fn read_i32(&self) -> Result<i32, WireError> {
        Ok(i32::from_be_bytes(self.fixed_bytes()?))
    }

    pub fn read_i64(&self) -> Result<i64, WireError> {
        Ok(i64::from_be_bytes(self.fixed_bytes()?))
    }

    pub fn read_u32(&self) -> Result<u32, WireError> {
        Ok(u32::from_be_bytes(self.fixed_bytes()?))
    }

    pub fn read_u64(&self) -> Result<u64, WireError> {
        Ok(u64::from_be_bytes(self.fixed_bytes()?))
    }

    pub fn read_f64(&self) -> Result<f64, WireError> {
        Ok(f64::from_be_bytes(self.fixed_bytes()?))
    }

    /// Reads a four-char code carried as the scalar payload.
    pub fn read_code(&self) -> Result<FourCc, WireError> {
        Ok(FourCc::new(&self.fixed_bytes::<4>()?))
    }
}
