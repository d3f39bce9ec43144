//! Four-character codes.
//!
//! The wire schema identifies everything — type tags, record keys,
//! key forms, enumerators, opcodes — by a 4-byte code. Codes whose
//! bytes are printable ASCII display as `'abcd'`; anything else falls
//! back to a hex form.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 4-byte code identifying a type, record key, or enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// Creates a code from its four bytes.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// Creates a code from its big-endian numeric form.
    pub const fn from_u32(raw: u32) -> Self {
        Self(raw.to_be_bytes())
    }

    /// Returns the big-endian numeric form.
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Returns the raw bytes.
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }

    fn is_printable(self) -> bool {
        self.0.iter().all(|b| (0x20..=0x7e).contains(b))
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_printable() {
            let text: String = self.0.iter().map(|&b| b as char).collect();
            write!(f, "'{}'", text)
        } else {
            write!(f, "0x{:08X}", self.as_u32())
        }
    }
}

// Serialized as a string so codes stay readable in JSON snapshots and
// stay usable as record-map keys.
impl Serialize for FourCc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_printable() {
            let text: String = self.0.iter().map(|&b| b as char).collect();
            serializer.serialize_str(&text)
        } else {
            serializer.serialize_str(&format!("0x{:08X}", self.as_u32()))
        }
    }
}

struct FourCcVisitor;

impl Visitor<'_> for FourCcVisitor {
    type Value = FourCc;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a four-character code or 0x-prefixed hex form")
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<FourCc, E> {
        if let Some(hex) = text.strip_prefix("0x") {
            let raw = u32::from_str_radix(hex, 16)
                .map_err(|_| E::custom(format!("invalid hex four-char code: {text}")))?;
            return Ok(FourCc::from_u32(raw));
        }
        let bytes = text.as_bytes();
        if bytes.len() != 4 {
            return Err(E::custom(format!("four-char code must be 4 bytes: {text:?}")));
        }
        Ok(FourCc::new(&[bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl<'de> Deserialize<'de> for FourCc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(FourCcVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_round_trip() {
        let code = FourCc::new(b"want");
        assert_eq!(FourCc::from_u32(code.as_u32()), code);
    }

    #[test]
    fn test_display_printable() {
        assert_eq!(FourCc::new(b"obj ").to_string(), "'obj '");
    }

    #[test]
    fn test_display_non_printable() {
        assert_eq!(FourCc::from_u32(0x0001_0002).to_string(), "0x00010002");
    }

    #[test]
    fn test_serde_string_form() {
        let code = FourCc::new(b"seld");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"seld\"");
        let back: FourCc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn test_serde_hex_form() {
        let code = FourCc::from_u32(7);
        let json = serde_json::to_string(&code).unwrap();
        let back: FourCc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }
}
