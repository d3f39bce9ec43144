//! Structural decoding: tagged value → host value.

use crate::error::DecodeError;
use std::any::Any;
use wire_types::{FourCc, Record, Value};

/// A host type that can rebuild itself from a [`Decoder`].
pub trait Decode: Sized {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}

/// Walks one tagged value, handing out container views matching the
/// host type's expected shape. Shape mismatches are typed errors.
pub struct Decoder<'v> {
    value: &'v Value,
}

impl<'v> Decoder<'v> {
    pub fn new(value: &'v Value) -> Self {
        Decoder { value }
    }

    /// The value being decoded, for host types that inspect it raw.
    pub fn value(&self) -> &'v Value {
        self.value
    }

    /// Opens the single-value container.
    pub fn single(&self) -> SingleDecoder<'v> {
        SingleDecoder { value: self.value }
    }

    /// Opens the keyed container; the value must be record-shaped.
    pub fn keyed(&self) -> Result<KeyedDecoder<'v>, DecodeError> {
        match self.value {
            Value::Record(record) => Ok(KeyedDecoder { record }),
            other => Err(DecodeError::wrong_type("record", other)),
        }
    }

    /// Opens the unkeyed container; the value must be list-shaped.
    pub fn unkeyed(&self) -> Result<ListDecoder<'v>, DecodeError> {
        match self.value {
            Value::List(items) => Ok(ListDecoder { items, index: 0 }),
            other => Err(DecodeError::wrong_type("list", other)),
        }
    }
}

/// Reads one scalar with type-specific conversion rules.
pub struct SingleDecoder<'v> {
    value: &'v Value,
}

impl<'v> SingleDecoder<'v> {
    pub fn decode_bool(self) -> Result<bool, DecodeError> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            other => Err(DecodeError::wrong_type("bool", other)),
        }
    }

    /// Exact-fit narrowing across the numeric variants.
    pub fn decode_i32(self) -> Result<i32, DecodeError> {
        Ok(self.value.to_i32()?)
    }

    pub fn decode_i64(self) -> Result<i64, DecodeError> {
        Ok(self.value.to_i64()?)
    }

    /// Numeric conversion, with a fallback reading a symbol's raw
    /// 4-byte code as an unsigned integer. Signature masks travel this
    /// path.
    pub fn decode_u32(self) -> Result<u32, DecodeError> {
        if let Value::Symbol(symbol) = self.value {
            return Ok(symbol.code.as_u32());
        }
        let wide = self.value.to_u64()?;
        u32::try_from(wide).map_err(|_| DecodeError::wrong_type("u32", self.value))
    }

    pub fn decode_u64(self) -> Result<u64, DecodeError> {
        Ok(self.value.to_u64()?)
    }

    /// Doubles pass through; 32-bit integers widen losslessly.
    pub fn decode_f64(self) -> Result<f64, DecodeError> {
        match self.value {
            Value::Double(d) => Ok(*d),
            Value::Int32(n) => Ok(f64::from(*n)),
            other => Err(DecodeError::wrong_type("f64", other)),
        }
    }

    /// Text passes through; opaque scalar bytes are reinterpreted as
    /// UTF-8 so foreign string encodings still surface as text.
    pub fn decode_string(self) -> Result<String, DecodeError> {
        match self.value {
            Value::Text(text) => Ok(text.clone()),
            Value::Opaque(wire) => match wire.scalar_bytes() {
                Some(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
                None => Err(DecodeError::wrong_type("string", self.value)),
            },
            other => Err(DecodeError::wrong_type("string", other)),
        }
    }
}

/// Reads keyed fields from a record-shaped value.
pub struct KeyedDecoder<'v> {
    record: &'v Record,
}

impl<'v> KeyedDecoder<'v> {
    pub fn type_tag(&self) -> FourCc {
        self.record.type_tag
    }

    /// Observes presence without decoding. Absent keys are a distinct
    /// condition from present-but-mismatched values.
    pub fn contains(&self, key: FourCc) -> bool {
        self.record.contains(key)
    }

    /// Decodes a required field; absence is [`DecodeError::MissingKey`].
    pub fn decode_field<T: Decode + Any>(&self, key: FourCc) -> Result<T, DecodeError> {
        match self.record.get(key) {
            Some(value) => crate::decode_value(value),
            None => Err(DecodeError::MissingKey { key }),
        }
    }

    /// Decodes an optional field; absence maps to `None`, a present
    /// field that fails to decode stays an error.
    pub fn decode_optional_field<T: Decode + Any>(
        &self,
        key: FourCc,
    ) -> Result<Option<T>, DecodeError> {
        match self.record.get(key) {
            Some(value) => Ok(Some(crate::decode_value(value)?)),
            None => Ok(None),
        }
    }
}

/// Reads ordered elements from a list-shaped value with a cursor.
///
/// The cursor advances only on a successful decode, so a failed read
/// can be retried with a different host type.
pub struct ListDecoder<'v> {
    items: &'v [Value],
    index: usize,
}

impl<'v> ListDecoder<'v> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    /// Decodes the element under the cursor and advances past it.
    pub fn decode_element<T: Decode + Any>(&mut self) -> Result<T, DecodeError> {
        let value = self.items.get(self.index).ok_or(DecodeError::NoMoreValues {
            index: self.index + 1,
            len: self.items.len(),
        })?;
        let decoded = crate::decode_value(value)?;
        self.index += 1;
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire_types::{codes, Symbol, WireValue};

    #[test]
    fn test_single_numeric_narrowing() {
        let value = Value::Int64(40);
        assert_eq!(Decoder::new(&value).single().decode_i32().unwrap(), 40);
        let big = Value::Int64(i64::from(i32::MAX) + 1);
        assert!(Decoder::new(&big).single().decode_i32().is_err());
    }

    #[test]
    fn test_u32_reads_symbol_code() {
        let value = Value::Symbol(Symbol::enumerated(FourCc::new(b"xyzw")));
        assert_eq!(
            Decoder::new(&value).single().decode_u32().unwrap(),
            FourCc::new(b"xyzw").as_u32()
        );
    }

    #[test]
    fn test_string_reinterprets_opaque_bytes() {
        let value = Value::Opaque(WireValue::scalar(FourCc::new(b"utf8"), b"ok".to_vec()));
        assert_eq!(
            Decoder::new(&value).single().decode_string().unwrap(),
            "ok"
        );
    }

    #[test]
    fn test_keyed_missing_key_is_distinct_from_mismatch() {
        let mut record = Record::new();
        record.insert(codes::KEY_DATA, Value::Text("x".to_string()));
        let value = Value::Record(record);
        let keyed = Decoder::new(&value).keyed().unwrap();
        assert!(keyed.contains(codes::KEY_DATA));
        assert!(matches!(
            keyed.decode_field::<i32>(codes::KEY_WANT_TYPE),
            Err(DecodeError::MissingKey { .. })
        ));
        assert!(matches!(
            keyed.decode_field::<i32>(codes::KEY_DATA),
            Err(DecodeError::Wire(_))
        ));
    }

    #[test]
    fn test_optional_field_absence_is_none() {
        let value = Value::Record(Record::new());
        let keyed = Decoder::new(&value).keyed().unwrap();
        assert_eq!(
            keyed
                .decode_optional_field::<i32>(codes::KEY_DATA)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_list_cursor_advances_only_on_success() {
        let value = Value::List(vec![Value::Text("a".to_string()), Value::Int32(2)]);
        let decoder = Decoder::new(&value);
        let mut list = decoder.unkeyed().unwrap();
        // A failed read leaves the cursor in place.
        assert!(list.decode_element::<i32>().is_err());
        assert_eq!(list.decode_element::<String>().unwrap(), "a");
        assert_eq!(list.decode_element::<i32>().unwrap(), 2);
        assert!(list.at_end());
        assert!(matches!(
            list.decode_element::<i32>(),
            Err(DecodeError::NoMoreValues { index: 3, len: 2 })
        ));
    }

    #[test]
    fn test_shape_mismatch_is_wrong_type() {
        let value = Value::Bool(true);
        assert!(matches!(
            Decoder::new(&value).keyed(),
            Err(DecodeError::WrongType { .. })
        ));
        assert!(matches!(
            Decoder::new(&value).unkeyed(),
            Err(DecodeError::WrongType { .. })
        ));
    }
}
