//! `Encode`/`Decode` implementations for the built-in host types.

use crate::decode::{Decode, Decoder};
use crate::encode::{Encode, Encoder};
use crate::error::{DecodeError, EncodeError};
use std::any::Any;
use wire_types::{
    codes, Color, FileRef, FourCc, Point, Query, Rect, Symbol, TestClause, Timestamp, Value,
    WireValue,
};

/// An uninterpreted byte buffer carrying its own wire type tag.
///
/// Blobs are intrinsic: they bypass structural walking entirely, so
/// the bytes and the tag cross the wire verbatim in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub type_tag: FourCc,
    pub bytes: Vec<u8>,
}

impl Blob {
    /// Creates a blob under the generic raw-data tag.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            type_tag: codes::TYPE_RAW_DATA,
            bytes,
        }
    }

    /// Creates a blob under an explicit wire type tag.
    pub fn with_tag(type_tag: FourCc, bytes: Vec<u8>) -> Self {
        Self { type_tag, bytes }
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Opaque(WireValue::scalar(self.type_tag, self.bytes.clone()))
    }
}

// ----- intrinsic parsers (shared with the handler table) -----

pub(crate) fn parse_blob(value: &Value) -> Result<Blob, DecodeError> {
    let wire = value.to_wire();
    match wire.scalar_bytes() {
        Some(bytes) => Ok(Blob::with_tag(wire.type_tag, bytes.to_vec())),
        None => Err(DecodeError::wrong_type("blob", value)),
    }
}

pub(crate) fn parse_timestamp(value: &Value) -> Result<Timestamp, DecodeError> {
    match value {
        Value::Timestamp(stamp) => Ok(*stamp),
        Value::Opaque(wire) => Ok(Timestamp(wire.read_i64()?)),
        other => Err(DecodeError::wrong_type("timestamp", other)),
    }
}

pub(crate) fn parse_point(value: &Value) -> Result<Point, DecodeError> {
    match value {
        Value::Point(point) => Ok(*point),
        // Wire order is y then x.
        Value::Opaque(wire) => match wire.scalar_bytes() {
            Some([y0, y1, x0, x1]) => Ok(Point {
                x: i16::from_be_bytes([*x0, *x1]),
                y: i16::from_be_bytes([*y0, *y1]),
            }),
            _ => Err(DecodeError::wrong_type("point", value)),
        },
        other => Err(DecodeError::wrong_type("point", other)),
    }
}

pub(crate) fn parse_rect(value: &Value) -> Result<Rect, DecodeError> {
    match value {
        Value::Rect(rect) => Ok(*rect),
        // Wire order is y0,x0,y1,x1.
        Value::Opaque(wire) => match wire.scalar_bytes() {
            Some([a0, a1, b0, b1, c0, c1, d0, d1]) => Ok(Rect {
                y0: i16::from_be_bytes([*a0, *a1]),
                x0: i16::from_be_bytes([*b0, *b1]),
                y1: i16::from_be_bytes([*c0, *c1]),
                x1: i16::from_be_bytes([*d0, *d1]),
            }),
            _ => Err(DecodeError::wrong_type("rect", value)),
        },
        other => Err(DecodeError::wrong_type("rect", other)),
    }
}

// ----- scalars -----

impl Encode for bool {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_bool(*self)
    }
}

impl Decode for bool {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_bool()
    }
}

impl Encode for i16 {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_i32(i32::from(*self))
    }
}

impl Decode for i16 {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let wide = decoder.single().decode_i32()?;
        i16::try_from(wide).map_err(|_| DecodeError::wrong_type("i16", decoder.value()))
    }
}

impl Encode for i32 {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_i32(*self)
    }
}

impl Decode for i32 {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_i32()
    }
}

impl Encode for i64 {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_i64(*self)
    }
}

impl Decode for i64 {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_i64()
    }
}

impl Encode for u32 {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_u64(u64::from(*self))
    }
}

impl Decode for u32 {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_u32()
    }
}

impl Encode for u64 {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_u64(*self)
    }
}

impl Decode for u64 {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_u64()
    }
}

impl Encode for f64 {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_f64(*self)
    }
}

impl Decode for f64 {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_f64()
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().encode_str(self)
    }
}

impl Decode for String {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single().decode_string()
    }
}

// ----- containers -----

impl<T: Encode + Any> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        let mut list = encoder.unkeyed();
        for item in self {
            list.encode_element(item)?;
        }
        list.finish()
    }
}

impl<T: Decode + Any> Decode for Vec<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut list = decoder.unkeyed()?;
        let mut items = Vec::with_capacity(list.len());
        while !list.at_end() {
            items.push(list.decode_element()?);
        }
        Ok(items)
    }
}

impl<T: Encode + Any> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        match self {
            Some(value) => encoder.single().encode_nested(value),
            None => encoder.single().encode_missing(),
        }
    }
}

impl<T: Decode + Any> Decode for Option<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Missing => Ok(None),
            value => Ok(Some(crate::decode_value(value)?)),
        }
    }
}

// ----- schema types -----

impl Encode for Value {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(self.clone())
    }
}

impl Decode for Value {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(decoder.value().clone())
    }
}

impl Encode for Query {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Query(self.clone()))
    }
}

impl Decode for Query {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Query(query) => Ok(query.clone()),
            Value::Opaque(wire) => Ok(Query::from_wire(wire)?),
            other => Err(DecodeError::wrong_type("query", other)),
        }
    }
}

impl Encode for TestClause {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Test(self.clone()))
    }
}

impl Decode for TestClause {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Test(test) => Ok(test.clone()),
            Value::Opaque(wire) => Ok(TestClause::from_wire(wire)?),
            other => Err(DecodeError::wrong_type("test clause", other)),
        }
    }
}

impl Encode for Symbol {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Symbol(*self))
    }
}

impl Decode for Symbol {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Symbol(symbol) => Ok(*symbol),
            Value::Opaque(wire) => Ok(Symbol {
                code: wire.read_code()?,
                type_tag: wire.type_tag,
            }),
            other => Err(DecodeError::wrong_type("symbol", other)),
        }
    }
}

impl Encode for FourCc {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Symbol(Symbol::typed(*self)))
    }
}

impl Decode for FourCc {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Symbol::decode(decoder)?.code)
    }
}

impl Encode for FileRef {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::FileRef(self.clone()))
    }
}

impl Decode for FileRef {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::FileRef(file) => Ok(file.clone()),
            Value::Text(text) => Ok(FileRef(text.clone())),
            other => Err(DecodeError::wrong_type("file reference", other)),
        }
    }
}

impl Encode for Color {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Color(*self))
    }
}

impl Decode for Color {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Color(color) => Ok(*color),
            Value::Opaque(wire) => match wire.scalar_bytes() {
                Some([r0, r1, g0, g1, b0, b1]) => Ok(Color {
                    red: u16::from_be_bytes([*r0, *r1]),
                    green: u16::from_be_bytes([*g0, *g1]),
                    blue: u16::from_be_bytes([*b0, *b1]),
                }),
                _ => Err(DecodeError::wrong_type("color", decoder.value())),
            },
            other => Err(DecodeError::wrong_type("color", other)),
        }
    }
}

// ----- intrinsics -----
//
// The handler table intercepts these before the structural walk; the
// trait impls exist so they satisfy the entry-point bounds and behave
// identically if called directly.

impl Encode for Blob {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(self.to_value())
    }
}

impl Decode for Blob {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        parse_blob(decoder.value())
    }
}

impl Encode for Timestamp {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Timestamp(*self))
    }
}

impl Decode for Timestamp {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        parse_timestamp(decoder.value())
    }
}

impl Encode for Point {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Point(*self))
    }
}

impl Decode for Point {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        parse_point(decoder.value())
    }
}

impl Encode for Rect {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.single().emit(Value::Rect(*self))
    }
}

impl Decode for Rect {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        parse_rect(decoder.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_value, encode_value};

    #[test]
    fn test_blob_preserves_tag_and_bytes() {
        let blob = Blob::with_tag(FourCc::new(b"PICT"), vec![9, 8, 7]);
        let encoded = encode_value(&blob).unwrap();
        match &encoded {
            Value::Opaque(wire) => {
                assert_eq!(wire.type_tag, FourCc::new(b"PICT"));
                assert_eq!(wire.scalar_bytes().unwrap(), [9, 8, 7]);
            }
            other => panic!("expected opaque, got {other:?}"),
        }
        assert_eq!(decode_value::<Blob>(&encoded).unwrap(), blob);
    }

    #[test]
    fn test_blob_reads_any_scalar() {
        let encoded = encode_value(&42i32).unwrap();
        let blob = decode_value::<Blob>(&encoded).unwrap();
        assert_eq!(blob.type_tag, codes::TYPE_SINT32);
        assert_eq!(blob.bytes, 42i32.to_be_bytes());
    }

    #[test]
    fn test_point_from_wire_bytes() {
        // y=1, x=2 in wire order.
        let wire = WireValue::scalar(codes::TYPE_POINT, vec![0, 1, 0, 2]);
        let point = decode_value::<Point>(&Value::Opaque(wire)).unwrap();
        assert_eq!(point, Point { x: 2, y: 1 });
    }

    #[test]
    fn test_rect_from_wire_bytes() {
        let wire = WireValue::scalar(codes::TYPE_RECT, vec![0, 1, 0, 2, 0, 3, 0, 4]);
        let rect = decode_value::<Rect>(&Value::Opaque(wire)).unwrap();
        assert_eq!(
            rect,
            Rect {
                y0: 1,
                x0: 2,
                y1: 3,
                x1: 4
            }
        );
    }

    #[test]
    fn test_vec_round_trip() {
        let items = vec![1i32, 2, 3];
        let encoded = encode_value(&items).unwrap();
        assert_eq!(decode_value::<Vec<i32>>(&encoded).unwrap(), items);
    }

    #[test]
    fn test_option_maps_to_missing() {
        let absent: Option<i32> = None;
        let encoded = encode_value(&absent).unwrap();
        assert_eq!(encoded, Value::Missing);
        assert_eq!(decode_value::<Option<i32>>(&encoded).unwrap(), None);
        let present = encode_value(&Some(5i32)).unwrap();
        assert_eq!(decode_value::<Option<i32>>(&present).unwrap(), Some(5));
    }

    #[test]
    fn test_query_decodes_from_opaque_wire_form() {
        let query = Query::app_root().by_name(FourCc::new(b"docu"), "report");
        let wire = query.to_wire();
        let decoded = decode_value::<Query>(&Value::Opaque(wire)).unwrap();
        assert_eq!(decoded, query);
    }

    #[test]
    fn test_symbol_decodes_from_opaque_code() {
        let wire = WireValue::scalar(codes::TYPE_ENUMERATED, b"yes ".to_vec());
        let symbol = decode_value::<Symbol>(&Value::Opaque(wire)).unwrap();
        assert_eq!(symbol.code, FourCc::new(b"yes "));
        assert_eq!(symbol.type_tag, codes::TYPE_ENUMERATED);
    }

    #[test]
    fn test_i16_narrows_on_decode() {
        let encoded = encode_value(&300i16).unwrap();
        assert_eq!(encoded, Value::Int32(300));
        assert_eq!(decode_value::<i16>(&encoded).unwrap(), 300);
        let wide = Value::Int32(40_000);
        assert!(decode_value::<i16>(&wide).is_err());
    }

    #[test]
    fn test_required_type_applies_after_structural_encode() {
        struct Styled(String);
        impl Encode for Styled {
            fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
                encoder.single().encode_str(&self.0)
            }
            fn required_type(&self) -> Option<FourCc> {
                Some(FourCc::new(b"STXT"))
            }
        }
        let encoded = encode_value(&Styled("hi".to_string())).unwrap();
        match encoded {
            Value::Opaque(wire) => {
                assert_eq!(wire.type_tag, FourCc::new(b"STXT"));
                assert_eq!(wire.scalar_bytes().unwrap(), b"hi");
            }
            other => panic!("expected opaque, got {other:?}"),
        }
    }
}
