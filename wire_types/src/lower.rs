//! Lowering and lifting between [`Value`] and [`WireValue`].
//!
//! Lowering is total: every variant has exactly one wire spelling.
//! Lifting dispatches on the type tag; unrecognized tags lift to
//! [`Value::Opaque`], while malformed payloads under a recognized tag
//! are errors.

use crate::codes;
use crate::error::WireError;
use crate::query::Query;
use crate::test_clause::TestClause;
use crate::value::{Color, FileRef, Point, Record, Rect, Symbol, Timestamp, Value};
use crate::wire::{WirePayload, WireValue};

impl Value {
    /// Lowers this value to its self-describing wire form.
    pub fn to_wire(&self) -> WireValue {
        match self {
            Value::Opaque(wire) => wire.clone(),
            Value::Query(query) => query.to_wire(),
            Value::Test(test) => test.to_wire(),
            Value::Missing => WireValue::scalar(
                codes::TYPE_TYPE,
                codes::CODE_MISSING_VALUE.bytes().to_vec(),
            ),
            Value::Symbol(symbol) => {
                WireValue::scalar(symbol.type_tag, symbol.code.bytes().to_vec())
            }
            Value::Bool(flag) => WireValue::scalar(codes::TYPE_BOOLEAN, vec![u8::from(*flag)]),
            Value::Int32(n) => WireValue::scalar(codes::TYPE_SINT32, n.to_be_bytes().to_vec()),
            Value::Int64(n) => WireValue::scalar(codes::TYPE_SINT64, n.to_be_bytes().to_vec()),
            Value::UInt64(n) => WireValue::scalar(codes::TYPE_UINT64, n.to_be_bytes().to_vec()),
            Value::Double(n) => {
                WireValue::scalar(codes::TYPE_FLOAT64, n.to_be_bytes().to_vec())
            }
            Value::Text(text) => {
                WireValue::scalar(codes::TYPE_UTF8_TEXT, text.as_bytes().to_vec())
            }
            Value::Timestamp(Timestamp(seconds)) => {
                WireValue::scalar(codes::TYPE_TIMESTAMP, seconds.to_be_bytes().to_vec())
            }
            Value::List(items) => WireValue::list(
                codes::TYPE_LIST,
                items.iter().map(Value::to_wire).collect(),
            ),
            Value::Record(record) => WireValue::record(
                record.type_tag,
                record
                    .fields
                    .iter()
                    .map(|(key, value)| (*key, value.to_wire()))
                    .collect(),
            ),
            Value::FileRef(FileRef(url)) => {
                WireValue::scalar(codes::TYPE_FILE_URL, url.as_bytes().to_vec())
            }
            Value::Point(point) => {
                let mut bytes = Vec::with_capacity(4);
                bytes.extend_from_slice(&point.y.to_be_bytes());
                bytes.extend_from_slice(&point.x.to_be_bytes());
                WireValue::scalar(codes::TYPE_POINT, bytes)
            }
            Value::Rect(rect) => {
                let mut bytes = Vec::with_capacity(8);
                bytes.extend_from_slice(&rect.y0.to_be_bytes());
                bytes.extend_from_slice(&rect.x0.to_be_bytes());
                bytes.extend_from_slice(&rect.y1.to_be_bytes());
                bytes.extend_from_slice(&rect.x1.to_be_bytes());
                WireValue::scalar(codes::TYPE_RECT, bytes)
            }
            Value::Color(color) => {
                let mut bytes = Vec::with_capacity(6);
                bytes.extend_from_slice(&color.red.to_be_bytes());
                bytes.extend_from_slice(&color.green.to_be_bytes());
                bytes.extend_from_slice(&color.blue.to_be_bytes());
                WireValue::scalar(codes::TYPE_RGB_COLOR, bytes)
            }
        }
    }

    /// Lifts a wire value into the typed union.
    pub fn from_wire(wire: &WireValue) -> Result<Value, WireError> {
        match wire.type_tag {
            t if t == codes::TYPE_BOOLEAN => {
                let bytes = wire.scalar_bytes().unwrap_or(&[]);
                match bytes {
                    [flag] => Ok(Value::Bool(*flag != 0)),
                    _ => Err(WireError::Malformed {
                        tag: wire.type_tag,
                        detail: format!("boolean payload of {} bytes", bytes.len()),
                    }),
                }
            }
            t if t == codes::TYPE_TRUE => Ok(Value::Bool(true)),
            t if t == codes::TYPE_FALSE => Ok(Value::Bool(false)),
            t if t == codes::TYPE_SINT16 => Ok(Value::Int32(i32::from(wire.read_i16()?))),
            t if t == codes::TYPE_SINT32 => Ok(Value::Int32(wire.read_i32()?)),
            t if t == codes::TYPE_SINT64 => Ok(Value::Int64(wire.read_i64()?)),
            t if t == codes::TYPE_UINT32 => Ok(Value::UInt64(u64::from(wire.read_u32()?))),
            t if t == codes::TYPE_UINT64 => Ok(Value::UInt64(wire.read_u64()?)),
            t if t == codes::TYPE_FLOAT64 => Ok(Value::Double(wire.read_f64()?)),
            t if t == codes::TYPE_UTF8_TEXT => {
                let bytes = wire.scalar_bytes().ok_or_else(|| WireError::Malformed {
                    tag: wire.type_tag,
                    detail: "text payload must be scalar".to_string(),
                })?;
                let text = String::from_utf8(bytes.to_vec()).map_err(|err| {
                    WireError::Malformed {
                        tag: wire.type_tag,
                        detail: format!("invalid UTF-8: {err}"),
                    }
                })?;
                Ok(Value::Text(text))
            }
            t if t == codes::TYPE_TIMESTAMP => Ok(Value::Timestamp(Timestamp(wire.read_i64()?))),
            t if t == codes::TYPE_FILE_URL => {
                let bytes = wire.scalar_bytes().ok_or_else(|| WireError::Malformed {
                    tag: wire.type_tag,
                    detail: "file url payload must be scalar".to_string(),
                })?;
                let url = String::from_utf8(bytes.to_vec()).map_err(|err| {
                    WireError::Malformed {
                        tag: wire.type_tag,
                        detail: format!("invalid UTF-8 url: {err}"),
                    }
                })?;
                Ok(Value::FileRef(FileRef(url)))
            }
            t if t == codes::TYPE_POINT => {
                let bytes: [u8; 4] = scalar_array(wire)?;
                Ok(Value::Point(Point {
                    y: i16::from_be_bytes([bytes[0], bytes[1]]),
                    x: i16::from_be_bytes([bytes[2], bytes[3]]),
                }))
            }
            t if t == codes::TYPE_RECT => {
                let bytes: [u8; 8] = scalar_array(wire)?;
                Ok(Value::Rect(Rect {
                    y0: i16::from_be_bytes([bytes[0], bytes[1]]),
                    x0: i16::from_be_bytes([bytes[2], bytes[3]]),
                    y1: i16::from_be_bytes([bytes[4], bytes[5]]),
                    x1: i16::from_be_bytes([bytes[6], bytes[7]]),
                }))
            }
            t if t == codes::TYPE_RGB_COLOR => {
                let bytes: [u8; 6] = scalar_array(wire)?;
                Ok(Value::Color(Color {
                    red: u16::from_be_bytes([bytes[0], bytes[1]]),
                    green: u16::from_be_bytes([bytes[2], bytes[3]]),
                    blue: u16::from_be_bytes([bytes[4], bytes[5]]),
                }))
            }
            t if t == codes::TYPE_TYPE => {
                let code = wire.read_code()?;
                if code == codes::CODE_MISSING_VALUE {
                    Ok(Value::Missing)
                } else {
                    Ok(Value::Symbol(Symbol::typed(code)))
                }
            }
            t if t == codes::TYPE_ENUMERATED
                || t == codes::TYPE_PROPERTY
                || t == codes::TYPE_ABSOLUTE_ORDINAL =>
            {
                Ok(Value::Symbol(Symbol {
                    code: wire.read_code()?,
                    type_tag: wire.type_tag,
                }))
            }
            t if t == codes::TYPE_APPLICATION_ROOT
                || t == codes::TYPE_CONTAINER_ROOT
                || t == codes::TYPE_SPECIMEN_ROOT
                || t == codes::TYPE_OBJECT_SPECIFIER
                || t == codes::TYPE_INSERTION_LOC =>
            {
                Ok(Value::Query(Query::from_wire(wire)?))
            }
            t if t == codes::TYPE_COMPARISON || t == codes::TYPE_LOGICAL => {
                Ok(Value::Test(TestClause::from_wire(wire)?))
            }
            _ => match &wire.payload {
                WirePayload::List(items) => {
                    let mut lifted = Vec::with_capacity(items.len());
                    for item in items {
                        lifted.push(Value::from_wire(item)?);
                    }
                    Ok(Value::List(lifted))
                }
                WirePayload::Record(fields) => {
                    let mut record = Record::with_tag(wire.type_tag);
                    for (key, value) in fields {
                        record.insert(*key, Value::from_wire(value)?);
                    }
                    Ok(Value::Record(record))
                }
                WirePayload::Scalar(_) => Ok(Value::Opaque(wire.clone())),
            },
        }
    }
}

fn scalar_array<const N: usize>(wire: &WireValue) -> Result<[u8; N], WireError> {
    let bytes = wire.scalar_bytes().ok_or_else(|| WireError::Malformed {
        tag: wire.type_tag,
        detail: "expected scalar payload".to_string(),
    })?;
    bytes.try_into().map_err(|_| WireError::Malformed {
        tag: wire.type_tag,
        detail: format!("expected {N} payload bytes, found {}", bytes.len()),
    })
}
