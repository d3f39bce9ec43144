//! Structural encoding: host value → tagged value.

use crate::error::EncodeError;
use std::any::Any;
use wire_types::{codes, FourCc, Record, Value, WireValue};

/// A host value that can describe its own structure to an [`Encoder`].
pub trait Encode {
    /// Encodes `self` by opening exactly one container on `encoder`.
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError>;

    /// Advertises a wire type the produced value must be coerced to.
    fn required_type(&self) -> Option<FourCc> {
        None
    }
}

/// Walks one host value's structure, producing one tagged value.
///
/// An encoder accepts exactly one container (or one emitted intrinsic
/// value); opening a second is an error. When built with an attribute
/// sink, keyed fields in the reserved attribute namespace are routed
/// to the sink instead of the record — this is how a request subject's
/// attribute keys reach the envelope.
pub struct Encoder<'a> {
    output: Option<Value>,
    attribute_sink: Option<&'a mut Vec<(FourCc, Value)>>,
}

impl Encoder<'static> {
    pub fn new() -> Self {
        Encoder {
            output: None,
            attribute_sink: None,
        }
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Encoder<'a> {
    /// Creates an encoder that hoists reserved attribute keys into
    /// `sink` instead of record fields.
    pub fn with_attribute_sink(sink: &'a mut Vec<(FourCc, Value)>) -> Encoder<'a> {
        Encoder {
            output: None,
            attribute_sink: Some(sink),
        }
    }

    /// Opens the single-value container.
    pub fn single<'e>(&'e mut self) -> SingleEncoder<'e, 'a> {
        SingleEncoder { encoder: self }
    }

    /// Opens the keyed (record-shaped) container.
    pub fn keyed<'e>(&'e mut self, type_tag: FourCc) -> KeyedEncoder<'e, 'a> {
        KeyedEncoder {
            encoder: self,
            record: Record::with_tag(type_tag),
        }
    }

    /// Opens the unkeyed (list-shaped) container.
    pub fn unkeyed<'e>(&'e mut self) -> ListEncoder<'e, 'a> {
        ListEncoder {
            encoder: self,
            items: Vec::new(),
        }
    }

    /// Returns the produced value; encoding nothing is an error.
    pub fn finish(self) -> Result<Value, EncodeError> {
        self.output.ok_or(EncodeError::Empty)
    }

    pub(crate) fn emit(&mut self, value: Value) -> Result<(), EncodeError> {
        if self.output.is_some() {
            return Err(EncodeError::AlreadyEncoded);
        }
        self.output = Some(value);
        Ok(())
    }
}

/// Encodes one scalar or one nested value.
pub struct SingleEncoder<'e, 'a> {
    encoder: &'e mut Encoder<'a>,
}

impl SingleEncoder<'_, '_> {
    pub fn encode_bool(self, value: bool) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Bool(value))
    }

    pub fn encode_i32(self, value: i32) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Int32(value))
    }

    pub fn encode_i64(self, value: i64) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Int64(value))
    }

    pub fn encode_u64(self, value: u64) -> Result<(), EncodeError> {
        self.encoder.emit(Value::UInt64(value))
    }

    pub fn encode_f64(self, value: f64) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Double(value))
    }

    pub fn encode_str(self, value: &str) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Text(value.to_string()))
    }

    /// Encodes the missing-value sentinel.
    pub fn encode_missing(self) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Missing)
    }

    /// Recursively encodes one nested value.
    pub fn encode_nested<T: Encode + Any>(self, value: &T) -> Result<(), EncodeError> {
        let encoded = crate::encode_value(value)?;
        self.encoder.emit(encoded)
    }

    pub(crate) fn emit(self, value: Value) -> Result<(), EncodeError> {
        self.encoder.emit(value)
    }
}

/// Encodes keyed fields into a record-shaped value.
pub struct KeyedEncoder<'e, 'a> {
    encoder: &'e mut Encoder<'a>,
    record: Record,
}

impl KeyedEncoder<'_, '_> {
    /// Encodes one keyed field. Keys in the reserved attribute
    /// namespace are routed to the encoder's attribute sink (when one
    /// is attached) rather than stored as record fields.
    pub fn encode_field<T: Encode + Any>(
        &mut self,
        key: FourCc,
        value: &T,
    ) -> Result<(), EncodeError> {
        let encoded = crate::encode_value(value)?;
        if codes::is_reserved_attribute(key) {
            if let Some(sink) = self.encoder.attribute_sink.as_deref_mut() {
                sink.push((key, encoded));
                return Ok(());
            }
        }
        self.record.insert(key, encoded);
        Ok(())
    }

    /// Closes the container, storing the record.
    pub fn finish(self) -> Result<(), EncodeError> {
        self.encoder.emit(Value::Record(self.record))
    }
}

/// Encodes ordered elements into a list-shaped value.
pub struct ListEncoder<'e, 'a> {
    encoder: &'e mut Encoder<'a>,
    items: Vec<Value>,
}

impl ListEncoder<'_, '_> {
    /// Encodes and appends one element.
    pub fn encode_element<T: Encode + Any>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(crate::encode_value(value)?);
        Ok(())
    }

    /// Closes the container, storing the list.
    pub fn finish(self) -> Result<(), EncodeError> {
        self.encoder.emit(Value::List(self.items))
    }
}

/// Coerces a structurally produced value to an advertised wire type.
///
/// Record-shaped values retag in place; numeric targets attempt an
/// exact-fit conversion first; anything else is rebuilt verbatim under
/// the explicit type tag.
pub(crate) fn coerce(value: Value, type_tag: FourCc) -> Result<Value, EncodeError> {
    // Intelligent numeric coercion before the verbatim rebuild.
    if type_tag == codes::TYPE_SINT32 {
        if let Ok(n) = value.to_i32() {
            return Ok(Value::Int32(n));
        }
    } else if type_tag == codes::TYPE_SINT64 {
        if let Ok(n) = value.to_i64() {
            return Ok(Value::Int64(n));
        }
    } else if type_tag == codes::TYPE_UINT64 {
        if let Ok(n) = value.to_u64() {
            return Ok(Value::UInt64(n));
        }
    }
    match value {
        Value::Record(mut record) => {
            record.type_tag = type_tag;
            Ok(Value::Record(record))
        }
        other => {
            let wire = other.to_wire();
            if wire.type_tag == type_tag {
                Ok(other)
            } else {
                Ok(Value::Opaque(WireValue {
                    type_tag,
                    payload: wire.payload,
                }))
            }
        }
    }
}
