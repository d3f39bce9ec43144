//! Cross-crate codec behavior.
//!
//! These tests exercise the structural codec through its public entry
//! points against the wire_types value model, the way protocol code
//! consumes it.

#[cfg(test)]
mod tests {
    use codec::{decode_value, encode_value, Blob, Decode, DecodeError, Decoder, Encode,
        EncodeError, Encoder};
    use wire_types::{codes, FourCc, Query, Record, Symbol, Value};

    /// A host record type encoded through the keyed container, the way
    /// callers model reply payloads.
    #[derive(Debug, Clone, PartialEq)]
    struct DocumentInfo {
        name: String,
        pages: i32,
    }

    impl Encode for DocumentInfo {
        fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
            let mut keyed = encoder.keyed(codes::TYPE_RECORD);
            keyed.encode_field(FourCc::new(b"pnam"), &self.name)?;
            keyed.encode_field(FourCc::new(b"pcnt"), &self.pages)?;
            keyed.finish()
        }
    }

    impl Decode for DocumentInfo {
        fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
            let keyed = decoder.keyed()?;
            Ok(DocumentInfo {
                name: keyed.decode_field(FourCc::new(b"pnam"))?,
                pages: keyed.decode_field(FourCc::new(b"pcnt"))?,
            })
        }
    }

    #[test]
    fn test_scalar_list_record_round_trips() {
        let scalars = encode_value(&vec![1i64, -2, 3]).unwrap();
        assert_eq!(decode_value::<Vec<i64>>(&scalars).unwrap(), vec![1, -2, 3]);

        let info = DocumentInfo {
            name: "Report".to_string(),
            pages: 12,
        };
        let encoded = encode_value(&info).unwrap();
        assert_eq!(decode_value::<DocumentInfo>(&encoded).unwrap(), info);

        let text = encode_value(&"hello".to_string()).unwrap();
        assert_eq!(decode_value::<String>(&text).unwrap(), "hello");
    }

    #[test]
    fn test_numeric_narrowing_never_truncates() {
        let fits = Value::Int64(i64::from(i32::MAX));
        assert_eq!(decode_value::<i32>(&fits).unwrap(), i32::MAX);

        let overflows = Value::Int64(i64::from(i32::MAX) + 1);
        let err = decode_value::<i32>(&overflows).unwrap_err();
        assert!(matches!(err, DecodeError::Wire(_)), "got {err:?}");

        // Widening and narrowing back is the identity for fitting
        // values.
        let widened = Value::Int64(Value::Int32(-7).to_i64().unwrap());
        assert_eq!(decode_value::<i32>(&widened).unwrap(), -7);
    }

    #[test]
    fn test_missing_key_is_distinct_from_present_missing_value() {
        let mut record = Record::new();
        record.insert(FourCc::new(b"pnam"), Value::Missing);
        let value = Value::Record(record);
        let decoder = Decoder::new(&value);
        let keyed = decoder.keyed().unwrap();

        // Present-but-missing decodes; absent reports MissingKey.
        assert!(keyed.contains(FourCc::new(b"pnam")));
        assert_eq!(
            keyed.decode_field::<Option<i32>>(FourCc::new(b"pnam")).unwrap(),
            None
        );
        assert!(!keyed.contains(FourCc::new(b"pcnt")));
        assert!(matches!(
            keyed.decode_field::<Option<i32>>(FourCc::new(b"pcnt")),
            Err(DecodeError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_list_cursor_stops_at_end() {
        let value = encode_value(&vec![10i32, 20]).unwrap();
        let decoder = Decoder::new(&value);
        let mut list = decoder.unkeyed().unwrap();
        assert_eq!(list.decode_element::<i32>().unwrap(), 10);
        assert_eq!(list.decode_element::<i32>().unwrap(), 20);
        assert!(list.at_end());
        assert!(matches!(
            list.decode_element::<i32>(),
            Err(DecodeError::NoMoreValues { index: 3, len: 2 })
        ));
    }

    #[test]
    fn test_unrecognized_enum_code_decodes_as_raw_u32() {
        let value = Value::Symbol(Symbol::enumerated(FourCc::new(b"wxyz")));
        assert_eq!(
            decode_value::<u32>(&value).unwrap(),
            FourCc::new(b"wxyz").as_u32()
        );
    }

    #[test]
    fn test_blob_survives_the_value_layer_verbatim() {
        let blob = Blob::with_tag(FourCc::new(b"PICT"), vec![0xFF, 0x00, 0x7F]);
        let encoded = encode_value(&blob).unwrap();
        // Through lowering and lifting, tag and bytes are untouched.
        let lifted = Value::from_wire(&encoded.to_wire()).unwrap();
        assert_eq!(decode_value::<Blob>(&lifted).unwrap(), blob);
    }

    #[test]
    fn test_query_values_cross_the_codec_boundary() {
        let query = Query::app_root().by_name(FourCc::new(b"docu"), "Notes");
        let encoded = encode_value(&query).unwrap();
        assert_eq!(encoded, Value::Query(query.clone()));
        // And from the raw wire form, as replies arrive.
        let lifted = Value::Opaque(query.to_wire());
        assert_eq!(decode_value::<Query>(&lifted).unwrap(), query);
    }
}
