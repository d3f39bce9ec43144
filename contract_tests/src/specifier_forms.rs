//! Query and test-clause wire record forms.
//!
//! These tests pin the fixed four-char schema field by field. A change
//! here is a wire-compatibility break, not a refactor.

#[cfg(test)]
mod tests {
    use wire_types::{
        codes, AbsoluteOrdinal, FourCc, InsertionLocation, Query, Symbol, TestClause, Value,
        WireValue,
    };

    fn documents() -> FourCc {
        FourCc::new(b"docu")
    }

    fn field<'w>(wire: &'w WireValue, key: FourCc) -> &'w WireValue {
        wire.field(key)
            .unwrap_or_else(|| panic!("record {} is missing key {}", wire.type_tag, key))
    }

    #[test]
    fn test_object_specifier_record_form() {
        let wire = Query::app_root().by_index(documents(), 1).to_wire();

        assert_eq!(wire.type_tag, codes::TYPE_OBJECT_SPECIFIER);
        assert_eq!(
            field(&wire, codes::KEY_CONTAINER),
            &WireValue::empty(codes::TYPE_APPLICATION_ROOT)
        );
        let want = field(&wire, codes::KEY_WANT_TYPE);
        assert_eq!(want.type_tag, codes::TYPE_TYPE);
        assert_eq!(want.read_code().unwrap(), documents());
        let form = field(&wire, codes::KEY_FORM);
        assert_eq!(form.type_tag, codes::TYPE_ENUMERATED);
        assert_eq!(form.read_code().unwrap(), codes::FORM_ABSOLUTE_POSITION);
        let data = field(&wire, codes::KEY_DATA);
        assert_eq!(data.type_tag, codes::TYPE_SINT32);
        assert_eq!(data.read_i32().unwrap(), 1);
    }

    #[test]
    fn test_property_form_uses_property_class() {
        let wire = Query::app_root().by_property(FourCc::new(b"pnam")).to_wire();

        assert_eq!(
            field(&wire, codes::KEY_WANT_TYPE).read_code().unwrap(),
            codes::CLASS_PROPERTY
        );
        assert_eq!(
            field(&wire, codes::KEY_FORM).read_code().unwrap(),
            codes::FORM_PROPERTY
        );
        let data = field(&wire, codes::KEY_DATA);
        assert_eq!(data.type_tag, codes::TYPE_TYPE);
        assert_eq!(data.read_code().unwrap(), FourCc::new(b"pnam"));
    }

    #[test]
    fn test_absolute_ordinal_data_is_typed_abso() {
        let wire = Query::app_root()
            .by_absolute(documents(), AbsoluteOrdinal::All)
            .to_wire();

        let data = field(&wire, codes::KEY_DATA);
        assert_eq!(data.type_tag, codes::TYPE_ABSOLUTE_ORDINAL);
        assert_eq!(data.read_code().unwrap(), codes::ORDINAL_ALL);
    }

    #[test]
    fn test_range_data_record_form() {
        let start = Value::Query(Query::container_root().by_index(documents(), 2));
        let stop = Value::Query(Query::container_root().by_index(documents(), 4));
        let wire = Query::app_root()
            .by_range(documents(), start.clone(), stop.clone())
            .to_wire();

        assert_eq!(
            field(&wire, codes::KEY_FORM).read_code().unwrap(),
            codes::FORM_RANGE
        );
        let data = field(&wire, codes::KEY_DATA);
        assert_eq!(data.type_tag, codes::TYPE_RANGE);
        assert_eq!(field(data, codes::KEY_RANGE_START), &start.to_wire());
        assert_eq!(field(data, codes::KEY_RANGE_STOP), &stop.to_wire());
        // Range bounds are rooted at the container sentinel.
        let bound = field(data, codes::KEY_RANGE_START);
        assert_eq!(
            field(bound, codes::KEY_CONTAINER),
            &WireValue::empty(codes::TYPE_CONTAINER_ROOT)
        );
    }

    #[test]
    fn test_insertion_record_form() {
        let wire = Query::app_root()
            .by_index(documents(), 1)
            .insertion(InsertionLocation::Beginning)
            .to_wire();

        assert_eq!(wire.type_tag, codes::TYPE_INSERTION_LOC);
        let object = field(&wire, codes::KEY_INSERTION_OBJECT);
        assert_eq!(object.type_tag, codes::TYPE_OBJECT_SPECIFIER);
        let position = field(&wire, codes::KEY_INSERTION_POSITION);
        assert_eq!(position.type_tag, codes::TYPE_ENUMERATED);
        assert_eq!(position.read_code().unwrap(), codes::POSITION_BEGINNING);
    }

    #[test]
    fn test_comparison_record_form() {
        let lhs = Value::Query(Query::specimen_root().by_property(FourCc::new(b"pnam")));
        let rhs = Value::Text("Notes".to_string());
        let wire = TestClause::equals(lhs.clone(), rhs.clone()).to_wire();

        assert_eq!(wire.type_tag, codes::TYPE_COMPARISON);
        let operator = field(&wire, codes::KEY_COMPARISON_OPERATOR);
        assert_eq!(operator.type_tag, codes::TYPE_ENUMERATED);
        assert_eq!(operator.read_code().unwrap(), codes::OP_EQUAL);
        assert_eq!(field(&wire, codes::KEY_FIRST_OPERAND), &lhs.to_wire());
        assert_eq!(field(&wire, codes::KEY_SECOND_OPERAND), &rhs.to_wire());
    }

    #[test]
    fn test_logical_record_form() {
        let a = TestClause::equals(Value::Int32(1), Value::Int32(1));
        let b = TestClause::equals(Value::Int32(2), Value::Int32(2));
        let wire = a.clone().and(b.clone()).to_wire();

        assert_eq!(wire.type_tag, codes::TYPE_LOGICAL);
        assert_eq!(
            field(&wire, codes::KEY_LOGICAL_OPERATOR).read_code().unwrap(),
            codes::OP_AND
        );
        let terms = field(&wire, codes::KEY_LOGICAL_TERMS);
        assert_eq!(terms.type_tag, codes::TYPE_LIST);
        assert_eq!(terms.items().unwrap(), &[a.to_wire(), b.to_wire()]);
    }

    #[test]
    fn test_not_equals_never_reaches_the_wire() {
        let a = Value::Int32(1);
        let b = Value::Int32(2);
        let wire = TestClause::not_equals(a.clone(), b.clone()).to_wire();

        // The wire carries NOT(Equal); there is no != operator code.
        assert_eq!(wire.type_tag, codes::TYPE_LOGICAL);
        assert_eq!(
            field(&wire, codes::KEY_LOGICAL_OPERATOR).read_code().unwrap(),
            codes::OP_NOT
        );
        let terms = field(&wire, codes::KEY_LOGICAL_TERMS).items().unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0], TestClause::equals(a, b).to_wire());
    }

    #[test]
    fn test_is_in_never_reaches_the_wire() {
        let element = Value::Text("needle".to_string());
        let container = Value::Text("haystack".to_string());
        let wire = TestClause::is_in(element.clone(), container.clone()).to_wire();

        // The wire carries contains(container, element).
        assert_eq!(
            field(&wire, codes::KEY_COMPARISON_OPERATOR).read_code().unwrap(),
            codes::OP_CONTAINS
        );
        assert_eq!(field(&wire, codes::KEY_FIRST_OPERAND), &container.to_wire());
        assert_eq!(field(&wire, codes::KEY_SECOND_OPERAND), &element.to_wire());
    }

    #[test]
    fn test_missing_value_sentinel_form() {
        let wire = Value::Missing.to_wire();
        assert_eq!(wire.type_tag, codes::TYPE_TYPE);
        assert_eq!(wire.read_code().unwrap(), codes::CODE_MISSING_VALUE);
    }

    #[test]
    fn test_symbol_lowers_under_its_own_tag() {
        let wire = Value::Symbol(Symbol::enumerated(FourCc::new(b"yes "))).to_wire();
        assert_eq!(wire.type_tag, codes::TYPE_ENUMERATED);
        assert_eq!(wire.read_code().unwrap(), FourCc::new(b"yes "));
    }

    #[test]
    fn test_every_selector_form_reencodes_identically() {
        let test = TestClause::begins_with(
            Value::Query(Query::specimen_root().by_property(FourCc::new(b"pnam"))),
            Value::Text("A".to_string()),
        );
        let queries = vec![
            Query::app_root().by_property(FourCc::new(b"pnam")),
            Query::app_root().by_user_property("favorite"),
            Query::app_root().by_name(documents(), "Notes"),
            Query::app_root().by_id(documents(), Value::Int32(42)),
            Query::app_root().by_index(documents(), -1),
            Query::app_root().by_absolute(documents(), AbsoluteOrdinal::Middle),
            Query::app_root()
                .by_index(documents(), 1)
                .by_relative(documents(), wire_types::RelativeOrdinal::Previous),
            Query::app_root().by_range(
                documents(),
                Value::Query(Query::container_root().by_index(documents(), 1)),
                Value::Query(Query::container_root().by_index(documents(), 3)),
            ),
            Query::app_root().by_test(documents(), test),
            Query::app_root()
                .by_index(documents(), 1)
                .insertion(InsertionLocation::After),
        ];
        for query in queries {
            let first = query.to_wire();
            let lifted = Query::from_wire(&first).unwrap();
            assert_eq!(lifted.to_wire(), first, "unstable re-encode for {query:?}");
        }
    }

    #[test]
    fn test_specifier_json_snapshot() {
        let wire = Query::app_root().by_index(documents(), 1).to_wire();
        let expected = serde_json::json!({
            "type_tag": "obj ",
            "payload": { "Record": [
                ["from", { "type_tag": "null", "payload": { "Scalar": [] } }],
                ["want", { "type_tag": "type", "payload": { "Scalar": [100, 111, 99, 117] } }],
                ["form", { "type_tag": "enum", "payload": { "Scalar": [105, 110, 100, 120] } }],
                ["seld", { "type_tag": "long", "payload": { "Scalar": [0, 0, 0, 1] } }]
            ]}
        });
        assert_eq!(serde_json::to_value(&wire).unwrap(), expected);
    }
}
