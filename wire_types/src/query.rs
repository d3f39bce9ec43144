//! The query AST: recursive addressing expressions.
//!
//! A query identifies an object (or objects) in the remote process's
//! object graph. Nodes are immutable; the chained construction API
//! returns new nodes whose parent is the receiver. No semantic
//! validation happens at construction time; whether the target
//! actually has an addressed property is only discoverable by sending
//! a request.

use crate::codes;
use crate::error::WireError;
use crate::four_cc::FourCc;
use crate::test_clause::TestClause;
use crate::value::{Symbol, Value};
use crate::wire::WireValue;
use serde::{Deserialize, Serialize};

/// Terminal query node: where an addressing chain starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RootKind {
    /// The application's top-level object graph.
    Application,
    /// The container being ranged over (valid inside range selectors).
    Container,
    /// The object under examination (valid inside test clauses).
    Specimen,
    /// A literal wire value acting as the root, passed through
    /// verbatim.
    Literal(WireValue),
}

/// One of the nine mutually exclusive addressing forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selector {
    /// A property identified by its schema code.
    Property(FourCc),
    /// A script-defined property identified by name.
    UserProperty(String),
    /// An element identified by name.
    Name(String),
    /// An element identified by unique id (any encodable value).
    Id(Value),
    /// An element at an absolute 1-based (or negative) index.
    Index(i32),
    /// An element selected by absolute ordinal.
    Absolute(AbsoluteOrdinal),
    /// An element relative to the parent.
    Relative(RelativeOrdinal),
    /// A range of elements between two encodable bounds.
    Range(RangeSelector),
    /// Every element satisfying a test clause.
    Test(TestClause),
}

/// Absolute ordinal selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsoluteOrdinal {
    First,
    Middle,
    Last,
    Random,
    All,
}

impl AbsoluteOrdinal {
    fn code(self) -> FourCc {
        match self {
            AbsoluteOrdinal::First => codes::ORDINAL_FIRST,
            AbsoluteOrdinal::Middle => codes::ORDINAL_MIDDLE,
            AbsoluteOrdinal::Last => codes::ORDINAL_LAST,
            AbsoluteOrdinal::Random => codes::ORDINAL_RANDOM,
            AbsoluteOrdinal::All => codes::ORDINAL_ALL,
        }
    }

    fn from_code(code: FourCc) -> Option<Self> {
        match code {
            c if c == codes::ORDINAL_FIRST => Some(AbsoluteOrdinal::First),
            c if c == codes::ORDINAL_MIDDLE => Some(AbsoluteOrdinal::Middle),
            c if c == codes::ORDINAL_LAST => Some(AbsoluteOrdinal::Last),
            c if c == codes::ORDINAL_RANDOM => Some(AbsoluteOrdinal::Random),
            c if c == codes::ORDINAL_ALL => Some(AbsoluteOrdinal::All),
            _ => None,
        }
    }
}

/// Relative ordinal selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeOrdinal {
    Previous,
    Next,
}

impl RelativeOrdinal {
    fn code(self) -> FourCc {
        match self {
            RelativeOrdinal::Previous => codes::ORDINAL_PREVIOUS,
            RelativeOrdinal::Next => codes::ORDINAL_NEXT,
        }
    }

    fn from_code(code: FourCc) -> Option<Self> {
        match code {
            c if c == codes::ORDINAL_PREVIOUS => Some(RelativeOrdinal::Previous),
            c if c == codes::ORDINAL_NEXT => Some(RelativeOrdinal::Next),
            _ => None,
        }
    }
}

/// Two encodable bounds for a range selector. Bounds are typically
/// queries rooted at [`RootKind::Container`], but any value is legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelector {
    pub start: Value,
    pub stop: Value,
}

/// Insertion points relative to a parent query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertionLocation {
    Beginning,
    End,
    Before,
    After,
}

impl InsertionLocation {
    fn code(self) -> FourCc {
        match self {
            InsertionLocation::Beginning => codes::POSITION_BEGINNING,
            InsertionLocation::End => codes::POSITION_END,
            InsertionLocation::Before => codes::POSITION_BEFORE,
            InsertionLocation::After => codes::POSITION_AFTER,
        }
    }

    fn from_code(code: FourCc) -> Option<Self> {
        match code {
            c if c == codes::POSITION_BEGINNING => Some(InsertionLocation::Beginning),
            c if c == codes::POSITION_END => Some(InsertionLocation::End),
            c if c == codes::POSITION_BEFORE => Some(InsertionLocation::Before),
            c if c == codes::POSITION_AFTER => Some(InsertionLocation::After),
            _ => None,
        }
    }
}

/// An object specifier: parent + wanted class + selector form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpecifier {
    pub parent: Query,
    pub want_type: FourCc,
    pub selector: Selector,
}

/// An insertion specifier: parent + location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertionSpecifier {
    pub parent: Query,
    pub location: InsertionLocation,
}

/// A recursive addressing expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Root(RootKind),
    Object(Box<ObjectSpecifier>),
    Insertion(Box<InsertionSpecifier>),
}

impl Query {
    /// The application root.
    pub fn app_root() -> Self {
        Query::Root(RootKind::Application)
    }

    /// The range-bound container root.
    pub fn container_root() -> Self {
        Query::Root(RootKind::Container)
    }

    /// The test-clause specimen root.
    pub fn specimen_root() -> Self {
        Query::Root(RootKind::Specimen)
    }

    /// A literal wire value acting as a root.
    pub fn literal_root(value: WireValue) -> Self {
        Query::Root(RootKind::Literal(value))
    }

    fn child(self, want_type: FourCc, selector: Selector) -> Query {
        Query::Object(Box::new(ObjectSpecifier {
            parent: self,
            want_type,
            selector,
        }))
    }

    // ===== Chained construction =====

    /// Addresses a property of the receiver by schema code.
    pub fn by_property(self, code: FourCc) -> Query {
        self.child(codes::CLASS_PROPERTY, Selector::Property(code))
    }

    /// Addresses a script-defined property of the receiver by name.
    pub fn by_user_property(self, name: impl Into<String>) -> Query {
        self.child(codes::CLASS_PROPERTY, Selector::UserProperty(name.into()))
    }

    /// Addresses an element by absolute index.
    pub fn by_index(self, class: FourCc, index: i32) -> Query {
        self.child(class, Selector::Index(index))
    }

    /// Addresses an element by absolute ordinal.
    pub fn by_absolute(self, class: FourCc, ordinal: AbsoluteOrdinal) -> Query {
        self.child(class, Selector::Absolute(ordinal))
    }

    /// Addresses an element relative to the receiver.
    pub fn by_relative(self, class: FourCc, ordinal: RelativeOrdinal) -> Query {
        self.child(class, Selector::Relative(ordinal))
    }

    /// Addresses an element by name.
    pub fn by_name(self, class: FourCc, name: impl Into<String>) -> Query {
        self.child(class, Selector::Name(name.into()))
    }

    /// Addresses an element by unique id.
    pub fn by_id(self, class: FourCc, id: Value) -> Query {
        self.child(class, Selector::Id(id))
    }

    /// Addresses a range of elements between two bounds.
    pub fn by_range(self, class: FourCc, start: Value, stop: Value) -> Query {
        self.child(class, Selector::Range(RangeSelector { start, stop }))
    }

    /// Addresses every element satisfying a test clause.
    pub fn by_test(self, class: FourCc, test: TestClause) -> Query {
        self.child(class, Selector::Test(test))
    }

    /// Addresses an insertion point relative to the receiver.
    pub fn insertion(self, location: InsertionLocation) -> Query {
        Query::Insertion(Box::new(InsertionSpecifier {
            parent: self,
            location,
        }))
    }

    // ===== Wire form =====

    /// Lowers this query to its fixed-schema wire record form.
    pub fn to_wire(&self) -> WireValue {
        match self {
            Query::Root(RootKind::Application) => {
                WireValue::empty(codes::TYPE_APPLICATION_ROOT)
            }
            Query::Root(RootKind::Container) => WireValue::empty(codes::TYPE_CONTAINER_ROOT),
            Query::Root(RootKind::Specimen) => WireValue::empty(codes::TYPE_SPECIMEN_ROOT),
            Query::Root(RootKind::Literal(wire)) => wire.clone(),
            Query::Object(spec) => spec.to_wire(),
            Query::Insertion(spec) => spec.to_wire(),
        }
    }

    /// Lifts a wire value back into a query. Values that are neither a
    /// root sentinel nor a specifier record become literal roots.
    pub fn from_wire(wire: &WireValue) -> Result<Query, WireError> {
        match wire.type_tag {
            t if t == codes::TYPE_APPLICATION_ROOT => Ok(Query::app_root()),
            t if t == codes::TYPE_CONTAINER_ROOT => Ok(Query::container_root()),
            t if t == codes::TYPE_SPECIMEN_ROOT => Ok(Query::specimen_root()),
            t if t == codes::TYPE_OBJECT_SPECIFIER => {
                Ok(Query::Object(Box::new(ObjectSpecifier::from_wire(wire)?)))
            }
            t if t == codes::TYPE_INSERTION_LOC => Ok(Query::Insertion(Box::new(
                InsertionSpecifier::from_wire(wire)?,
            ))),
            _ => Ok(Query::literal_root(wire.clone())),
        }
    }
}

impl ObjectSpecifier {
    /// Lowers to the 4-field record {container, want, form, data}.
    pub fn to_wire(&self) -> WireValue {
        let (form, data) = match &self.selector {
            Selector::Property(code) => (
                codes::FORM_PROPERTY,
                Value::Symbol(Symbol::typed(*code)).to_wire(),
            ),
            Selector::UserProperty(name) => (
                codes::FORM_USER_PROPERTY,
                Value::Text(name.clone()).to_wire(),
            ),
            Selector::Name(name) => (codes::FORM_NAME, Value::Text(name.clone()).to_wire()),
            Selector::Id(id) => (codes::FORM_UNIQUE_ID, id.to_wire()),
            Selector::Index(index) => {
                (codes::FORM_ABSOLUTE_POSITION, Value::Int32(*index).to_wire())
            }
            Selector::Absolute(ordinal) => (
                codes::FORM_ABSOLUTE_POSITION,
                WireValue::scalar(
                    codes::TYPE_ABSOLUTE_ORDINAL,
                    ordinal.code().bytes().to_vec(),
                ),
            ),
            Selector::Relative(ordinal) => (
                codes::FORM_RELATIVE_POSITION,
                Value::Symbol(Symbol::enumerated(ordinal.code())).to_wire(),
            ),
            Selector::Range(range) => (
                codes::FORM_RANGE,
                WireValue::record(
                    codes::TYPE_RANGE,
                    vec![
                        (codes::KEY_RANGE_START, range.start.to_wire()),
                        (codes::KEY_RANGE_STOP, range.stop.to_wire()),
                    ],
                ),
            ),
            Selector::Test(test) => (codes::FORM_TEST, test.to_wire()),
        };
        WireValue::record(
            codes::TYPE_OBJECT_SPECIFIER,
            vec![
                (codes::KEY_CONTAINER, self.parent.to_wire()),
                (
                    codes::KEY_WANT_TYPE,
                    Value::Symbol(Symbol::typed(self.want_type)).to_wire(),
                ),
                (
                    codes::KEY_FORM,
                    Value::Symbol(Symbol::enumerated(form)).to_wire(),
                ),
                (codes::KEY_DATA, data),
            ],
        )
    }

    /// Lifts the 4-field record back into a specifier.
    pub fn from_wire(wire: &WireValue) -> Result<ObjectSpecifier, WireError> {
        let parent = Query::from_wire(wire.required_field(codes::KEY_CONTAINER)?)?;
        let want_type = wire.required_field(codes::KEY_WANT_TYPE)?.read_code()?;
        let form = wire.required_field(codes::KEY_FORM)?.read_code()?;
        let data = wire.required_field(codes::KEY_DATA)?;
        let selector = match form {
            f if f == codes::FORM_PROPERTY => Selector::Property(data.read_code()?),
            f if f == codes::FORM_USER_PROPERTY => {
                Selector::UserProperty(decode_text(data)?)
            }
            f if f == codes::FORM_NAME => Selector::Name(decode_text(data)?),
            f if f == codes::FORM_UNIQUE_ID => Selector::Id(Value::from_wire(data)?),
            f if f == codes::FORM_ABSOLUTE_POSITION => {
                // An absolute position is either an ordinal keyword or a
                // plain integer index; try the ordinal reading first.
                match data.read_code().ok().and_then(AbsoluteOrdinal::from_code) {
                    Some(ordinal) if data.type_tag == codes::TYPE_ABSOLUTE_ORDINAL => {
                        Selector::Absolute(ordinal)
                    }
                    _ => Selector::Index(Value::from_wire(data)?.to_i32()?),
                }
            }
            f if f == codes::FORM_RELATIVE_POSITION => {
                let code = data.read_code()?;
                Selector::Relative(
                    RelativeOrdinal::from_code(code)
                        .ok_or(WireError::UnknownOperator(code))?,
                )
            }
            f if f == codes::FORM_RANGE => {
                let start = Value::from_wire(data.required_field(codes::KEY_RANGE_START)?)?;
                let stop = Value::from_wire(data.required_field(codes::KEY_RANGE_STOP)?)?;
                Selector::Range(RangeSelector { start, stop })
            }
            f if f == codes::FORM_TEST => Selector::Test(TestClause::from_wire(data)?),
            other => return Err(WireError::UnknownKeyForm(other)),
        };
        Ok(ObjectSpecifier {
            parent,
            want_type,
            selector,
        })
    }
}

impl InsertionSpecifier {
    /// Lowers to the 2-field record {object, position}.
    pub fn to_wire(&self) -> WireValue {
        WireValue::record(
            codes::TYPE_INSERTION_LOC,
            vec![
                (codes::KEY_INSERTION_OBJECT, self.parent.to_wire()),
                (
                    codes::KEY_INSERTION_POSITION,
                    Value::Symbol(Symbol::enumerated(self.location.code())).to_wire(),
                ),
            ],
        )
    }

    /// Lifts the 2-field record back into an insertion specifier.
    pub fn from_wire(wire: &WireValue) -> Result<InsertionSpecifier, WireError> {
        let parent = Query::from_wire(wire.required_field(codes::KEY_INSERTION_OBJECT)?)?;
        let code = wire
            .required_field(codes::KEY_INSERTION_POSITION)?
            .read_code()?;
        let location =
            InsertionLocation::from_code(code).ok_or(WireError::UnknownPosition(code))?;
        Ok(InsertionSpecifier { parent, location })
    }
}

fn decode_text(wire: &WireValue) -> Result<String, WireError> {
    match Value::from_wire(wire)? {
        Value::Text(text) => Ok(text),
        other => Err(WireError::wrong_type("String", &other)),
    }
}
