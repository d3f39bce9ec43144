//! The typed tagged value.
//!
//! `Value` is the closed union every wire value lifts into and every
//! host value encodes into. Exactly one variant is active at a time.
//! Equality is structural everywhere except [`Symbol`], which compares
//! and hashes by its 4-byte code alone (the type tag is advisory).

use crate::codes;
use crate::error::WireError;
use crate::four_cc::FourCc;
use crate::query::Query;
use crate::test_clause::TestClause;
use crate::wire::WireValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A 4-byte enumerator/class/property code plus its advisory type tag.
///
/// Two symbols are equal when their codes match; the type tag carries
/// wire-schema information (`type` vs `enum` vs `prop`) but does not
/// participate in identity.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub code: FourCc,
    pub type_tag: FourCc,
}

impl Symbol {
    /// Creates a class/type symbol (tagged `type`).
    pub const fn typed(code: FourCc) -> Self {
        Self {
            code,
            type_tag: codes::TYPE_TYPE,
        }
    }

    /// Creates an enumerator symbol (tagged `enum`).
    pub const fn enumerated(code: FourCc) -> Self {
        Self {
            code,
            type_tag: codes::TYPE_ENUMERATED,
        }
    }

    /// Creates a property symbol (tagged `prop`).
    pub const fn property(code: FourCc) -> Self {
        Self {
            code,
            type_tag: codes::TYPE_PROPERTY,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// A timestamp with wire-exact resolution: whole seconds since the
/// schema epoch. Kept opaque so structural encoding cannot degrade it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

/// A 2D point. Wire order is y then x, two big-endian i16s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

/// A rectangle as two corner points. Wire order is y0,x0,y1,x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i16,
    pub y0: i16,
    pub x1: i16,
    pub y1: i16,
}

/// An RGB color with three 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// A file reference in URL form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef(pub String);

/// A keyed record: unique 4-byte keys, order not significant. Carries
/// its own type tag so required-type coercion can retag it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub type_tag: FourCc,
    pub fields: BTreeMap<FourCc, Value>,
}

impl Record {
    /// Creates an empty record with the generic record tag.
    pub fn new() -> Self {
        Self {
            type_tag: codes::TYPE_RECORD,
            fields: BTreeMap::new(),
        }
    }

    /// Creates a record with an explicit type tag.
    pub fn with_tag(type_tag: FourCc) -> Self {
        Self {
            type_tag,
            fields: BTreeMap::new(),
        }
    }

    /// Inserts a field, replacing any previous value for the key.
    pub fn insert(&mut self, key: FourCc, value: Value) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: FourCc) -> Option<&Value> {
        self.fields.get(&key)
    }

    pub fn contains(&self, key: FourCc) -> bool {
        self.fields.contains_key(&key)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// The tagged value: every value that can cross the wire, one variant
/// active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// An uninterpreted wire value passed through verbatim.
    Opaque(WireValue),
    /// A query node (root, object specifier, or insertion).
    Query(Query),
    /// A test clause (comparison or logical).
    Test(TestClause),
    /// The missing-value sentinel.
    Missing,
    Symbol(Symbol),
    Bool(bool),
    Int32(i32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Text(String),
    Timestamp(Timestamp),
    List(Vec<Value>),
    Record(Record),
    FileRef(FileRef),
    Point(Point),
    Rect(Rect),
    Color(Color),
}

impl Value {
    /// Returns the query if this value is a query node.
    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Value::Query(query) => Some(query),
            _ => None,
        }
    }

    /// Returns the test clause if this value is a test node.
    pub fn as_test(&self) -> Option<&TestClause> {
        match self {
            Value::Test(test) => Some(test),
            _ => None,
        }
    }

    /// Narrows to i32 across the numeric variants. Exact-fit checked;
    /// overflow or a non-numeric variant is a typed error, never a
    /// silent truncation.
    pub fn to_i32(&self) -> Result<i32, WireError> {
        match self {
            Value::Int32(n) => Ok(*n),
            Value::Int64(n) => {
                i32::try_from(*n).map_err(|_| WireError::wrong_type("i32", self))
            }
            Value::UInt64(n) => {
                i32::try_from(*n).map_err(|_| WireError::wrong_type("i32", self))
            }
            _ => Err(WireError::wrong_type("i32", self)),
        }
    }

    /// Widens/narrows to i64 across the numeric variants.
    pub fn to_i64(&self) -> Result<i64, WireError> {
        match self {
            Value::Int32(n) => Ok(i64::from(*n)),
            Value::Int64(n) => Ok(*n),
            Value::UInt64(n) => {
                i64::try_from(*n).map_err(|_| WireError::wrong_type("i64", self))
            }
            _ => Err(WireError::wrong_type("i64", self)),
        }
    }

    /// Converts to u64 across the numeric variants; negatives fail.
    pub fn to_u64(&self) -> Result<u64, WireError> {
        match self {
            Value::Int32(n) => {
                u64::try_from(*n).map_err(|_| WireError::wrong_type("u64", self))
            }
            Value::Int64(n) => {
                u64::try_from(*n).map_err(|_| WireError::wrong_type("u64", self))
            }
            Value::UInt64(n) => Ok(*n),
            _ => Err(WireError::wrong_type("u64", self)),
        }
    }
}
