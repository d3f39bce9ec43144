//! # Wire Types
//!
//! This crate defines the value model shared by every layer of the
//! remote-object protocol: the self-describing wire value tree, the
//! typed tagged value that mirrors it, and the recursive query AST
//! used to address objects in a remote process.
//!
//! ## Philosophy
//!
//! - **Closed unions, not dynamic casts**: every value that can cross
//!   the wire is one variant of one enum
//! - **Lossless by construction**: numeric conversions are exact-fit
//!   checked and fail loudly, never truncate
//! - **Immutable value objects**: queries and tests are built by pure
//!   chained constructors; nothing is referenced by identity
//!
//! ## Key Types
//!
//! - [`FourCc`]: 4-byte code identifying types, keys, and enumerators
//! - [`WireValue`]: the self-describing tree handed to the transport
//! - [`Value`]: the typed tagged value, one variant active at a time
//! - [`Query`]: recursive addressing expression (root, object,
//!   insertion)
//! - [`TestClause`]: boolean filter grammar used by test-form
//!   addressing

pub mod codes;
pub mod error;
pub mod four_cc;
pub mod lower;
pub mod query;
pub mod test_clause;
pub mod value;
pub mod wire;

pub use error::WireError;
pub use four_cc::FourCc;
pub use query::{
    AbsoluteOrdinal, InsertionLocation, InsertionSpecifier, ObjectSpecifier, Query,
    RangeSelector, RelativeOrdinal, RootKind, Selector,
};
pub use test_clause::{ComparisonOp, TestClause};
pub use value::{Color, FileRef, Point, Record, Rect, Symbol, Timestamp, Value};
pub use wire::{WirePayload, WireValue};
