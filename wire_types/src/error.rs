//! Errors raised by the value model and the wire lowering/lifting.

use crate::four_cc::FourCc;
use thiserror::Error;

/// Error produced while converting values or interpreting wire trees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WireError {
    /// A value's shape or width does not match the requested type.
    #[error("wrong type: requested {target}, found {found}")]
    WrongType {
        /// Name of the requested target type (e.g. `i32`).
        target: &'static str,
        /// Debug form of the offending value.
        found: String,
    },

    /// A wire value tagged with a known type has a malformed payload.
    #[error("malformed {tag} value: {detail}")]
    Malformed { tag: FourCc, detail: String },

    /// A required record field is absent from a known record form.
    #[error("{record} record is missing field {key}")]
    MissingField { record: FourCc, key: FourCc },

    /// A logical test node carried an unsupported number of terms.
    #[error("logical test {operator} carries {count} terms, expected {expected}")]
    LogicalArity {
        operator: FourCc,
        count: usize,
        expected: usize,
    },

    /// An object specifier used a key form this schema does not define.
    #[error("unknown key form {0}")]
    UnknownKeyForm(FourCc),

    /// A test record used an operator this schema does not define.
    #[error("unknown test operator {0}")]
    UnknownOperator(FourCc),

    /// An insertion record used an undefined position enumerator.
    #[error("unknown insertion position {0}")]
    UnknownPosition(FourCc),
}

impl WireError {
    /// Convenience constructor for the narrow/shape mismatch case.
    pub fn wrong_type(target: &'static str, found: &impl std::fmt::Debug) -> Self {
        WireError::WrongType {
            target,
            found: format!("{found:?}"),
        }
    }
}
