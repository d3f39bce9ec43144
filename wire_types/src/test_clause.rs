//! The boolean test sub-grammar used by test-form addressing.
//!
//! Comparisons relate two operands; logical nodes combine clauses.
//! Arity is carried by the shape (`And`/`Or` take two terms, `Not`
//! takes one), so an ill-formed host tree is unrepresentable; the
//! 1-or-2-terms rule survives as a wire decode check.
//!
//! Two operators are synthesized rather than primitive on the wire:
//! `NotEqual(a, b)` lowers to `NOT(Equal(a, b))`, and `IsIn(a, b)`
//! lowers to `Contains(b, a)` with the operands reversed. Decoding the
//! reserved `isin` pseudo-operator reverses the operands back.

use crate::codes;
use crate::error::WireError;
use crate::four_cc::FourCc;
use crate::value::{Symbol, Value};
use crate::wire::WireValue;
use serde::{Deserialize, Serialize};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    Less,
    LessOrEqual,
    Equal,
    /// Synthesized: lowers to `NOT(Equal)`.
    NotEqual,
    Greater,
    GreaterOrEqual,
    BeginsWith,
    EndsWith,
    Contains,
    /// Synthesized: lowers to `Contains` with reversed operands.
    IsIn,
}

impl ComparisonOp {
    fn from_primitive_code(code: FourCc) -> Option<Self> {
        match code {
            c if c == codes::OP_LESS => Some(ComparisonOp::Less),
            c if c == codes::OP_LESS_OR_EQUAL => Some(ComparisonOp::LessOrEqual),
            c if c == codes::OP_EQUAL => Some(ComparisonOp::Equal),
            c if c == codes::OP_GREATER => Some(ComparisonOp::Greater),
            c if c == codes::OP_GREATER_OR_EQUAL => Some(ComparisonOp::GreaterOrEqual),
            c if c == codes::OP_BEGINS_WITH => Some(ComparisonOp::BeginsWith),
            c if c == codes::OP_ENDS_WITH => Some(ComparisonOp::EndsWith),
            c if c == codes::OP_CONTAINS => Some(ComparisonOp::Contains),
            _ => None,
        }
    }
}

/// A recursive boolean test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TestClause {
    Comparison {
        op: ComparisonOp,
        lhs: Box<Value>,
        rhs: Box<Value>,
    },
    And(Box<TestClause>, Box<TestClause>),
    Or(Box<TestClause>, Box<TestClause>),
    Not(Box<TestClause>),
}

impl TestClause {
    pub fn comparison(op: ComparisonOp, lhs: Value, rhs: Value) -> Self {
        TestClause::Comparison {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn less(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::Less, lhs, rhs)
    }

    pub fn less_or_equal(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::LessOrEqual, lhs, rhs)
    }

    pub fn equals(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::Equal, lhs, rhs)
    }

    pub fn not_equals(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::NotEqual, lhs, rhs)
    }

    pub fn greater(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::Greater, lhs, rhs)
    }

    pub fn greater_or_equal(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::GreaterOrEqual, lhs, rhs)
    }

    pub fn begins_with(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::BeginsWith, lhs, rhs)
    }

    pub fn ends_with(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::EndsWith, lhs, rhs)
    }

    pub fn contains(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::Contains, lhs, rhs)
    }

    pub fn is_in(lhs: Value, rhs: Value) -> Self {
        Self::comparison(ComparisonOp::IsIn, lhs, rhs)
    }

    /// Combines two clauses with logical AND.
    pub fn and(self, other: TestClause) -> Self {
        TestClause::And(Box::new(self), Box::new(other))
    }

    /// Combines two clauses with logical OR.
    pub fn or(self, other: TestClause) -> Self {
        TestClause::Or(Box::new(self), Box::new(other))
    }

    /// Negates a clause.
    pub fn negate(self) -> Self {
        TestClause::Not(Box::new(self))
    }

    // ===== Wire form =====

    /// Lowers this test to its wire record form.
    pub fn to_wire(&self) -> WireValue {
        match self {
            TestClause::Comparison { op, lhs, rhs } => match op {
                // != is not a primitive wire operator.
                ComparisonOp::NotEqual => logical_record(
                    codes::OP_NOT,
                    vec![comparison_record(codes::OP_EQUAL, lhs, rhs)],
                ),
                // a isIn b is b contains a; operands reversed.
                ComparisonOp::IsIn => comparison_record(codes::OP_CONTAINS, rhs, lhs),
                ComparisonOp::Less => comparison_record(codes::OP_LESS, lhs, rhs),
                ComparisonOp::LessOrEqual => {
                    comparison_record(codes::OP_LESS_OR_EQUAL, lhs, rhs)
                }
                ComparisonOp::Equal => comparison_record(codes::OP_EQUAL, lhs, rhs),
                ComparisonOp::Greater => comparison_record(codes::OP_GREATER, lhs, rhs),
                ComparisonOp::GreaterOrEqual => {
                    comparison_record(codes::OP_GREATER_OR_EQUAL, lhs, rhs)
                }
                ComparisonOp::BeginsWith => comparison_record(codes::OP_BEGINS_WITH, lhs, rhs),
                ComparisonOp::EndsWith => comparison_record(codes::OP_ENDS_WITH, lhs, rhs),
                ComparisonOp::Contains => comparison_record(codes::OP_CONTAINS, lhs, rhs),
            },
            TestClause::And(lhs, rhs) => {
                logical_record(codes::OP_AND, vec![lhs.to_wire(), rhs.to_wire()])
            }
            TestClause::Or(lhs, rhs) => {
                logical_record(codes::OP_OR, vec![lhs.to_wire(), rhs.to_wire()])
            }
            TestClause::Not(term) => logical_record(codes::OP_NOT, vec![term.to_wire()]),
        }
    }

    /// Lifts a comparison or logical wire record back into a test.
    pub fn from_wire(wire: &WireValue) -> Result<TestClause, WireError> {
        match wire.type_tag {
            t if t == codes::TYPE_COMPARISON => Self::comparison_from_wire(wire),
            t if t == codes::TYPE_LOGICAL => Self::logical_from_wire(wire),
            _ => Err(WireError::wrong_type("TestClause", wire)),
        }
    }

    fn comparison_from_wire(wire: &WireValue) -> Result<TestClause, WireError> {
        let code = wire
            .required_field(codes::KEY_COMPARISON_OPERATOR)?
            .read_code()?;
        let first = Value::from_wire(wire.required_field(codes::KEY_FIRST_OPERAND)?)?;
        let second = Value::from_wire(wire.required_field(codes::KEY_SECOND_OPERAND)?)?;
        if code == codes::OP_IS_IN {
            // Reserved pseudo-operator: operands arrive reversed.
            return Ok(TestClause::is_in(second, first));
        }
        let op = ComparisonOp::from_primitive_code(code)
            .ok_or(WireError::UnknownOperator(code))?;
        Ok(TestClause::comparison(op, first, second))
    }

    fn logical_from_wire(wire: &WireValue) -> Result<TestClause, WireError> {
        let operator = wire
            .required_field(codes::KEY_LOGICAL_OPERATOR)?
            .read_code()?;
        let terms_value = wire.required_field(codes::KEY_LOGICAL_TERMS)?;
        let items = terms_value.items().ok_or_else(|| WireError::Malformed {
            tag: wire.type_tag,
            detail: "logical terms must be a list".to_string(),
        })?;
        let mut terms = Vec::with_capacity(items.len());
        for item in items {
            terms.push(TestClause::from_wire(item)?);
        }
        let count = terms.len();
        let mut drain = terms.drain(..);
        match operator {
            op if op == codes::OP_AND || op == codes::OP_OR => {
                match (drain.next(), drain.next(), drain.next()) {
                    (Some(lhs), Some(rhs), None) => {
                        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
                        if operator == codes::OP_AND {
                            Ok(TestClause::And(lhs, rhs))
                        } else {
                            Ok(TestClause::Or(lhs, rhs))
                        }
                    }
                    _ => Err(WireError::LogicalArity {
                        operator,
                        count,
                        expected: 2,
                    }),
                }
            }
            op if op == codes::OP_NOT => match (drain.next(), drain.next()) {
                (Some(term), None) => Ok(TestClause::Not(Box::new(term))),
                _ => Err(WireError::LogicalArity {
                    operator,
                    count,
                    expected: 1,
                }),
            },
            other => Err(WireError::UnknownOperator(other)),
        }
    }
}

fn comparison_record(operator: FourCc, first: &Value, second: &Value) -> WireValue {
    WireValue::record(
        codes::TYPE_COMPARISON,
        vec![
            (
                codes::KEY_COMPARISON_OPERATOR,
                Value::Symbol(Symbol::enumerated(operator)).to_wire(),
            ),
            (codes::KEY_FIRST_OPERAND, first.to_wire()),
            (codes::KEY_SECOND_OPERAND, second.to_wire()),
        ],
    )
}

fn logical_record(operator: FourCc, terms: Vec<WireValue>) -> WireValue {
    WireValue::record(
        codes::TYPE_LOGICAL,
        vec![
            (
                codes::KEY_LOGICAL_OPERATOR,
                Value::Symbol(Symbol::enumerated(operator)).to_wire(),
            ),
            (
                codes::KEY_LOGICAL_TERMS,
                WireValue::list(codes::TYPE_LIST, terms),
            ),
        ],
    )
}
