//! Implements the values produced while evaluating expressions.

use std::fmt;

use num_bigint::Sign;

use crate::{Int, span::Span};

use super::error::{EvalErr, EvalErrKind};

/// The different kinds of values an expression can evaluate to.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// A boolean value, produced by comparisons.
    Boolean(bool),
    /// An integer value.
    Integer(Int),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(val) => write!(f, "{val:?}"),
            Self::Integer(int) => {
                if int.sign() == Sign::Minus {
                    write!(f, "{int} (-0x{:x})", -int)
                } else {
                    write!(f, "{int} (0x{int:x})")
                }
            }
        }
    }
}

impl Value {
    /// Returns the integer in this value, failing for booleans.
    ///
    /// The span is that of the expression which produced the value.
    pub(crate) fn into_int(self, span: Span) -> Result<Int, EvalErr> {
        match self {
            Value::Integer(value) => Ok(value),
            Value::Boolean(value) => Err(EvalErr {
                message: format!("cannot use the comparison result `{value}` as an integer"),
                kind: EvalErrKind::SyntaxOrEvaluation,
                span: Some(span),
            }),
        }
    }
}
