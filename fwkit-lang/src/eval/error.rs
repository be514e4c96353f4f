//! Implements errors for evaluating expressions.

use std::fmt;

use crate::{Span, parser::ParseError};

/// The kind of error that stopped an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrKind {
    /// The expression was empty or only white space.
    EmptyInput,
    /// The expression contained characters outside the allowed set.
    InvalidCharacter,
    /// The expression could not be parsed or an operation on its values failed.
    SyntaxOrEvaluation,
    /// The expression did not evaluate to an integer.
    NonIntegerResult,
}

/// An error that occurred while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalErr {
    /// The error message.
    pub message: String,
    /// The kind of error that occurred.
    pub kind: EvalErrKind,
    /// The location in the normalized expression where the error occurred, if known.
    pub span: Option<Span>,
}

impl EvalErr {
    /// The error for an empty expression.
    pub(crate) fn empty_input() -> EvalErr {
        EvalErr {
            message: String::from("Input is empty"),
            kind: EvalErrKind::EmptyInput,
            span: None,
        }
    }

    /// An arithmetic failure at the given span.
    pub(crate) fn arithmetic(message: impl Into<String>, span: Span) -> EvalErr {
        EvalErr {
            message: message.into(),
            kind: EvalErrKind::SyntaxOrEvaluation,
            span: Some(span),
        }
    }
}

impl From<ParseError> for EvalErr {
    fn from(err: ParseError) -> Self {
        EvalErr {
            message: err.message,
            kind: EvalErrKind::SyntaxOrEvaluation,
            span: Some(err.span),
        }
    }
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalErr {}
