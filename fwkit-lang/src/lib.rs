//! Implements the macro expression language of the fwkit calculator.
//!
//! Expressions are C-style integer arithmetic over arbitrary precision literals. Evaluation
//! runs in three stages: [`normalize`] rewrites the raw text, [`parse`] builds an
//! [`ast::Expr`] and [`eval_expr`] computes its [`Value`]. [`evaluate`] runs all of them.

pub mod ast;
mod eval;
mod lexer;
mod normalize;
mod parser;
mod span;

pub use {
    eval::{EvalErr, EvalErrKind, EvaluationResult, Value, eval_expr, evaluate},
    normalize::normalize,
    parser::{ParseError, parse},
    span::Span,
};

/// The integer type used for arbitrary precision integers.
pub type Int = num_bigint::BigInt;

/// Parses the given string into an integer of the given base.
fn int_from_str(base: u32, s: &str) -> Option<Int> {
    <Int as num_traits::Num>::from_str_radix(s, base).ok()
}
