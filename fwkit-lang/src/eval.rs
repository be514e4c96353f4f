//! Implements evaluation of macro expressions.

use num_bigint::Sign;
use num_traits::Zero as _;

use crate::{
    Int,
    ast::{BinOp, Expr, ExprKind, UnOp},
    normalize::normalize,
    parser::parse,
    span::Span,
};

mod error;
mod value;

pub use error::{EvalErr, EvalErrKind};
pub use value::Value;

/// The largest number of bits a value may be shifted to the left.
const MAX_SHIFT: u32 = 1 << 16;

/// The message reported when the expression contains disallowed characters.
const INVALID_CHARS_MESSAGE: &str =
    "Invalid characters detected. Only math operators and hex/dec numbers allowed.";

/// The message reported when the expression does not evaluate to an integer.
const NON_INTEGER_MESSAGE: &str =
    "Result is not an integer. Check for non-integer division or syntax.";

/// The successful result of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    /// The value of the expression.
    pub value: Int,
    /// The value as signed decimal number.
    pub decimal: String,
    /// The value as uppercase hexadecimal number with a `0x` or `-0x` prefix.
    pub hex: String,
}

impl EvaluationResult {
    /// Creates the result for the given value.
    fn new(value: Int) -> EvaluationResult {
        let digits = value.magnitude().to_str_radix(16).to_uppercase();
        let hex = if value.sign() == Sign::Minus {
            format!("-0x{digits}")
        } else {
            format!("0x{digits}")
        };

        EvaluationResult {
            decimal: value.to_string(),
            hex,
            value,
        }
    }
}

/// Returns `true` if `c` may appear in a normalized expression.
fn is_allowed(c: char) -> bool {
    c.is_ascii_hexdigit()
        || c.is_whitespace()
        || matches!(
            c,
            'x' | 'X'
                | 'u'
                | 'U'
                | '+'
                | '-'
                | '*'
                | '/'
                | '%'
                | '('
                | ')'
                | '|'
                | '&'
                | '^'
                | '>'
                | '<'
                | '~'
        )
}

/// Evaluates the given C-style macro expression.
///
/// Integer literals are arbitrary precision, so the result is never truncated to a register
/// width. Spans in returned errors refer to the normalized expression.
///
/// Expressions nested more than 256 levels deep or longer than 4096 tokens are rejected with
/// [`EvalErrKind::SyntaxOrEvaluation`], since evaluation recurses along the expression tree.
pub fn evaluate(input: &str) -> Result<EvaluationResult, EvalErr> {
    if input.trim().is_empty() {
        return Err(EvalErr::empty_input());
    }

    let normalized = normalize(input);
    log::debug!("normalized {input:?} to {normalized:?}");

    if let Some((idx, c)) = normalized.char_indices().find(|&(_, c)| !is_allowed(c)) {
        return Err(EvalErr {
            message: String::from(INVALID_CHARS_MESSAGE),
            kind: EvalErrKind::InvalidCharacter,
            span: Some(Span {
                start: idx,
                end: idx + c.len_utf8(),
            }),
        });
    }

    let expr = parse(&normalized)?;

    match eval_expr(&expr)? {
        Value::Integer(value) => Ok(EvaluationResult::new(value)),
        Value::Boolean(_) => Err(EvalErr {
            message: String::from(NON_INTEGER_MESSAGE),
            kind: EvalErrKind::NonIntegerResult,
            span: Some(expr.span),
        }),
    }
}

/// Evaluates the given expression tree.
pub fn eval_expr(expr: &Expr) -> Result<Value, EvalErr> {
    match &expr.kind {
        ExprKind::Lit(value) => Ok(Value::Integer(value.clone())),
        ExprKind::UnOp { op, operand } => {
            let span = operand.span;
            let value = eval_expr(operand)?;

            Ok(match op {
                UnOp::Plus => value,
                UnOp::Neg => Value::Integer(-value.into_int(span)?),
                UnOp::BitNot => Value::Integer(!value.into_int(span)?),
            })
        }
        ExprKind::BinOp { op, lhs, rhs } => {
            let lhs_value = eval_expr(lhs)?.into_int(lhs.span)?;
            let rhs_value = eval_expr(rhs)?.into_int(rhs.span)?;

            enum OpKind {
                IntOp(fn(&Int, &Int) -> Int),
                FallibleIntOp(fn(&Int, &Int) -> Result<Int, String>),
                CmpOp(fn(&Int, &Int) -> bool),
            }

            let op_kind = match op {
                BinOp::Add => OpKind::IntOp(|x, y| x + y),
                BinOp::Sub => OpKind::IntOp(|x, y| x - y),
                BinOp::Mul => OpKind::IntOp(|x, y| x * y),
                // `/` and `%` on `BigInt` truncate toward zero like C
                BinOp::Div => OpKind::FallibleIntOp(|x, y| {
                    non_zero(y)?;
                    Ok(x / y)
                }),
                BinOp::Rem => OpKind::FallibleIntOp(|x, y| {
                    non_zero(y)?;
                    Ok(x % y)
                }),
                BinOp::Gt => OpKind::CmpOp(|x, y| x > y),
                BinOp::Lt => OpKind::CmpOp(|x, y| x < y),
                BinOp::BitAnd => OpKind::IntOp(|x, y| x & y),
                BinOp::BitOr => OpKind::IntOp(|x, y| x | y),
                BinOp::BitXor => OpKind::IntOp(|x, y| x ^ y),
                BinOp::ShiftLeft => OpKind::FallibleIntOp(|x, y| shift(x, y, true)),
                BinOp::ShiftRight => OpKind::FallibleIntOp(|x, y| shift(x, y, false)),
            };

            Ok(match op_kind {
                OpKind::IntOp(func) => Value::Integer(func(&lhs_value, &rhs_value)),
                OpKind::FallibleIntOp(func) => Value::Integer(
                    func(&lhs_value, &rhs_value)
                        .map_err(|message| EvalErr::arithmetic(message, expr.span))?,
                ),
                OpKind::CmpOp(func) => Value::Boolean(func(&lhs_value, &rhs_value)),
            })
        }
    }
}

/// Fails if the given divisor is zero.
fn non_zero(divisor: &Int) -> Result<(), String> {
    if divisor.is_zero() {
        Err(String::from("Division by zero"))
    } else {
        Ok(())
    }
}

/// Shifts `value` by `amount` bits, to the left if `left` is set.
///
/// Negative amounts shift into the other direction. Right shifts round toward negative
/// infinity.
fn shift(value: &Int, amount: &Int, left: bool) -> Result<Int, String> {
    let left = left != (amount.sign() == Sign::Minus);

    if left {
        let amount = u32::try_from(amount.magnitude())
            .ok()
            .filter(|&amount| amount <= MAX_SHIFT)
            .ok_or_else(|| format!("shift amount {amount} is too large"))?;

        Ok(value << amount)
    } else {
        // shifting past the highest bit always gives `0` or `-1`
        let amount = u64::try_from(amount.magnitude())
            .unwrap_or(u64::MAX)
            .min(value.bits() + 1);

        Ok(value >> amount)
    }
}
