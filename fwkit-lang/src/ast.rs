//! Implements the expression tree produced by the parser.

use crate::{Int, span::Span};

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// The negation operator: `-`.
    Neg,
    /// The plus operator: `+`.
    ///
    /// This is a no-op.
    Plus,
    /// The bitwise complement operator: `~`.
    BitNot,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// The addition operator: `+`.
    Add,
    /// The subtraction operator: `-`.
    Sub,
    /// The multiplication operator: `*`.
    Mul,
    /// The division operator: `/`.
    Div,
    /// The remainder operator: `%`.
    Rem,
    /// The greater than operator: `>`.
    Gt,
    /// The less than operator: `<`.
    Lt,
    /// The bitwise and operator: `&`.
    BitAnd,
    /// The bitwise or operator: `|`.
    BitOr,
    /// The bitwise xor operator: `^`.
    BitXor,
    /// The left shift operator: `<<`.
    ShiftLeft,
    /// The right shift operator: `>>`.
    ShiftRight,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of the expression.
    pub kind: ExprKind,
    /// The span of the expression.
    pub span: Span,
}

/// The different kinds of expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// An integer literal.
    Lit(Int),
    /// A unary operator expression.
    UnOp {
        /// The operator.
        op: UnOp,
        /// The operand of this expression.
        operand: Box<Expr>,
    },
    /// A binary operator expression.
    BinOp {
        /// The operator.
        op: BinOp,
        /// The left hand side of the operation.
        lhs: Box<Expr>,
        /// The right hand side of the operation.
        rhs: Box<Expr>,
    },
}
