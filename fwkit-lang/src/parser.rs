//! Implements the parser for macro expressions.
//!
//! Expressions are parsed with a Pratt parser using the C operator precedences.

use std::fmt;

use crate::{
    ast::{BinOp, Expr, ExprKind, UnOp},
    int_from_str,
    lexer::{Token, TokenKind, lex, literal_digits},
    span::Span,
};

/// The maximum nesting depth of parentheses and prefix operators.
const MAX_DEPTH: usize = 256;

/// The maximum number of tokens in an expression.
///
/// Long operator chains nest as deeply as parentheses once parsed.
const MAX_TOKENS: usize = 4096;

/// A single parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The [`Span`] at which parsing failed.
    pub span: Span,
    /// The tokens that were expected instead of the found token.
    pub expected: Vec<&'static str>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parses the given expression text.
pub fn parse(src: &str) -> Result<Expr, ParseError> {
    let mut p = Parser::new(src);

    if p.tokens.len() > MAX_TOKENS {
        p.pos = MAX_TOKENS;
        let mut err = p.error(Vec::new());
        err.message = format!("expression has more than {MAX_TOKENS} tokens");
        return Err(err);
    }

    let expr = expr_bp(&mut p, 0)?;

    if p.cur().is_some() {
        return Err(p.error(vec!["operator", "end of input"]));
    }

    Ok(expr)
}

/// The state of the parser.
struct Parser<'src> {
    /// The source text.
    src: &'src str,
    /// The tokens of the source, without trivia.
    tokens: Vec<Token>,
    /// The index of the current token.
    pos: usize,
    /// The current nesting depth.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    fn new(src: &'src str) -> Parser<'src> {
        let tokens = lex(src)
            .into_iter()
            .filter(|token| !token.kind.is_trivia())
            .collect();

        Parser {
            src,
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// The kind of the current token.
    fn cur(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|token| token.kind)
    }

    /// Iterates over the upcoming tokens, starting at the current one.
    fn peek(&self) -> impl Iterator<Item = &Token> {
        self.tokens[self.pos.min(self.tokens.len())..].iter()
    }

    /// Consumes the current token.
    ///
    /// Must only be called when a current token exists.
    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    /// Consumes the current token if it has the given kind, failing otherwise.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.cur() == Some(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(vec![kind.name()]))
        }
    }

    /// Creates an error at the current token.
    fn error(&self, expected: Vec<&'static str>) -> ParseError {
        let (found, span) = match self.tokens.get(self.pos) {
            Some(token) => (format!("`{}`", token.text(self.src)), token.span),
            None => (
                String::from("end of input"),
                Span {
                    start: self.src.len(),
                    end: self.src.len(),
                },
            ),
        };

        ParseError {
            message: format!("expected {}, found {found}", expected.join(" or ")),
            span,
            expected,
        }
    }

    /// Enters a nested expression.
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let mut err = self.error(Vec::new());
            err.message = String::from("expression is nested too deeply");
            return Err(err);
        }

        Ok(())
    }

    /// Leaves a nested expression.
    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Parses an atomic expression.
fn atom(p: &mut Parser) -> Result<Expr, ParseError> {
    match p.cur() {
        Some(kind) if kind.is_literal() => {
            let token = p.bump();
            let text = token.text(p.src);
            let (radix, digits) = literal_digits(kind, text);

            let value = int_from_str(radix, digits).ok_or_else(|| ParseError {
                message: format!("invalid integer literal `{text}`"),
                span: token.span,
                expected: Vec::new(),
            })?;

            Ok(Expr {
                kind: ExprKind::Lit(value),
                span: token.span,
            })
        }
        Some(TokenKind::LParen) => {
            let open = p.bump();

            p.enter()?;
            let inner = expr_bp(p, 0)?;
            p.leave();

            let close = p.expect(TokenKind::RParen)?;

            Ok(Expr {
                kind: inner.kind,
                span: open.span.to(close.span),
            })
        }
        _ => Err(p.error(vec!["integer literal", "`(`", "`-`", "`~`"])),
    }
}

/// Parses an expression using a Pratt parser with the given minimum binding power.
fn expr_bp(p: &mut Parser, min_bp: u8) -> Result<Expr, ParseError> {
    // parse prefix and first atom
    let mut lhs = if let Some(op) = PrefixOp::peek(p) {
        let op_token = p.bump();
        let ((), r_bp) = op.binding_power();

        p.enter()?;
        let operand = expr_bp(p, r_bp)?;
        p.leave();

        Expr {
            span: op_token.span.to(operand.span),
            kind: ExprKind::UnOp {
                op: op.into(),
                operand: Box::new(operand),
            },
        }
    } else {
        atom(p)?
    };

    // infix loop
    loop {
        let Some(op) = InfixOp::peek(p) else {
            // no infix operator upcoming -> no more expression to parse
            break;
        };

        let (l_bp, r_bp) = op.binding_power();
        if l_bp < min_bp {
            break;
        }

        for _ in 0..op.token_count() {
            p.bump();
        }

        let rhs = expr_bp(p, r_bp)?;

        lhs = Expr {
            span: lhs.span.to(rhs.span),
            kind: ExprKind::BinOp {
                op: op.into(),
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        };
    }

    Ok(lhs)
}

/// A prefix operator.
#[derive(Debug)]
enum PrefixOp {
    /// `-`
    Neg,
    /// `+`
    ///
    /// A no-op
    Plus,
    /// `~`
    BitNot,
}

impl PrefixOp {
    /// Returns an upcoming prefix operator, if it is present.
    fn peek(p: &Parser) -> Option<PrefixOp> {
        match p.cur() {
            Some(TokenKind::Minus) => Some(PrefixOp::Neg),
            Some(TokenKind::Plus) => Some(PrefixOp::Plus),
            Some(TokenKind::Tilde) => Some(PrefixOp::BitNot),
            _ => None,
        }
    }

    /// Returns the binding powers of this operator.
    fn binding_power(&self) -> ((), u8) {
        match self {
            PrefixOp::Neg | PrefixOp::Plus | PrefixOp::BitNot => ((), 15),
        }
    }
}

impl From<PrefixOp> for UnOp {
    fn from(op: PrefixOp) -> Self {
        match op {
            PrefixOp::Neg => UnOp::Neg,
            PrefixOp::Plus => UnOp::Plus,
            PrefixOp::BitNot => UnOp::BitNot,
        }
    }
}

/// An infix operator.
#[derive(Debug)]
enum InfixOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
}

impl InfixOp {
    /// Returns an upcoming infix operator, if it is present.
    fn peek(p: &Parser) -> Option<InfixOp> {
        let mut peek = p.peek();

        match (peek.next(), peek.next()) {
            // two character operators
            (Some(t1), Some(t2))
                if t1.kind == TokenKind::LAngle
                    && t2.kind == TokenKind::LAngle
                    && t1.span.end == t2.span.start =>
            {
                Some(InfixOp::ShiftLeft)
            }
            (Some(t1), Some(t2))
                if t1.kind == TokenKind::RAngle
                    && t2.kind == TokenKind::RAngle
                    && t1.span.end == t2.span.start =>
            {
                Some(InfixOp::ShiftRight)
            }

            // single character operators
            (Some(t), _) => match t.kind {
                TokenKind::Plus => Some(InfixOp::Add),
                TokenKind::Minus => Some(InfixOp::Sub),
                TokenKind::Star => Some(InfixOp::Mul),
                TokenKind::Slash => Some(InfixOp::Div),
                TokenKind::Percent => Some(InfixOp::Rem),
                TokenKind::RAngle => Some(InfixOp::Gt),
                TokenKind::LAngle => Some(InfixOp::Lt),
                TokenKind::Ampersand => Some(InfixOp::BitAnd),
                TokenKind::VerticalLine => Some(InfixOp::BitOr),
                TokenKind::Caret => Some(InfixOp::BitXor),
                _ => None,
            },

            _ => None,
        }
    }

    /// The number of tokens that make up this operator.
    fn token_count(&self) -> usize {
        match self {
            InfixOp::ShiftLeft | InfixOp::ShiftRight => 2,
            _ => 1,
        }
    }

    /// Returns the binding powers of this operator.
    fn binding_power(&self) -> (u8, u8) {
        match self {
            InfixOp::BitOr => (1, 2),
            InfixOp::BitXor => (3, 4),
            InfixOp::BitAnd => (5, 6),
            InfixOp::Gt | InfixOp::Lt => (7, 8),
            InfixOp::ShiftLeft | InfixOp::ShiftRight => (9, 10),
            InfixOp::Add | InfixOp::Sub => (11, 12),
            InfixOp::Mul | InfixOp::Div | InfixOp::Rem => (13, 14),
        }
    }
}

impl From<InfixOp> for BinOp {
    fn from(op: InfixOp) -> Self {
        match op {
            InfixOp::Add => BinOp::Add,
            InfixOp::Sub => BinOp::Sub,
            InfixOp::Mul => BinOp::Mul,
            InfixOp::Div => BinOp::Div,
            InfixOp::Rem => BinOp::Rem,
            InfixOp::Gt => BinOp::Gt,
            InfixOp::Lt => BinOp::Lt,
            InfixOp::BitAnd => BinOp::BitAnd,
            InfixOp::BitOr => BinOp::BitOr,
            InfixOp::BitXor => BinOp::BitXor,
            InfixOp::ShiftLeft => BinOp::ShiftLeft,
            InfixOp::ShiftRight => BinOp::ShiftRight,
        }
    }
}
