//! Implements the lexer.

use std::fmt;

use crate::span::Span;

/// Describes all kinds of possible tokens.
#[derive(logos::Logos, Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    // Trivia
    /// Arbitrary amounts of white space.
    #[regex("\\s+")]
    Whitespace,

    // Literals
    /// A hexadecimal integer literal with an optional unsigned suffix.
    #[regex("0[xX][0-9a-fA-F]+[uU]?")]
    HexadecimalIntegerLiteral,
    /// A decimal integer literal with an optional unsigned suffix.
    #[regex("[0-9]+[uU]?")]
    DecimalIntegerLiteral,

    // Symbols
    /// The plus symbol: `+`.
    #[token("+")]
    Plus,
    /// The minus symbol: `-`.
    #[token("-")]
    Minus,
    /// The star symbol: `*`.
    #[token("*")]
    Star,
    /// The slash symbol: `/`.
    #[token("/")]
    Slash,
    /// The percent symbol: `%`.
    #[token("%")]
    Percent,
    /// The ampersand symbol: `&`.
    #[token("&")]
    Ampersand,
    /// The vertical line symbol: `|`.
    #[token("|")]
    VerticalLine,
    /// The caret symbol: `^`.
    #[token("^")]
    Caret,
    /// The tilde symbol: `~`.
    #[token("~")]
    Tilde,
    /// The left angle symbol: `<`.
    #[token("<")]
    LAngle,
    /// The right angle symbol: `>`.
    #[token(">")]
    RAngle,

    // Parentheses
    /// The left parenthesis: `(`.
    #[token("(")]
    LParen,
    /// The right parenthesis: `)`.
    #[token(")")]
    RParen,

    /// Represents any kind of error in the input stream.
    Error,
}

impl TokenKind {
    /// The human-readable name of this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::HexadecimalIntegerLiteral => "hexadecimal integer",
            TokenKind::DecimalIntegerLiteral => "decimal integer",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Ampersand => "`&`",
            TokenKind::VerticalLine => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Tilde => "`~`",
            TokenKind::LAngle => "`<`",
            TokenKind::RAngle => "`>`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Error => "an unrecognized token",
        }
    }

    /// Returns `true` if the `TokenKind` is trivia.
    ///
    /// A token is trivia if it carries no semantic value other than as a possible separator for
    /// other tokens.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns `true` if the `TokenKind` is an integer literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::HexadecimalIntegerLiteral | TokenKind::DecimalIntegerLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a single token produced by the lexer.
#[derive(Clone, Copy)]
pub(crate) struct Token {
    /// The kind of the token.
    pub(crate) kind: TokenKind,
    /// The span of the token.
    pub(crate) span: Span,
}

impl Token {
    /// The text of this token in `src`.
    pub(crate) fn text<'src>(&self, src: &'src str) -> &'src str {
        &src[self.span.start..self.span.end]
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:?}", self.kind, self.span)
    }
}

/// Lexes the given input into tokens.
pub(crate) fn lex(input: &str) -> Vec<Token> {
    let mut lexer = logos::Lexer::<TokenKind>::new(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let kind = kind.unwrap_or(TokenKind::Error);
        let span = lexer.span();

        tokens.push(Token {
            kind,
            span: Span {
                start: span.start,
                end: span.end,
            },
        });
    }

    log::trace!("lexed {input:?} into {tokens:?}");

    tokens
}

/// Returns the digits of an integer literal together with their radix.
///
/// The `0x` prefix and the unsigned suffix are removed; the suffix has no influence on the
/// value.
pub(crate) fn literal_digits(kind: TokenKind, text: &str) -> (u32, &str) {
    let text = text.trim_end_matches(['u', 'U']);

    match kind {
        TokenKind::HexadecimalIntegerLiteral => (16, &text[2..]),
        _ => (10, text),
    }
}
