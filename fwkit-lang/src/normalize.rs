//! Rewrites raw expression text into the canonical form accepted by the evaluator.

use crate::lexer::{TokenKind, lex, literal_digits};

/// Returns `true` if a `+` directly after a token of this kind is a unary plus.
///
/// A missing previous token means the `+` starts the expression.
fn makes_plus_unary(prev: Option<TokenKind>) -> bool {
    matches!(
        prev,
        None | Some(
            TokenKind::LParen
                | TokenKind::Caret
                | TokenKind::VerticalLine
                | TokenKind::Ampersand
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Minus
                | TokenKind::Plus
        )
    )
}

/// Normalizes the given expression text.
///
/// - every integer literal loses its unsigned suffix (`4096U` becomes `4096`),
/// - a unary `+` at the start, after `(` or after another operator is removed together with
///   the white space before it,
/// - white space is collapsed into single spaces and trimmed.
///
/// Characters the lexer does not recognize are kept verbatim, so that validation can report
/// them. Normalizing an already normalized expression returns it unchanged.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev = None;

    for token in lex(input) {
        let text = token.text(input);

        match token.kind {
            TokenKind::Whitespace => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            TokenKind::Plus if makes_plus_unary(prev) => {
                if out.ends_with(' ') {
                    out.pop();
                }
            }
            kind if kind.is_literal() => {
                let (radix, digits) = literal_digits(kind, text);
                if radix == 16 {
                    out.push_str(&text[..2]);
                }
                out.push_str(digits);
                prev = Some(kind);
            }
            kind => {
                out.push_str(text);
                prev = Some(kind);
            }
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unsigned_suffixes() {
        assert_eq!(
            normalize("((0x24000000U) + (4096U * 2))"),
            "((0x24000000) + (4096 * 2))"
        );
        assert_eq!(normalize("0XFFu"), "0XFF");
    }

    #[test]
    fn collapses_white_space() {
        assert_eq!(normalize("  1 \n\t+   2  "), "1 + 2");
    }

    #[test]
    fn removes_unary_plus() {
        assert_eq!(normalize("+1"), "1");
        assert_eq!(normalize(" + 1"), "1");
        assert_eq!(normalize("1 + + 2"), "1 + 2");
        assert_eq!(normalize("1 +++ 2"), "1 + 2");
        assert_eq!(normalize("( + 3) * +4"), "( 3) *4");
        assert_eq!(normalize("1 - +2"), "1 -2");
    }

    #[test]
    fn keeps_plus_after_comparison() {
        // dropping it would glue `<` `<` into a shift
        assert_eq!(normalize("1 <+< 2"), "1 <+< 2");
    }

    #[test]
    fn keeps_unknown_characters() {
        assert_eq!(normalize("1 + abc$"), "1 + abc$");
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "((0x24000000U) + (4096U * 2))",
            "  +  +1 - + (2U  % 3)",
            "~0xFFu & (1<<4)",
            "1 + abc$",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "normalizing {input:?}");
        }
    }
}
