//! Implements 32-bit addresses and their display format.

use std::fmt;

use crate::Word;

/// An address in a 32-bit address space.
///
/// All arithmetic on addresses wraps around at `2^32`.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Address(pub Word);

impl Address {
    /// The address zero.
    pub const ZERO: Address = Address(0);

    /// Parses a user supplied base address, see [`parse_hex_word`].
    ///
    /// Returns `None` if the text is blank or contains no hex digits.
    pub fn parse_hex(text: &str) -> Option<Address> {
        parse_hex_word(text).map(Address)
    }

    /// Returns the address that lies `offset` bytes after this one.
    pub fn wrapping_add(self, offset: u64) -> Address {
        // only the low 32 bits of the offset can affect the wrapped sum
        Address(self.0.wrapping_add(offset as Word))
    }

    /// The raw value of the address.
    pub fn as_word(self) -> Word {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Strips a single leading `0x` or `0X` from `text`.
pub fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Parses the hexadecimal number at the start of `text`, keeping its low 32 bits.
///
/// Surrounding white space is ignored, then an optional sign, then an optional `0x`/`0X`
/// prefix. Parsing consumes the longest run of hex digits and ignores whatever follows, so
/// `2000h` is read as `0x2000`. A leading `-` negates the value modulo `2^32`. Returns
/// `None` if no hex digit is found.
pub fn parse_hex_word(text: &str) -> Option<Word> {
    let text = text.trim();

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = strip_hex_prefix(unsigned);

    let mut value: Word = 0;
    let mut any_digit = false;
    for digit in digits.chars().map_while(|c| c.to_digit(16)) {
        value = value.wrapping_shl(4) | digit;
        any_digit = true;
    }

    if !any_digit {
        return None;
    }

    Some(if negative {
        value.wrapping_neg()
    } else {
        value
    })
}

/// Formats the address of the byte at `offset` relative to the base address in `base_text`.
///
/// Without a usable base address the offset itself is shown.
pub fn format_address(base_text: &str, offset: u64) -> String {
    let base = Address::parse_hex(base_text).unwrap_or(Address::ZERO);

    base.wrapping_add(offset).to_string()
}
