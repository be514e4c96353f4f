//! Implements the bit-field viewer: word detection and per-bit breakdown of 32-bit words.

use fwkit_common::{Address, Endianness, Word, parse_hex_word, strip_hex_prefix};

/// The number of bits in a [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// How a bit-field input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// Every token is a complete 32-bit word.
    WordList,
    /// Every token is a single byte; words are reassembled from groups of four.
    ByteStream,
}

impl InputShape {
    /// Guesses the shape of the given tokens.
    ///
    /// This is a heuristic, not a declared format: the input is a word list as soon as one
    /// token has more than two hex digits. Inputs made only of short tokens are always read as
    /// a byte stream, even if they were meant as small words.
    pub fn classify<'a>(tokens: impl IntoIterator<Item = &'a str>) -> InputShape {
        if tokens.into_iter().any(|token| token.chars().count() > 2) {
            InputShape::WordList
        } else {
            InputShape::ByteStream
        }
    }
}

/// Splits bit-field input into tokens at white space and commas, removing `0x` prefixes.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(strip_hex_prefix)
        .collect()
}

/// Parses bit-field input into little endian words, see [`parse_bit_field_words_with`].
pub fn parse_bit_field_words(text: &str) -> Vec<Word> {
    parse_bit_field_words_with(text, Endianness::Little)
}

/// Parses bit-field input into words.
///
/// A word list yields one word per token, keeping the low 32 bits of wider values. Tokens
/// without a leading hex digit count as zero words, so every later word keeps its index. A
/// byte stream is reassembled with the given endianness; tokens that are not hex count as
/// zero bytes.
pub fn parse_bit_field_words_with(text: &str, endianness: Endianness) -> Vec<Word> {
    let tokens = tokenize(text);
    let shape = InputShape::classify(tokens.iter().copied());
    log::debug!("reading {} tokens as {shape:?}", tokens.len());

    match shape {
        InputShape::WordList => tokens
            .into_iter()
            .map(|token| parse_hex_word(token).unwrap_or(0))
            .collect(),
        InputShape::ByteStream => {
            let bytes: Vec<u8> = tokens
                .into_iter()
                // tokens have at most two digits here, so the low byte is the whole value
                .map(|token| parse_hex_word(token).unwrap_or(0) as u8)
                .collect();

            endianness.assemble_words(&bytes)
        }
    }
}

/// Formats a word as `0x` followed by eight uppercase hex digits.
pub fn to_hex32(word: Word) -> String {
    format!("0x{word:08X}")
}

/// The kind of group boundary that lies directly below a bit.
///
/// Front ends use this to draw separators between nibbles and bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoundary {
    /// No boundary.
    None,
    /// A nibble boundary.
    Nibble,
    /// A byte boundary.
    Byte,
}

impl BitBoundary {
    /// Returns the boundary between `bit` and `bit - 1`.
    pub fn of(bit: u32) -> BitBoundary {
        if bit == 0 {
            BitBoundary::None
        } else if bit % 8 == 0 {
            BitBoundary::Byte
        } else if bit % 4 == 0 {
            BitBoundary::Nibble
        } else {
            BitBoundary::None
        }
    }
}

/// A single word of the bit-field view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRow {
    /// Either the address of the word or `DW<index>`.
    pub label: String,
    /// The word itself.
    pub word: Word,
}

impl BitRow {
    /// Returns whether the given bit is set.
    pub fn bit(&self, bit: u32) -> bool {
        bit < WORD_BITS && (self.word >> bit) & 1 == 1
    }

    /// The bits of the word, from bit 31 down to bit 0.
    pub fn bits(&self) -> [bool; WORD_BITS as usize] {
        std::array::from_fn(|i| self.bit(WORD_BITS - 1 - i as u32))
    }

    /// The indices of the set bits, highest first.
    pub fn set_bits(&self) -> Vec<u32> {
        (0..WORD_BITS).rev().filter(|&bit| self.bit(bit)).collect()
    }

    /// Extracts the bits `hi` down to `lo` (both inclusive) as an unsigned value.
    ///
    /// Returns `None` unless `lo <= hi < 32`.
    pub fn field(&self, hi: u32, lo: u32) -> Option<Word> {
        if lo > hi || hi >= WORD_BITS {
            return None;
        }

        let width = hi - lo + 1;
        let mask = Word::MAX.checked_shr(WORD_BITS - width).unwrap_or(0);

        Some((self.word >> lo) & mask)
    }
}

/// The bit-field view of a sequence of words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitFieldView {
    /// One row per word.
    pub rows: Vec<BitRow>,
}

impl BitFieldView {
    /// Creates the view of `words`, labelling them relative to the base address in `base_text`.
    ///
    /// Without a usable base address the rows are labelled `DW0`, `DW1`, ...
    pub fn new(words: &[Word], base_text: &str) -> BitFieldView {
        BitFieldView::with_base(words, Address::parse_hex(base_text))
    }

    /// Creates the view of `words`, with the first word at `base` if present.
    pub fn with_base(words: &[Word], base: Option<Address>) -> BitFieldView {
        let rows = words
            .iter()
            .enumerate()
            .map(|(idx, &word)| BitRow {
                label: match base {
                    Some(base) => to_hex32(base.wrapping_add(idx as u64 * 4).as_word()),
                    None => format!("DW{idx}"),
                },
                word,
            })
            .collect();

        BitFieldView { rows }
    }

    /// Returns `true` if the view shows no words.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_path() {
        assert_eq!(
            parse_bit_field_words("0xFF000000 0x00FF0000"),
            vec![0xFF00_0000, 0x00FF_0000]
        );
        assert_eq!(parse_bit_field_words("1234, 0x5"), vec![0x1234, 0x5]);
    }

    #[test]
    fn byte_stream_path() {
        assert_eq!(parse_bit_field_words("FF AA BB CC"), vec![0xCCBB_AAFF]);
        assert_eq!(
            parse_bit_field_words("0x01,0x02,0x03,0x04,0x05"),
            vec![0x0403_0201, 0x0000_0005]
        );
        assert_eq!(
            parse_bit_field_words_with("FF AA BB CC", Endianness::Big),
            vec![0xFFAA_BBCC]
        );
    }

    #[test]
    fn short_words_are_read_as_bytes() {
        assert_eq!(
            InputShape::classify(tokenize("0x10 0x20")),
            InputShape::ByteStream
        );
        assert_eq!(
            InputShape::classify(tokenize("0x10 0x200")),
            InputShape::WordList
        );
    }

    #[test]
    fn wide_words_keep_low_bits() {
        assert_eq!(parse_bit_field_words("0x123456789"), vec![0x2345_6789]);
    }

    #[test]
    fn noise_in_word_list() {
        assert_eq!(parse_bit_field_words("zzz 0x100"), vec![0, 0x100]);
        assert_eq!(parse_bit_field_words("ABCq"), vec![0xABC]);
    }

    #[test]
    fn noise_keeps_word_positions() {
        let words = parse_bit_field_words("0x100 zzz 0x200");
        assert_eq!(words, vec![0x100, 0, 0x200]);

        let view = BitFieldView::new(&words, "0x1000");
        assert_eq!(view.rows[1].label, "0x00001004");
        assert_eq!(view.rows[2].label, "0x00001008");
        assert_eq!(view.rows[2].word, 0x200);
    }

    #[test]
    fn noise_in_byte_stream() {
        assert_eq!(parse_bit_field_words("FF zz"), vec![0x0000_00FF]);
    }

    #[test]
    fn empty_input() {
        assert!(parse_bit_field_words("").is_empty());
        assert!(parse_bit_field_words(" , \n").is_empty());
    }

    #[test]
    fn hex32() {
        assert_eq!(to_hex32(0xFF), "0x000000FF");
        assert_eq!(to_hex32(0xDEAD_BEEF), "0xDEADBEEF");
    }

    #[test]
    fn labels() {
        let view = BitFieldView::new(&[1, 2], "");
        assert_eq!(view.rows[0].label, "DW0");
        assert_eq!(view.rows[1].label, "DW1");

        let view = BitFieldView::new(&[1, 2], "0x2000");
        assert_eq!(view.rows[0].label, "0x00002000");
        assert_eq!(view.rows[1].label, "0x00002004");

        let view = BitFieldView::new(&[1, 2], "0xFFFFFFFC");
        assert_eq!(view.rows[1].label, "0x00000000");

        let view = BitFieldView::new(&[1], "nope");
        assert_eq!(view.rows[0].label, "DW0");
    }

    #[test]
    fn bits_of_a_row() {
        let row = BitRow {
            label: String::new(),
            word: 0x8000_0001,
        };
        let bits = row.bits();
        assert!(bits[0]);
        assert!(bits[31]);
        assert_eq!(bits.iter().filter(|&&bit| bit).count(), 2);
        assert_eq!(row.set_bits(), vec![31, 0]);
        assert!(!row.bit(32));
    }

    #[test]
    fn fields() {
        let row = BitRow {
            label: String::new(),
            word: 0xD912_4FA3,
        };
        assert_eq!(row.field(31, 24), Some(0xD9));
        assert_eq!(row.field(7, 4), Some(0xA));
        assert_eq!(row.field(31, 0), Some(0xD912_4FA3));
        assert_eq!(row.field(0, 0), Some(1));
        assert_eq!(row.field(3, 4), None);
        assert_eq!(row.field(32, 0), None);
    }

    #[test]
    fn boundaries() {
        assert_eq!(BitBoundary::of(24), BitBoundary::Byte);
        assert_eq!(BitBoundary::of(12), BitBoundary::Nibble);
        assert_eq!(BitBoundary::of(13), BitBoundary::None);
        assert_eq!(BitBoundary::of(0), BitBoundary::None);
    }
}
