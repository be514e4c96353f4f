//! Implements the memory dump viewer.
//!
//! A dump always treats its input as a raw byte stream and shows it as 32-bit words, a
//! configurable number of bytes per row.

use std::fmt;

use fwkit_common::{Address, Endianness, WORD_BYTES, Word, format_address};

use crate::{bit_field::BitFieldView, data::parse_hex_stream};

/// The largest number of words shown in a bit-field breakdown.
pub const MAX_BREAKDOWN_RANGE: usize = 16;

/// The number of bytes shown in a single row of a dump.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowWidth {
    /// 4 bytes per row.
    Four,
    /// 8 bytes per row.
    Eight,
    /// 16 bytes per row.
    #[default]
    Sixteen,
    /// 32 bytes per row.
    ThirtyTwo,
}

impl RowWidth {
    /// All supported row widths, narrowest first.
    pub const ALL: [RowWidth; 4] = [
        RowWidth::Four,
        RowWidth::Eight,
        RowWidth::Sixteen,
        RowWidth::ThirtyTwo,
    ];

    /// The number of bytes in a row.
    pub fn bytes(self) -> usize {
        match self {
            RowWidth::Four => 4,
            RowWidth::Eight => 8,
            RowWidth::Sixteen => 16,
            RowWidth::ThirtyTwo => 32,
        }
    }

    /// The number of words in a row.
    pub fn words_per_row(self) -> usize {
        self.bytes() / WORD_BYTES
    }
}

/// A row width that is not one of the supported ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRowWidth(pub usize);

impl fmt::Display for InvalidRowWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported row width {}, expected one of 4, 8, 16 or 32",
            self.0
        )
    }
}

impl std::error::Error for InvalidRowWidth {}

impl TryFrom<usize> for RowWidth {
    type Error = InvalidRowWidth;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        RowWidth::ALL
            .into_iter()
            .find(|width| width.bytes() == bytes)
            .ok_or(InvalidRowWidth(bytes))
    }
}

impl std::str::FromStr for RowWidth {
    type Err = InvalidRowWidth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().parse::<usize>().map_err(|_| InvalidRowWidth(0))?;

        RowWidth::try_from(bytes)
    }
}

/// A single row of a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpRow {
    /// The address of the first byte in the row.
    pub address: String,
    /// The words in the row; the last row may hold fewer than a full row.
    pub words: Vec<Word>,
}

/// Formats a word for a dump cell: eight uppercase hex digits without prefix.
pub fn cell_text(word: Word) -> String {
    format!("{word:08X}")
}

/// Parses the number of words to show in a breakdown.
///
/// Unparseable text means a single word; other values are clamped to
/// `1..=`[`MAX_BREAKDOWN_RANGE`].
pub fn parse_range(text: &str) -> usize {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|&range| range != 0)
        .map_or(1, |range| {
            usize::try_from(range.clamp(1, MAX_BREAKDOWN_RANGE as i64)).unwrap_or(1)
        })
}

/// The words of a memory dump.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryDump {
    /// The words of the dump.
    words: Vec<Word>,
}

impl MemoryDump {
    /// Creates a dump of pasted hex text, read as a little endian byte stream.
    pub fn from_text(text: &str) -> MemoryDump {
        MemoryDump::from_text_with(text, Endianness::Little)
    }

    /// Creates a dump of pasted hex text, read as a byte stream with the given endianness.
    pub fn from_text_with(text: &str, endianness: Endianness) -> MemoryDump {
        MemoryDump::from_bytes_with(&parse_hex_stream(text), endianness)
    }

    /// Creates a dump of uploaded binary data, read as little endian words.
    pub fn from_bytes(bytes: &[u8]) -> MemoryDump {
        MemoryDump::from_bytes_with(bytes, Endianness::Little)
    }

    /// Creates a dump of uploaded binary data, read with the given endianness.
    pub fn from_bytes_with(bytes: &[u8], endianness: Endianness) -> MemoryDump {
        MemoryDump {
            words: endianness.assemble_words(bytes),
        }
    }

    /// The words of the dump.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns `true` if the dump holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Splits the dump into rows of the given width, addressed relative to `base_text`.
    pub fn rows(&self, width: RowWidth, base_text: &str) -> Vec<DumpRow> {
        self.words
            .chunks(width.words_per_row())
            .enumerate()
            .map(|(row, words)| DumpRow {
                address: format_address(base_text, (row * width.bytes()) as u64),
                words: words.to_vec(),
            })
            .collect()
    }

    /// Returns the bit-field breakdown of `range` words starting at the word `index`.
    ///
    /// The rows are labelled with their addresses when `base_text` holds a base address and
    /// with `DW` indices relative to `index` otherwise. Returns `None` if `index` lies outside
    /// the dump.
    pub fn breakdown(&self, index: usize, range: usize, base_text: &str) -> Option<BitFieldView> {
        if index >= self.words.len() {
            return None;
        }

        let range = range.clamp(1, MAX_BREAKDOWN_RANGE);
        let end = index.saturating_add(range).min(self.words.len());
        let start = Address::parse_hex(base_text)
            .map(|base| base.wrapping_add((index * WORD_BYTES) as u64));

        Some(BitFieldView::with_base(&self.words[index..end], start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_always_a_byte_stream() {
        // a bit-field view would read this as two words
        let dump = MemoryDump::from_text("0xFF000000 0x00FF0000");
        assert_eq!(dump.words(), &[0x0000_00FF, 0x0000_FF00]);
    }

    #[test]
    fn rows_and_addresses() {
        let bytes: Vec<u8> = (0..40).collect();
        let dump = MemoryDump::from_bytes(&bytes);
        assert_eq!(dump.words().len(), 10);

        let rows = dump.rows(RowWidth::Sixteen, "");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].address, "0x0");
        assert_eq!(rows[1].address, "0x10");
        assert_eq!(rows[2].address, "0x20");
        assert_eq!(rows[0].words[0], 0x0302_0100);
        assert_eq!(rows[2].words.len(), 2);

        let rows = dump.rows(RowWidth::Four, "0x2000");
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[1].address, "0x2004");
    }

    #[test]
    fn row_addresses_wrap() {
        let dump = MemoryDump::from_bytes(&[0; 16]);
        let rows = dump.rows(RowWidth::Eight, "0xFFFFFFF8");
        assert_eq!(rows[0].address, "0xFFFFFFF8");
        assert_eq!(rows[1].address, "0x0");
    }

    #[test]
    fn empty_dump_has_no_rows() {
        let dump = MemoryDump::from_text("   ");
        assert!(dump.is_empty());
        assert!(dump.rows(RowWidth::default(), "").is_empty());
    }

    #[test]
    fn row_widths() {
        assert_eq!(RowWidth::default().words_per_row(), 4);
        assert_eq!(RowWidth::try_from(32usize), Ok(RowWidth::ThirtyTwo));
        assert_eq!(RowWidth::try_from(12usize), Err(InvalidRowWidth(12)));
    }

    #[test]
    fn row_widths_from_text() {
        assert_eq!("8".parse::<RowWidth>(), Ok(RowWidth::Eight));
        assert_eq!(" 32 ".parse::<RowWidth>(), Ok(RowWidth::ThirtyTwo));
        assert_eq!("12".parse::<RowWidth>(), Err(InvalidRowWidth(12)));
        assert_eq!("eight".parse::<RowWidth>(), Err(InvalidRowWidth(0)));
    }

    #[test]
    fn cells() {
        assert_eq!(cell_text(0xD912_4FA3), "D9124FA3");
        assert_eq!(cell_text(0xFF), "000000FF");
    }

    #[test]
    fn breakdown_labels() {
        let dump = MemoryDump::from_bytes(&[0; 32]);

        let view = dump.breakdown(2, 3, "0x1000").unwrap();
        let labels: Vec<_> = view.rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["0x00001008", "0x0000100C", "0x00001010"]);

        let view = dump.breakdown(2, 3, "").unwrap();
        assert_eq!(view.rows[0].label, "DW0");
    }

    #[test]
    fn breakdown_bounds() {
        let dump = MemoryDump::from_bytes(&[0; 8]);
        assert_eq!(dump.breakdown(1, 16, "").unwrap().rows.len(), 1);
        assert_eq!(dump.breakdown(0, 0, "").unwrap().rows.len(), 1);
        assert!(dump.breakdown(2, 1, "").is_none());
    }

    #[test]
    fn ranges() {
        assert_eq!(parse_range("4"), 4);
        assert_eq!(parse_range(""), 1);
        assert_eq!(parse_range("0"), 1);
        assert_eq!(parse_range("100"), 16);
        assert_eq!(parse_range("-3"), 1);
    }
}
