//! Turns free-form hex text into bytes and bytes into words.

use fwkit_common::{Endianness, Word};

/// Parses free-form hex text into bytes.
///
/// Every `0x`/`0X` is removed first, then every character that is not a hex digit. The
/// remaining digits are paired from the left; a trailing unpaired digit is dropped. This
/// never fails: noise is simply discarded.
pub fn parse_hex_stream(text: &str) -> Vec<u8> {
    let raw = text.as_bytes();
    let mut nibbles = Vec::with_capacity(raw.len());

    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'0' && matches!(raw.get(i + 1), Some(b'x' | b'X')) {
            i += 2;
            continue;
        }

        if let Some(nibble) = char::from(raw[i]).to_digit(16) {
            // a hex digit is always below 16
            nibbles.push(nibble as u8);
        }
        i += 1;
    }

    nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect()
}

/// Packs bytes into little endian words, zero padding a trailing partial word.
pub fn bytes_to_words(bytes: &[u8]) -> Vec<Word> {
    Endianness::Little.assemble_words(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_bytes() {
        assert_eq!(parse_hex_stream("FF AA BB CC"), vec![0xFF, 0xAA, 0xBB, 0xCC]);
        assert_eq!(parse_hex_stream("ff,aa\nbb;cc"), vec![0xFF, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn prefixes_are_removed() {
        assert_eq!(parse_hex_stream("0xA3 0X4F 0x12"), vec![0xA3, 0x4F, 0x12]);
        // prefixes are removed everywhere, not only at token starts
        assert_eq!(parse_hex_stream("A0xB"), vec![0xAB]);
    }

    #[test]
    fn digits_pair_across_separators() {
        assert_eq!(parse_hex_stream("A B C D"), vec![0xAB, 0xCD]);
        assert_eq!(parse_hex_stream("ABC DEF"), vec![0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn trailing_nibble_is_dropped() {
        assert_eq!(parse_hex_stream("FFA"), vec![0xFF]);
        assert_eq!(parse_hex_stream("F"), Vec::<u8>::new());
    }

    #[test]
    fn noise_only() {
        assert!(parse_hex_stream("").is_empty());
        assert!(parse_hex_stream("   \n").is_empty());
        assert!(parse_hex_stream("xyz!? ghij").is_empty());
    }

    #[test]
    fn words_from_bytes() {
        assert_eq!(bytes_to_words(&[0xA3, 0x4F, 0x12, 0xD9]), vec![0xD912_4FA3]);
        assert_eq!(bytes_to_words(&[0xFF]), vec![0x0000_00FF]);
        assert!(bytes_to_words(&[]).is_empty());
    }
}
