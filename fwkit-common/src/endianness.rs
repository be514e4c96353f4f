//! Implements a type to model endianness.

use crate::Word;

/// The number of bytes that make up a [`Word`].
pub const WORD_BYTES: usize = std::mem::size_of::<Word>();

/// Determines the byte-order of multi-byte structures.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Endianness {
    /// The most significant byte is stored at the highest address.
    #[default]
    Little,
    /// The most significant byte is stored at the lowest address.
    Big,
}

impl Endianness {
    /// The native endianness.
    pub fn native() -> Endianness {
        if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    /// Returns the function used to parse a [`Word`] from bytes of this endianness.
    pub fn word_from_bytes(self) -> fn([u8; WORD_BYTES]) -> Word {
        match self {
            Endianness::Little => Word::from_le_bytes,
            Endianness::Big => Word::from_be_bytes,
        }
    }

    /// Packs the given bytes into words, [`WORD_BYTES`] bytes at a time.
    ///
    /// A trailing group shorter than a word is padded with zero bytes at the positions
    /// past the end of the data, so the result always has `ceil(bytes.len() / 4)` words.
    pub fn assemble_words(self, bytes: &[u8]) -> Vec<Word> {
        let from_bytes = self.word_from_bytes();

        bytes
            .chunks(WORD_BYTES)
            .map(|chunk| {
                let mut buf = [0; WORD_BYTES];
                buf[..chunk.len()].copy_from_slice(chunk);
                from_bytes(buf)
            })
            .collect()
    }
}
