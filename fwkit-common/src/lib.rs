//! Defines common types and functions used by all fwkit `crate`s.

pub use address::{Address, format_address, parse_hex_word, strip_hex_prefix};
pub use endianness::{Endianness, WORD_BYTES};
pub use input::{FileReadError, Source, read_file_bytes, read_stdin_bytes};

mod address;
mod endianness;
mod input;

/// An unsigned 32-bit word, the unit of the bit-field and memory views.
pub type Word = u32;
