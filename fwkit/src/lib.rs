//! Implements the conversion tools of fwkit.
//!
//! The crate offers three independent tools, each a pure function of its input:
//! - the macro calculator ([`evaluate`]),
//! - the bit-field viewer ([`bit_field`]),
//! - the memory dump viewer ([`memory`]).

#![forbid(unsafe_code)]

pub mod bit_field;
pub mod data;
pub mod memory;

pub use {
    bit_field::{BitFieldView, parse_bit_field_words},
    data::{bytes_to_words, parse_hex_stream},
    fwkit_common::{
        Address, Endianness, FileReadError, Word, format_address, read_file_bytes,
        read_stdin_bytes,
    },
    fwkit_lang::{EvalErr, EvalErrKind, EvaluationResult, Int, evaluate},
    memory::{MemoryDump, RowWidth},
};
