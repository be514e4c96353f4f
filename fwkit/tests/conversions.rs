// Behavioral tests for the public conversion functions

use fwkit::{
    EvalErrKind, Int, MemoryDump, RowWidth, bit_field::to_hex32, bytes_to_words, evaluate,
    format_address, parse_bit_field_words, parse_hex_stream, read_file_bytes,
};

// ========== Macro calculator ==========

#[test]
fn test_register_address_macro() {
    let result = evaluate("((0x24000000U) + (4096U * 2))").unwrap();

    assert_eq!(result.hex, "0x24002000");
    assert_eq!(result.decimal, "603987968");
    assert_eq!(result.value, Int::from(0x2400_2000));
}

#[test]
fn test_truncating_division() {
    assert_eq!(evaluate("31/32").unwrap().decimal, "0");
    assert_eq!(evaluate("32/32").unwrap().decimal, "1");
    assert_eq!(evaluate("(0 - 31) / 32").unwrap().decimal, "0");
}

#[test]
fn test_negative_result() {
    let result = evaluate("-1 * 1").unwrap();

    assert_eq!(result.decimal, "-1");
    assert_eq!(result.hex, "-0x1");
}

#[test]
fn test_decimal_round_trips() {
    for (input, expected) in [
        ("1 + 2 * 3", 7i128),
        ("(1 + 2) * 3", 9),
        ("100 - 7 % 3", 99),
        ("0x10 << 2 | 1", 65),
        ("~0xF & 0xFF", 0xF0),
        ("-(5 - 10) / 2", 2),
        ("1 << 40", 1 << 40),
        ("0xFFFFFFFFU * 0xFFFFFFFFU", 0xFFFF_FFFE_0000_0001),
    ] {
        let result = evaluate(input).unwrap();
        assert_eq!(result.decimal.parse::<i128>(), Ok(expected), "evaluating {input:?}");
    }
}

#[test]
fn test_empty_expressions() {
    assert_eq!(evaluate("").unwrap_err().kind, EvalErrKind::EmptyInput);
    assert_eq!(evaluate("   ").unwrap_err().kind, EvalErrKind::EmptyInput);
}

#[test]
fn test_rejected_expressions() {
    assert_eq!(
        evaluate("sizeof(int)").unwrap_err().kind,
        EvalErrKind::InvalidCharacter
    );
    assert_eq!(
        evaluate("((1)").unwrap_err().kind,
        EvalErrKind::SyntaxOrEvaluation
    );
    assert_eq!(evaluate("4 > 3").unwrap_err().kind, EvalErrKind::NonIntegerResult);
}

// ========== Memory dump ==========

#[test]
fn test_hex_stream() {
    assert_eq!(parse_hex_stream("FF AA BB CC"), vec![0xFF, 0xAA, 0xBB, 0xCC]);
    assert_eq!(parse_hex_stream("FFA"), vec![0xFF]);
    assert!(parse_hex_stream("").is_empty());
}

#[test]
fn test_little_endian_words() {
    assert_eq!(bytes_to_words(&[0xA3, 0x4F, 0x12, 0xD9]), vec![0xD912_4FA3]);
    assert_eq!(bytes_to_words(&[0xFF]), vec![0x0000_00FF]);

    for len in 0..=9 {
        let bytes = vec![0xEE; len];
        assert_eq!(bytes_to_words(&bytes).len(), len.div_ceil(4));
    }
}

#[test]
fn test_addresses() {
    assert_eq!(format_address("", 8), "0x8");
    assert_eq!(format_address("0x2000", 4), "0x2004");
    assert_eq!(format_address("0xFFFFFFFC", 8), "0x4");
}

#[test]
fn test_dump_of_uploaded_file() {
    let path = std::env::temp_dir().join(format!("fwkit-dump-{}.bin", std::process::id()));
    std::fs::write(&path, [0xA3, 0x4F, 0x12, 0xD9, 0x01, 0x02]).unwrap();

    let bytes = read_file_bytes(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let dump = MemoryDump::from_bytes(&bytes);
    let rows = dump.rows(RowWidth::Four, "0x08000000");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].address, "0x8000000");
    assert_eq!(rows[0].words, vec![0xD912_4FA3]);
    assert_eq!(rows[1].address, "0x8000004");
    assert_eq!(rows[1].words, vec![0x0000_0201]);
}

// ========== Bit-field viewer ==========

#[test]
fn test_bit_field_word_list() {
    assert_eq!(
        parse_bit_field_words("0xFF000000 0x00FF0000"),
        vec![0xFF00_0000, 0x00FF_0000]
    );
}

#[test]
fn test_bit_field_byte_stream() {
    let words = parse_bit_field_words("FF AA BB CC");

    assert_eq!(words, vec![0xCCBB_AAFF]);
    assert_eq!(to_hex32(words[0]), "0xCCBBAAFF");
}
