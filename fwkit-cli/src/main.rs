//! A command line front end for the fwkit conversion tools.
//!
//! Every command is a thin wrapper that reads its input, calls into `fwkit` and prints the
//! result either as text or as JSON.

use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use fwkit::{
    BitFieldView, Endianness, EvaluationResult, MemoryDump, RowWidth,
    bit_field::{BitBoundary, BitRow, WORD_BITS, parse_bit_field_words_with, to_hex32},
    evaluate,
    memory::{DumpRow, cell_text, parse_range},
    read_file_bytes, read_stdin_bytes,
};
use serde_json::Number;

mod logging;

/// fwkit - conversion tools for firmware developers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Config {
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Log more details to stderr, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// The tool to run
    #[command(subcommand)]
    command: Command,
}

/// The available tools.
#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluates a C macro expression such as `(0x24000000U + (4096U * 2))`
    Calc {
        /// The expression, its parts are joined with spaces
        #[arg(required = true, allow_hyphen_values = true)]
        expr: Vec<String>,
    },
    /// Shows the bits of 32-bit words given as words or as a little endian byte stream
    Bits {
        /// The address of the first word
        #[arg(short, long, default_value = "")]
        base: String,
        /// Assemble byte streams as big endian words
        #[arg(long)]
        big_endian: bool,
        /// The words or bytes, stdin if omitted
        text: Vec<String>,
    },
    /// Shows hex text or a binary file as 32-bit words
    Dump {
        /// The address of the first byte
        #[arg(short, long, default_value = "")]
        base: String,
        /// The number of bytes per row: 4, 8, 16 or 32
        #[arg(short, long, default_value = "16")]
        width: RowWidth,
        /// A binary file to show instead of hex text
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Assemble words as big endian
        #[arg(long)]
        big_endian: bool,
        /// Additionally show the bits of the word at this index
        #[arg(long)]
        breakdown: Option<usize>,
        /// The number of words in the breakdown, 1 to 16
        #[arg(long, default_value = "1")]
        range: String,
        /// The hex text, stdin if omitted and no file is given
        text: Vec<String>,
    },
}

/// The entry point for the application.
fn main() {
    let config = Config::parse();

    if let Err(err) = run(config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Runs the selected tool.
fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let _logger = logging::init(config.verbose)?;
    log::debug!("running {:?}", config.command);

    match config.command {
        Command::Calc { expr } => {
            let expr = expr.join(" ");

            let result = evaluate(&expr)?;

            if config.json {
                println!("{}", result_to_json(&result));
            } else {
                println!("decimal: {}", result.decimal);
                println!("hex:     {}", result.hex);
            }
        }
        Command::Bits {
            base,
            big_endian,
            text,
        } => {
            let text = text_or_stdin(text)?;
            let words = parse_bit_field_words_with(&text, endianness(big_endian));
            let view = BitFieldView::new(&words, &base);

            if config.json {
                println!("{}", view_to_json(&view));
            } else {
                print_view(&view);
            }
        }
        Command::Dump {
            base,
            width,
            file,
            big_endian,
            breakdown,
            range,
            text,
        } => {
            let dump = match file {
                Some(path) => MemoryDump::from_bytes_with(
                    &read_file_bytes(path)?,
                    endianness(big_endian),
                ),
                None => MemoryDump::from_text_with(&text_or_stdin(text)?, endianness(big_endian)),
            };
            let rows = dump.rows(width, &base);
            let breakdown =
                breakdown.and_then(|index| dump.breakdown(index, parse_range(&range), &base));

            if config.json {
                let mut object = serde_json::Map::new();
                object.insert(
                    String::from("rows"),
                    serde_json::Value::Array(rows.iter().map(row_to_json).collect()),
                );
                if let Some(view) = &breakdown {
                    object.insert(String::from("breakdown"), view_to_json(view));
                }
                println!("{}", serde_json::Value::Object(object));
            } else {
                print_rows(&rows, width);
                if let Some(view) = &breakdown {
                    println!();
                    print_view(view);
                }
            }
        }
    }

    Ok(())
}

/// Selects the endianness from the command line flag.
fn endianness(big_endian: bool) -> Endianness {
    if big_endian {
        Endianness::Big
    } else {
        Endianness::Little
    }
}

/// Joins the given text arguments, reading stdin if there are none.
fn text_or_stdin(text: Vec<String>) -> Result<String, fwkit::FileReadError> {
    if text.is_empty() {
        Ok(String::from_utf8_lossy(&read_stdin_bytes()?).into_owned())
    } else {
        Ok(text.join(" "))
    }
}

/// Renders the bits of a row, most significant first, with gaps between nibbles and bytes.
fn bits_text(row: &BitRow) -> String {
    let mut out = String::new();

    for bit in (0..WORD_BITS).rev() {
        out.push(if row.bit(bit) { '1' } else { '0' });
        match BitBoundary::of(bit) {
            BitBoundary::Byte => out.push_str("  "),
            BitBoundary::Nibble => out.push(' '),
            BitBoundary::None => (),
        }
    }

    out
}

/// Prints a bit-field view as text.
fn print_view(view: &BitFieldView) {
    if view.is_empty() {
        println!("No data to display.");
        return;
    }

    for row in &view.rows {
        println!("{:>10}  {}  {}", row.label, bits_text(row), to_hex32(row.word));
    }
}

/// Prints the rows of a dump as text.
fn print_rows(rows: &[DumpRow], width: RowWidth) {
    if rows.is_empty() {
        println!("Waiting for input data...");
        return;
    }

    let header: Vec<_> = (0..width.words_per_row())
        .map(|idx| format!("{:<8}", format!("DW{idx}")))
        .collect();
    println!("{:<12}{}", "Address", header.join(" "));

    for row in rows {
        let cells: Vec<_> = row.words.iter().map(|&word| cell_text(word)).collect();
        println!("{:<12}{}", row.address, cells.join(" "));
    }
}

/// Converts an evaluation result to JSON.
fn result_to_json(result: &EvaluationResult) -> serde_json::Value {
    let mut object = serde_json::Map::new();

    object.insert(
        String::from("decimal"),
        serde_json::Value::String(result.decimal.clone()),
    );
    object.insert(
        String::from("hex"),
        serde_json::Value::String(result.hex.clone()),
    );
    object.insert(
        String::from("value"),
        Number::from_str(&result.decimal)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    );

    serde_json::Value::Object(object)
}

/// Converts a bit-field view to JSON.
fn view_to_json(view: &BitFieldView) -> serde_json::Value {
    serde_json::Value::Array(
        view.rows
            .iter()
            .map(|row| {
                let mut object = serde_json::Map::new();
                object.insert(
                    String::from("label"),
                    serde_json::Value::String(row.label.clone()),
                );
                object.insert(String::from("word"), serde_json::Value::from(row.word));
                object.insert(
                    String::from("hex"),
                    serde_json::Value::String(to_hex32(row.word)),
                );
                object.insert(
                    String::from("set_bits"),
                    serde_json::Value::Array(
                        row.set_bits()
                            .into_iter()
                            .map(serde_json::Value::from)
                            .collect(),
                    ),
                );
                serde_json::Value::Object(object)
            })
            .collect(),
    )
}

/// Converts a row of a dump to JSON.
fn row_to_json(row: &DumpRow) -> serde_json::Value {
    let mut object = serde_json::Map::new();

    object.insert(
        String::from("address"),
        serde_json::Value::String(row.address.clone()),
    );
    object.insert(
        String::from("words"),
        serde_json::Value::Array(
            row.words
                .iter()
                .map(|&word| serde_json::Value::String(cell_text(word)))
                .collect(),
        ),
    );

    serde_json::Value::Object(object)
}
