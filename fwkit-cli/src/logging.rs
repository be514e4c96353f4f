//! Sets up logging to stderr.

use flexi_logger::{
    DeferredNow, FlexiLoggerError, Logger, LoggerHandle, Record, TS_DASHES_BLANK_COLONS_DOT_BLANK,
    style,
};

/// Writes a single log line.
fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = record.level();
    write!(
        w,
        "[{}] {} [{}] {}",
        style(level).paint(now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK).to_string()),
        style(level).paint(level.to_string()),
        record.module_path().unwrap_or("<unnamed>"),
        style(level).paint(record.args().to_string())
    )
}

/// Starts the logger.
///
/// Without `-v` flags the level comes from `RUST_LOG`, falling back to warnings only. Each
/// `-v` raises the level by one step and takes precedence over `RUST_LOG`.
pub fn init(verbosity: u8) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = match verbosity {
        0 => Logger::try_with_env_or_str("warn")?,
        1 => Logger::try_with_str("info")?,
        2 => Logger::try_with_str("debug")?,
        _ => Logger::try_with_str("trace")?,
    };

    logger.format(log_format).log_to_stderr().start()
}
