//! A minimal stderr backend for the `log` facade.
//!
//! Each record is prefixed with the time elapsed since the logger was
//! installed, so demo output doubles as a rough profile.

use std::str::FromStr;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the maximum log level (`info` if unset).
pub const LOG_ENV: &str = "GRIDTRAIL_LOG";

pub struct ElapsedLogger {
    start: Instant,
    level: LevelFilter,
}

impl ElapsedLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            start: Instant::now(),
            level,
        }
    }

    /// Render one line without the trailing newline.
    fn format(&self, record: &Record<'_>) -> String {
        format!(
            "[{:>7.2}s {:<5} {}] {}",
            self.start.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for ElapsedLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

/// Parse a level name, falling back to `info` for anything unrecognised.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install [`ElapsedLogger`] as the global logger, reading the level from
/// [`LOG_ENV`].
pub fn init_logging() -> Result<(), SetLoggerError> {
    let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());
    log::set_boxed_logger(Box::new(ElapsedLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}
