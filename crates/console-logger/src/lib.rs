//! Console Logger
//!
//! Installs a `tracing-subscriber` fmt subscriber whose output goes to the
//! browser console, one console call per line at the event's level. Off the
//! web the same lines go to stderr.

use std::io;

use thiserror::Error;
use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber
///
/// `level` is a level name such as `"debug"` or `"warn"`.
pub fn init_logger(app_name: &str, level: &str) -> Result<(), LoggerError> {
    let filter: LevelFilter = level
        .trim()
        .parse()
        .map_err(|_| LoggerError::InvalidLevel(level.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(ConsoleMakeWriter);

    // no system clock on wasm32-unknown-unknown
    #[cfg(target_arch = "wasm32")]
    let result = builder.without_time().try_init();
    #[cfg(not(target_arch = "wasm32"))]
    let result = builder.try_init();

    result.map_err(|e| LoggerError::Init(e.to_string()))?;
    tracing::info!(app = app_name, %filter, "logger initialized");
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it when flushed or dropped
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn emit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        for line in lines(&text) {
            write_line(self.level, line);
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

/// Non-empty lines of a formatted event, without trailing whitespace
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim_end).filter(|line| !line.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        _ => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{}", line);
}
