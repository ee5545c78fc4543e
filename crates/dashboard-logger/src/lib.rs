//! Dashboard Logger
//!
//! Installs a global `tracing` subscriber. In the browser every event goes to
//! the devtools console at the matching console level; natively events go to
//! stderr and `RUST_LOG` overrides the requested level.

use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    #[error("unknown log level: {0}")]
    InvalidLevel(String),
    #[error("a global logger is already installed")]
    AlreadyInitialised,
}

/// Parses `level` ("trace" .. "error", any case) into a filter.
pub fn level_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    let level = Level::from_str(level.trim()).map_err(|_| LoggerError::InvalidLevel(level.to_string()))?;
    Ok(EnvFilter::default().add_directive(LevelFilter::from_level(level).into()))
}

/// Installs the global subscriber. A second call leaves the first subscriber
/// in place and returns `AlreadyInitialised`.
pub fn init_logger(app_name: &str, level: &str) -> Result<(), LoggerError> {
    let filter = level_filter(level)?;
    install(filter)?;
    tracing::info!(app = app_name, level = level, "logger initialised");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn install(filter: EnvFilter) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or(filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialised)
}

#[cfg(target_arch = "wasm32")]
fn install(filter: EnvFilter) -> Result<(), LoggerError> {
    // No wall clock for `SystemTime` in the browser; devtools stamps lines.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(console::MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialised)
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    pub struct MakeConsoleWriter;

    /// Buffers one formatted event and hands it to the console on drop.
    pub struct ConsoleWriter {
        level: Level,
        buffer: Vec<u8>,
    }

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buffer: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buffer: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buffer);
            let line = JsValue::from_str(text.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                Level::INFO => web_sys::console::info_1(&line),
                _ => web_sys::console::debug_1(&line),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_level_parsing() {
        assert!(level_filter("debug").is_ok());
        assert!(level_filter(" WARN ").is_ok());
        assert_eq!(
            level_filter("loud").unwrap_err(),
            LoggerError::InvalidLevel("loud".to_string())
        );
    }

    #[test]
    fn test_filter_drops_lower_levels() {
        let sink = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(level_filter("warn").unwrap())
            .with_writer(sink.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("fetched 10 records");
            tracing::warn!("PATCH /api/mvp/2 -> 500");
        });

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("PATCH /api/mvp/2 -> 500"));
        assert!(!text.contains("fetched 10 records"));
    }

    #[test]
    fn test_second_init_is_rejected() {
        assert_eq!(init_logger("dashboard-test", "info"), Ok(()));
        assert_eq!(
            init_logger("dashboard-test", "debug"),
            Err(LoggerError::AlreadyInitialised)
        );
    }
}
