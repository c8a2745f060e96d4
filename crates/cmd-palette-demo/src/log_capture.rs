/// Debug console log capture
///
/// A logger that keeps recent records in a bounded buffer for the debug
/// console while still forwarding errors to stderr through env_logger.
use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Log buffer shared between logger and UI
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

pub struct DebugConsoleLogger {
    logs: LogBuffer,
    env_logger: env_logger::Logger,
    console_filter: env_logger::Logger,
}

impl DebugConsoleLogger {
    pub fn new(logs: LogBuffer) -> Self {
        // Terminal output stays at Error so it does not tear the TUI
        let env_logger = env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Error)
            .build();

        // RUST_LOG wins; otherwise only the demo and the engine at Debug
        let console_filter = if std::env::var("RUST_LOG").is_ok() {
            env_logger::Builder::from_default_env().build()
        } else {
            env_logger::Builder::new()
                .filter_module("cmd_palette_demo", LevelFilter::Debug)
                .filter_module("cmd_palette", LevelFilter::Debug)
                .build()
        };

        Self {
            logs,
            env_logger,
            console_filter,
        }
    }

    pub fn create_buffer() -> LogBuffer {
        Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)))
    }

    fn capture(&self, record: &Record) {
        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= MAX_LOG_ENTRIES {
                logs.pop_front();
            }
            logs.push_back(entry);
        }
    }
}

impl Log for DebugConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console_filter.enabled(metadata) || self.env_logger.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.console_filter.matches(record) {
            self.capture(record);
        }

        if self.env_logger.matches(record) {
            self.env_logger.log(record);
        }
    }

    fn flush(&self) {
        self.env_logger.flush();
    }
}

/// Install the debug console logger and return its buffer
///
/// Call once at startup before anything logs. Without `RUST_LOG` the console
/// shows Debug and above from `cmd_palette_demo` and `cmd_palette`; with it,
/// whatever `RUST_LOG` selects (crate names use underscores).
pub fn init_logger() -> Result<LogBuffer, log::SetLoggerError> {
    let logs = DebugConsoleLogger::create_buffer();
    let logger = DebugConsoleLogger::new(logs.clone());

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Trace);

    log::info!("Debug console initialized - press ` to toggle");
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(args: std::fmt::Arguments<'a>, target: &'a str) -> Record<'a> {
        Record::builder()
            .args(args)
            .level(Level::Debug)
            .target(target)
            .build()
    }

    #[test]
    fn test_buffer_is_bounded() {
        let logs = DebugConsoleLogger::create_buffer();
        let logger = DebugConsoleLogger::new(logs.clone());

        for _ in 0..MAX_LOG_ENTRIES + 5 {
            logger.capture(&record(format_args!("line"), "cmd_palette_demo"));
        }

        assert_eq!(logs.lock().unwrap().len(), MAX_LOG_ENTRIES);
    }

    #[test]
    fn test_entry_keeps_target_and_message() {
        let logs = DebugConsoleLogger::create_buffer();
        let logger = DebugConsoleLogger::new(logs.clone());
        logger.capture(&record(format_args!("hello {}", 42), "cmd_palette::palette"));

        let logs = logs.lock().unwrap();
        let entry = logs.front().unwrap();
        assert_eq!(entry.target, "cmd_palette::palette");
        assert_eq!(entry.message, "hello 42");
        assert_eq!(entry.level, Level::Debug);
    }
}
