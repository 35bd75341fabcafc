//! Rolling Logger
//!
//! `log` backend that keeps the most recent lines in a circular buffer and
//! echoes each line to the browser console (stderr off the web).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Default number of lines kept
pub const DEFAULT_CAPACITY: usize = 500;

pub struct RollingLogger {
    app_name: String,
    capacity: usize,
    level: LevelFilter,
    lines: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(app_name: &str, capacity: usize) -> Self {
        Self {
            app_name: app_name.to_string(),
            capacity: capacity.max(1),
            level: LevelFilter::Info,
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Format and store a line, evicting the oldest when full
    pub fn push(&self, level: Level, target: &str, message: &str) -> String {
        let line = format_line(&self.app_name, level, target, message);
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line.clone());
        }
        line
    }

    /// Stored lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.push(record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

fn format_line(app_name: &str, level: Level, target: &str, message: &str) -> String {
    format!(
        "{} [{}] {:<5} {}: {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        app_name,
        level,
        target,
        message
    )
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger. Fails if another logger is already set.
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), String> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, capacity));
    log::set_logger(logger).map_err(|e| e.to_string())?;
    log::set_max_level(logger.level);
    Ok(())
}

/// Log a line outside the `log` facade (startup banner)
pub fn info(message: &str) -> Result<(), String> {
    let logger = LOGGER.get().ok_or("logger not initialized")?;
    let line = logger.push(Level::Info, "app", message);
    emit(Level::Info, &line);
    Ok(())
}

/// Lines captured by the global logger, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingLogger::lines).unwrap_or_default()
}
