use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);

pub fn init(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Map `-v` occurrences on the command line to a log level.
pub fn init_from_verbosity(count: u8) {
    let level = match count {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        _ => LogLevel::Debug,
    };
    init(level);
}

pub fn error(message: impl AsRef<str>) {
    log(LogLevel::Error, message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    log(LogLevel::Warn, message.as_ref());
}

pub fn info(message: impl AsRef<str>) {
    log(LogLevel::Info, message.as_ref());
}

pub fn debug(message: impl AsRef<str>) {
    log(LogLevel::Debug, message.as_ref());
}

fn log(level: LogLevel, message: &str) {
    let current = LOG_LEVEL.load(Ordering::Relaxed);
    if current >= level as u8 {
        eprintln!("[{}] {}", level.label(), message);
    }
}
