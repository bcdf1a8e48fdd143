use parking_lot::Mutex;
/// Debug logging for jotpad
///
/// Controlled by the DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only (warnings included)
/// - 2: Info level (settings loads, store writes)
/// - 3: Debug level (command tables, broadcasts)
/// - 4: Trace level (every operation, detailed info)
///
/// When DEBUG_LEVEL is unset, RUST_LOG (`error`, `warn`, `info`, `debug`,
/// `trace`) is honoured instead.
///
/// All output goes to jotpad_debug.log in the system temp directory so the
/// host UI's stdout/stderr stay untouched.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(&val),
            Err(_) => std::env::var("RUST_LOG")
                .map(|val| Self::from_rust_log(&val))
                .unwrap_or(DebugLevel::Off),
        }
    }

    fn from_number(val: &str) -> Self {
        match val.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_rust_log(val: &str) -> Self {
        match val.trim().to_ascii_lowercase().as_str() {
            "error" | "warn" => DebugLevel::Error,
            "info" => DebugLevel::Info,
            "debug" => DebugLevel::Debug,
            "trace" => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    /// Most verbose `log` level this debug level lets through.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Warn,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }

    fn for_record(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => DebugLevel::Error,
            log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        let level = DebugLevel::from_env();

        let file = if level != DebugLevel::Off {
            match OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
            {
                Ok(f) => {
                    let mut logger = DebugLogger {
                        level,
                        file: Some(f),
                    };
                    logger.write_raw(&format!(
                        "\n{}\njotpad debug session started at {} (level={:?})\n{}\n",
                        "=".repeat(80),
                        get_timestamp(),
                        level,
                        "=".repeat(80)
                    ));
                    return logger;
                }
                // No log file means no debug output; never fall back to stderr
                Err(_e) => None,
            }
        } else {
            None
        };

        DebugLogger { level, file }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let timestamp = get_timestamp();
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                timestamp, level_str, category, msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("jotpad_debug.log")
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// Forwards `log` crate records into the debug log file.
///
/// The record's target (module path) becomes the category.
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        is_enabled(DebugLevel::for_record(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = if record.level() == log::Level::Warn {
            format!("WARN: {}", record.args())
        } else {
            record.args().to_string()
        };
        log(
            DebugLevel::for_record(record.level()),
            record.target(),
            &msg,
        );
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge;

/// Route `log::info!` and friends from every jotpad crate into the debug log.
///
/// Safe to call more than once; only the first call installs the bridge.
/// Returns false if another logger was already installed.
pub fn init_log_bridge() -> bool {
    let level = get_logger().lock().level;
    match log::set_logger(&BRIDGE) {
        Ok(()) => {
            log::set_max_level(level.to_level_filter());
            true
        }
        Err(_) => false,
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_number() {
        assert_eq!(DebugLevel::from_number("0"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_number(" 3 "), DebugLevel::Debug);
        assert_eq!(DebugLevel::from_number("9"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_number("loud"), DebugLevel::Off);
    }

    #[test]
    fn test_level_from_rust_log() {
        assert_eq!(DebugLevel::from_rust_log("WARN"), DebugLevel::Error);
        assert_eq!(DebugLevel::from_rust_log("info"), DebugLevel::Info);
        assert_eq!(DebugLevel::from_rust_log("jotpad=trace"), DebugLevel::Off);
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(DebugLevel::Off.to_level_filter(), log::LevelFilter::Off);
        assert_eq!(DebugLevel::Error.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(DebugLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_record_levels_map_in_order() {
        assert!(DebugLevel::for_record(log::Level::Warn) < DebugLevel::for_record(log::Level::Info));
        assert_eq!(DebugLevel::for_record(log::Level::Error), DebugLevel::Error);
    }
}
