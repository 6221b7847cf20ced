//! Pattern 1: Singleton
//! Process-Wide Log Accumulator
//!
//! Run with: cargo run --bin p1_singleton_logger

use colored::{ColoredString, Colorize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// Milestone 1: Log entries
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Level::Info => text.green(),
            Level::Warning => text.yellow(),
            Level::Error => text.red().bold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level.label(), self.message)
    }
}

// =============================================================================
// Milestone 2: The singleton
// =============================================================================

pub struct Logger {
    entries: Mutex<Vec<LogEntry>>,
}

lazy_static::lazy_static! {
    static ref LOGGER: Logger = Logger::new();
}

static HANDLES: AtomicUsize = AtomicUsize::new(0);

impl Logger {
    fn new() -> Self {
        println!("Creating a new Logger instance...");
        Logger {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// The one logger shared by the whole process.
    pub fn global() -> &'static Logger {
        if HANDLES.fetch_add(1, Ordering::SeqCst) > 0 {
            println!("Using the existing Logger instance...");
        }
        &LOGGER
    }

    fn entries(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_log(&self, level: Level, message: &str) {
        let entry = LogEntry {
            level,
            message: message.to_string(),
        };
        let rendered = entry.to_string();
        self.entries().push(entry);
        println!("Logged: {}", level.paint(&rendered));
    }

    pub fn info(&self, message: &str) {
        self.add_log(Level::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.add_log(Level::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.add_log(Level::Error, message);
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.entries().iter().map(LogEntry::to_string).collect()
    }

    pub fn entries_at(&self, level: Level) -> Vec<String> {
        self.entries()
            .iter()
            .filter(|entry| entry.level == level)
            .map(LogEntry::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

fn main() {
    println!("=== Singleton Logger ===\n");

    println!("--- Test 1: First Logger Instance ---");
    let logger1 = Logger::global();
    logger1.info("Application started.");
    logger1.warning("Potential configuration issue detected.");

    println!("\n--- Test 2: Second Logger Instance ---");
    let logger2 = Logger::global();
    logger2.error("Critical error: Database connection lost!");
    logger2.info("User logged in successfully.");

    println!("\n--- Test 3: Third Logger Instance ---");
    let logger3 = Logger::global();
    logger3.warning("Low disk space.");

    println!("\n--- Verifying Singleton Behavior ---");
    println!("Are logger1 and logger2 the same object? {}", std::ptr::eq(logger1, logger2));
    println!("Are logger1 and logger3 the same object? {}", std::ptr::eq(logger1, logger3));

    println!("\n--- All Accumulated Logs (from logger1's perspective) ---");
    for log in logger1.get_logs() {
        println!("{}", log);
    }

    println!("\n--- Warnings Only (from logger2's perspective) ---");
    for log in logger2.entries_at(Level::Warning) {
        println!("{}", log);
    }

    println!("\nNumber of logs from logger1: {}", logger1.len());
    println!("Number of logs from logger2: {}", logger2.len());
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // Fresh loggers keep tests independent of the shared global.
    fn fresh() -> Logger {
        Logger {
            entries: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_entry_format() {
        let entry = LogEntry {
            level: Level::Warning,
            message: "Low disk space.".to_string(),
        };
        assert_eq!(entry.to_string(), "WARNING: Low disk space.");
    }

    #[test]
    fn test_logs_keep_insertion_order() {
        let logger = fresh();
        logger.info("Application started.");
        logger.error("Critical error: Database connection lost!");
        logger.warning("Low disk space.");

        assert_eq!(
            logger.get_logs(),
            vec![
                "INFO: Application started.",
                "ERROR: Critical error: Database connection lost!",
                "WARNING: Low disk space.",
            ]
        );
    }

    #[test]
    fn test_entries_at_filters_by_level() {
        let logger = fresh();
        logger.info("a");
        logger.warning("b");
        logger.info("c");

        assert_eq!(logger.entries_at(Level::Info), vec!["INFO: a", "INFO: c"]);
        assert!(logger.entries_at(Level::Error).is_empty());
        assert_eq!(logger.len(), 3);
    }

    #[test]
    fn test_global_handles_share_one_instance() {
        let first = Logger::global();
        let second = Logger::global();
        assert!(std::ptr::eq(first, second));

        let before = second.len();
        first.info("from first handle");
        assert_eq!(second.len(), before + 1);
        assert!(second.get_logs().contains(&"INFO: from first handle".to_string()));
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let logger = fresh();
        thread::scope(|s| {
            for t in 0..4 {
                let logger = &logger;
                s.spawn(move || {
                    for i in 0..25 {
                        logger.info(&format!("thread {} message {}", t, i));
                    }
                });
            }
        });
        assert_eq!(logger.len(), 100);
        assert!(!logger.is_empty());
    }
}
