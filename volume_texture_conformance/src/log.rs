//! Logging for conformance runs
//!
//! Every test case reports its progress (format selected, layers generated,
//! uploads, frame persisted) through a replaceable logger:
//! - Customizable logger via the Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR logs

use colored::*;
use std::fmt;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route conformance output elsewhere (a report
/// file, the harness's own console, a capture buffer in tests).
///
/// # Example
///
/// ```no_run
/// use volume_texture_conformance::conformance::log::{Logger, LogEntry};
///
/// struct ReportLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for ReportLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Append to the report...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "vtc::Suite", "vtc::Palette")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-layer and per-upload detail
    Trace,

    /// Case state transitions
    Debug,

    /// Case start/finish
    Info,

    /// Suspicious but non-fatal conditions
    Warn,

    /// Fatal case failures (with file:line)
    Error,
}

/// Default logger printing colored lines to stdout
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Format an entry without color codes
    pub fn format_plain(entry: &LogEntry) -> String {
        Self::compose(entry, severity_label(entry.severity), &entry.source)
    }

    /// Shared line layout; severity and source are styled by the caller
    fn compose(entry: &LogEntry, severity: impl fmt::Display, source: impl fmt::Display) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity, source, entry.message, file, line
            ),
            _ => format!("[{}] [{}] [{}] {}", timestamp, severity, source, entry.message),
        }
    }
}

fn severity_label(severity: LogSeverity) -> &'static str {
    match severity {
        LogSeverity::Trace => "TRACE",
        LogSeverity::Debug => "DEBUG",
        LogSeverity::Info => "INFO ",
        LogSeverity::Warn => "WARN ",
        LogSeverity::Error => "ERROR",
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let label = severity_label(entry.severity);
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        println!("{}", Self::compose(entry, severity, entry.source.bright_blue()));
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// # Example
///
/// ```no_run
/// # use volume_texture_conformance::conformance_trace;
/// conformance_trace!("vtc::Palette", "palette of {} entries", 256);
/// ```
#[macro_export]
macro_rules! conformance_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::conformance::Diagnostics::log(
            $crate::conformance::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// # use volume_texture_conformance::conformance_debug;
/// conformance_debug!("vtc::Suite", "layers generated for {}", "SZ_A8R8G8B8");
/// ```
#[macro_export]
macro_rules! conformance_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::conformance::Diagnostics::log(
            $crate::conformance::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (case start and outcome)
#[macro_export]
macro_rules! conformance_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::conformance::Diagnostics::log(
            $crate::conformance::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! conformance_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::conformance::Diagnostics::log(
            $crate::conformance::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```no_run
/// # use volume_texture_conformance::conformance_error;
/// conformance_error!("vtc::RecordingHost", "frame '{}' could not be finished", "SZ_A8");
/// ```
#[macro_export]
macro_rules! conformance_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::conformance::Diagnostics::log_detailed(
            $crate::conformance::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
