//! Integration tests for the conformance logging system
//!
//! These tests swap the global logger and are serialized.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use std::sync::{Arc, Mutex};

use serial_test::serial;
use volume_texture_conformance::conformance::format::FormatRegistry;
use volume_texture_conformance::conformance::host::{FailurePoint, RecordingHost};
use volume_texture_conformance::conformance::log::{LogEntry, LogSeverity, Logger};
use volume_texture_conformance::conformance::{Diagnostics, SuiteConfig, TestHost, VolumeTextureSuite};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    Diagnostics::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Diagnostics::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert!(captured.iter().all(|e| e.file.is_none() && e.line.is_none()));
    }

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_passing_case_logs_progress() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let suite = VolumeTextureSuite::new(SuiteConfig::default(), &FormatRegistry::known());
    let mut host = RecordingHost::new(16, 16);
    suite.run_named(&mut host, "SZ_A8R8G8B8").unwrap();

    {
        let captured = entries.lock().unwrap();
        assert!(captured.iter().all(|e| e.source.starts_with("vtc::")));
        assert!(captured.iter().any(|e| e.severity == LogSeverity::Debug
            && e.message.contains("Rendered -> Persisted")));
        assert!(captured.iter().any(|e| e.severity == LogSeverity::Info
            && e.message == "SZ_A8R8G8B8: passed"));
        assert!(!captured.iter().any(|e| e.severity == LogSeverity::Error));
    }

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_failed_case_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let suite = VolumeTextureSuite::new(SuiteConfig::default(), &FormatRegistry::known());
    let mut host = RecordingHost::new(16, 16);
    host.fail_on(FailurePoint::PaletteUpload);
    assert!(suite.run_named(&mut host, "SZ_I8_A8R8G8B8").is_err());

    {
        let captured = entries.lock().unwrap();
        let errors: Vec<&LogEntry> = captured.iter()
            .filter(|e| e.severity == LogSeverity::Error)
            .collect();

        // The host rejection and the aborted case
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].source, "vtc::RecordingHost");
        assert_eq!(errors[1].source, "vtc::Suite");
        assert!(errors[1].message.contains("aborted after LayersGenerated"));
        assert!(errors.iter().all(|e| e.file.is_some() && e.line.is_some()));
    }

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_raw_upload_warns_on_trailing_bytes() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let mut host = RecordingHost::new(16, 16);
    host.set_raw_texture(&[0u8; 20], 4, 4, 1, 4, 1, false).unwrap();

    {
        let captured = entries.lock().unwrap();
        let warnings: Vec<&LogEntry> = captured.iter()
            .filter(|e| e.severity == LogSeverity::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, "vtc::RecordingHost");
        assert_eq!(warnings[0].message, "raw upload ignores 4 trailing bytes");
    }

    Diagnostics::reset_logger();
}
