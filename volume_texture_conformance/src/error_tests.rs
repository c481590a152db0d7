//! Unit tests for error.rs
//!
//! Tests all Error variants, their Display output and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_allocation_failure_display() {
    let err = Error::AllocationFailure("gradient layer 2".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Allocation failure"));
    assert!(display.contains("gradient layer 2"));
}

#[test]
fn test_upload_failure_display() {
    let err = Error::UploadFailure("palette rejected".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Upload failure"));
    assert!(display.contains("palette rejected"));
}

#[test]
fn test_host_failure_display() {
    let err = Error::HostFailure("frame not saved".to_string());
    assert_eq!(format!("{}", err), "Host failure: frame not saved");
}

#[test]
fn test_unknown_test_display() {
    let err = Error::UnknownTest("SZ_NOPE".to_string());
    assert_eq!(format!("{}", err), "Unknown test: SZ_NOPE");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::UploadFailure("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::AllocationFailure("a".to_string()));
    assert!(debug.contains("AllocationFailure"));

    let debug = format!("{:?}", Error::UnknownTest("b".to_string()));
    assert!(debug.contains("UnknownTest"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::HostFailure("finish".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_upload(fail: bool) -> Result<u32> {
    if fail {
        crate::conformance_bail!(UploadFailure, "vtc::test", "rejected {} bytes", 64);
    }
    Ok(7)
}

#[test]
fn test_bail_returns_matching_variant() {
    match bail_upload(true) {
        Err(Error::UploadFailure(msg)) => assert_eq!(msg, "rejected 64 bytes"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_bail_not_taken() {
    assert_eq!(bail_upload(false).unwrap(), 7);
}

#[test]
fn test_err_builds_variant() {
    let err = crate::conformance_err!(AllocationFailure, "vtc::test", "layer {}", 3);
    match err {
        Error::AllocationFailure(msg) => assert_eq!(msg, "layer 3"),
        other => panic!("unexpected error: {:?}", other),
    }
}
