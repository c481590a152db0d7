//! Error types for the volume texture conformance suite
//!
//! Every failure in a test case is fatal: it is returned to the case boundary
//! and the suite decides whether to halt.

use std::fmt;

/// Result type for conformance operations
pub type Result<T> = std::result::Result<T, Error>;

/// Conformance errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A pixel, index or palette buffer could not be allocated
    AllocationFailure(String),

    /// The host rejected a texture or palette transfer
    UploadFailure(String),

    /// The host failed outside of an upload (frame finalization, etc.)
    HostFailure(String),

    /// No test case is registered under the requested name
    UnknownTest(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure(msg) => write!(f, "Allocation failure: {}", msg),
            Error::UploadFailure(msg) => write!(f, "Upload failure: {}", msg),
            Error::HostFailure(msg) => write!(f, "Host failure: {}", msg),
            Error::UnknownTest(name) => write!(f, "Unknown test: {}", name),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build the matching `Error` variant
///
/// # Example
///
/// ```no_run
/// # use volume_texture_conformance::conformance_err;
/// let err = conformance_err!(UploadFailure, "vtc::Suite", "palette of {} entries rejected", 256);
/// ```
#[macro_export]
macro_rules! conformance_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::conformance_error!($source, "{}", message);
        $crate::conformance::Error::$variant(message)
    }};
}

/// Log an ERROR (with file:line) and return the matching `Error` variant
///
/// # Example
///
/// ```no_run
/// # use volume_texture_conformance::conformance_bail;
/// # fn f() -> volume_texture_conformance::conformance::Result<()> {
/// conformance_bail!(AllocationFailure, "vtc::Surface", "zero-sized surface");
/// # }
/// ```
#[macro_export]
macro_rules! conformance_bail {
    ($variant:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::conformance_err!($variant, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
