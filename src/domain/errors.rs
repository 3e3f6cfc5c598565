//! Domain error types
//!
//! Error hierarchy for cadex. All errors are domain-specific and don't
//! expose collaborator-internal types.

use std::path::PathBuf;
use thiserror::Error;

/// Main cadex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error categories and provides context for error handling.
#[derive(Debug, Error)]
pub enum CadexError {
    /// Bad input before any work starts (null object, duplicate stems,
    /// missing file). Always fatal for the whole batch.
    #[error("Input error: {0}")]
    Input(String),

    /// The input file set is not closed under assembly links.
    #[error("Closure violation: {} file(s) referenced but not in the input set", missing.len())]
    ClosureViolation {
        /// Referenced files absent from the input set
        missing: Vec<PathBuf>,
    },

    /// A cycle was found while walking the link graph.
    #[error("Link cycle detected at {0}")]
    LinkCycle(String),

    /// Object category has no export path (sketches, unclassified tags).
    /// Recorded as a skip at the call site, never fatal.
    #[error("Unsupported object: {0}")]
    Unsupported(String),

    /// The external shape encoder failed.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The external page renderer failed.
    #[error("Render error: {0}")]
    Render(String),

    /// CAD runtime errors (open/close/lookup failures).
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// The bounded GUI-readiness wait was exceeded.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CadexError {
    /// True for error kinds that abort the batch before any document is
    /// opened, as opposed to per-object failures logged during traversal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CadexError::Input(_)
                | CadexError::ClosureViolation { .. }
                | CadexError::LinkCycle(_)
                | CadexError::Configuration(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CadexError {
    fn from(err: std::io::Error) -> Self {
        CadexError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CadexError {
    fn from(err: toml::de::Error) -> Self {
        CadexError::Configuration(format!("TOML parse error: {err}"))
    }
}
