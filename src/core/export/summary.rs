//! Export summary and reporting
//!
//! Structures for tracking and reporting batch export results.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of exporting one document object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectOutcome {
    /// Object was exported to the given path
    Exported(PathBuf),
    /// Object had nothing to export; informational, never fatal
    Skipped(String),
    /// The object's own export step failed
    Failed(String),
}

impl ObjectOutcome {
    /// Whether this outcome counts as a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, ObjectOutcome::Failed(_))
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Bad input (duplicate stems, missing file, null object)
    Input,
    /// The shape encoder failed
    Encoding,
    /// The page renderer or GUI wait failed
    Render,
    /// The CAD runtime failed (open/close/lookup)
    Runtime,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g. object identity, file path)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Summary of a batch export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of input files processed
    pub total_files: usize,

    /// Number of objects visited by the dispatcher
    pub total_objects: usize,

    /// Number of objects exported
    pub exported: usize,

    /// Number of objects skipped (sketches, links, reference geometry)
    pub skipped: usize,

    /// Number of objects whose export failed
    pub failed: usize,

    /// Paths of every output file produced
    pub outputs: Vec<PathBuf>,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record one object outcome
    pub fn record(&mut self, outcome: &ObjectOutcome) {
        self.total_objects += 1;
        match outcome {
            ObjectOutcome::Exported(path) => {
                self.exported += 1;
                self.outputs.push(path.clone());
            }
            ObjectOutcome::Skipped(_) => self.skipped += 1,
            ObjectOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Check if the run completed without failures
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_files = self.total_files,
            total_objects = self.total_objects,
            exported = self.exported,
            skipped = self.skipped,
            failed = self.failed,
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_records_outcomes() {
        let mut summary = ExportSummary::new();
        summary.record(&ObjectOutcome::Exported(PathBuf::from("/out/a.step")));
        summary.record(&ObjectOutcome::Skipped("sketch".to_string()));
        summary.record(&ObjectOutcome::Failed("bad geometry".to_string()));

        assert_eq!(summary.total_objects, 3);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.outputs, vec![PathBuf::from("/out/a.step")]);
    }

    #[test]
    fn test_skip_is_not_failure() {
        let mut summary = ExportSummary::new();
        summary.record(&ObjectOutcome::Skipped("link".to_string()));
        assert!(summary.is_successful());
        assert!(!ObjectOutcome::Skipped("link".to_string()).is_failure());
    }

    #[test]
    fn test_errors_make_run_unsuccessful() {
        let mut summary = ExportSummary::new();
        assert!(summary.is_successful());
        summary.add_error(ExportError::new(ExportErrorType::Encoding, "boom"));
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_error_with_context() {
        let error = ExportError::new(ExportErrorType::Runtime, "open failed")
            .with_context("file=demo.fcstd");
        assert_eq!(error.context.as_deref(), Some("file=demo.fcstd"));
    }

    #[test]
    fn test_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(7));
        assert_eq!(summary.duration, Duration::from_secs(7));
    }
}
