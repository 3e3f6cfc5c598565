//! Recording shape encoder

use crate::adapters::runtime::traits::{DocumentObject, ShapeEncoder};
use crate::domain::{CadexError, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One recorded encoder invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCall {
    /// Identity of the encoded object
    pub identity: String,

    /// Output path the encoder was asked to write
    pub output: PathBuf,

    /// Global call sequence number, shared by shape and compound calls so
    /// tests can assert relative ordering
    pub sequence: usize,
}

/// Shape encoder that records calls, optionally writing placeholder
/// interchange files so filesystem-level assertions work too
pub struct RecordingEncoder {
    shape_calls: Mutex<Vec<EncodeCall>>,
    compound_calls: Mutex<Vec<EncodeCall>>,
    sequence: AtomicUsize,
    fail_identity: Option<String>,
    write_files: bool,
}

impl RecordingEncoder {
    /// Record calls without touching the filesystem
    pub fn new() -> Self {
        Self {
            shape_calls: Mutex::new(Vec::new()),
            compound_calls: Mutex::new(Vec::new()),
            sequence: AtomicUsize::new(0),
            fail_identity: None,
            write_files: false,
        }
    }

    /// Record calls and write a placeholder file for each export
    pub fn writing() -> Self {
        Self {
            write_files: true,
            ..Self::new()
        }
    }

    /// Fail every call for the object with the given identity, simulating a
    /// geometric encoding failure
    pub fn failing_on(identity: &str) -> Self {
        Self {
            fail_identity: Some(identity.to_string()),
            ..Self::new()
        }
    }

    /// Recorded single-shape calls in invocation order
    pub fn shape_calls(&self) -> Vec<EncodeCall> {
        self.shape_calls.lock().expect("shape call lock").clone()
    }

    /// Recorded compound calls in invocation order
    pub fn compound_calls(&self) -> Vec<EncodeCall> {
        self.compound_calls
            .lock()
            .expect("compound call lock")
            .clone()
    }

    fn encode(
        &self,
        object: &dyn DocumentObject,
        output: &Path,
        calls: &Mutex<Vec<EncodeCall>>,
    ) -> Result<()> {
        if self.fail_identity.as_deref() == Some(object.identity()) {
            return Err(CadexError::Encoding(format!(
                "cannot encode {}",
                object.identity()
            )));
        }
        if self.write_files {
            std::fs::write(output, format!("ISO-10303-21 stub for {}\n", object.identity()))?;
        }
        calls.lock().expect("call lock").push(EncodeCall {
            identity: object.identity().to_string(),
            output: output.to_path_buf(),
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
        });
        Ok(())
    }
}

impl Default for RecordingEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeEncoder for RecordingEncoder {
    fn encode_shape(&self, object: &dyn DocumentObject, output: &Path) -> Result<()> {
        self.encode(object, output, &self.shape_calls)
    }

    fn encode_compound(&self, object: &dyn DocumentObject, output: &Path) -> Result<()> {
        self.encode(object, output, &self.compound_calls)
    }
}
