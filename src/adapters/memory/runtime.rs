//! In-memory CAD runtime

use crate::adapters::memory::object::MemoryDocument;
use crate::adapters::runtime::traits::{CadRuntime, Document, DocumentRef};
use crate::domain::{CadexError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory runtime holding fixture documents keyed by path
///
/// Tracks the open-document set and a cumulative open count so tests can
/// assert the release discipline.
pub struct MemoryRuntime {
    documents: BTreeMap<PathBuf, Arc<MemoryDocument>>,
    open: Mutex<BTreeSet<PathBuf>>,
    open_count: AtomicUsize,
}

impl std::fmt::Debug for MemoryRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRuntime")
            .field("documents", &self.documents.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl MemoryRuntime {
    /// Build a runtime from fixture documents
    pub fn with_documents(documents: Vec<MemoryDocument>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|d| (d.path().to_path_buf(), Arc::new(d)))
                .collect(),
            open: Mutex::new(BTreeSet::new()),
            open_count: AtomicUsize::new(0),
        }
    }

    /// How many times `open` succeeded over the runtime's lifetime
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl CadRuntime for MemoryRuntime {
    fn open(&self, path: &Path) -> Result<DocumentRef> {
        let document = self
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| CadexError::Runtime(format!("no such file: {}", path.display())))?;
        self.open
            .lock()
            .expect("open set lock")
            .insert(path.to_path_buf());
        self.open_count.fetch_add(1, Ordering::SeqCst);
        Ok(document)
    }

    fn close_document(&self, path: &Path) -> Result<()> {
        if self.open.lock().expect("open set lock").remove(path) {
            Ok(())
        } else {
            Err(CadexError::Runtime(format!(
                "document not open: {}",
                path.display()
            )))
        }
    }

    fn open_documents(&self) -> Vec<PathBuf> {
        self.open
            .lock()
            .expect("open set lock")
            .iter()
            .cloned()
            .collect()
    }
}
