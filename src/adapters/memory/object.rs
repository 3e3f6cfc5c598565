//! In-memory document objects and documents

use crate::adapters::runtime::traits::{Document, DocumentObject, ObjectRef};
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory document object built from a fixture description
pub struct MemoryObject {
    identity: String,
    label: String,
    type_tag: String,
    measure: Option<f64>,
    children: Vec<ObjectRef>,
    link_target: RwLock<Option<ObjectRef>>,
    document_path: PathBuf,
}

impl MemoryObject {
    /// Create a shapeless leaf object
    pub fn new(identity: &str, label: &str, type_tag: &str) -> Self {
        Self {
            identity: identity.to_string(),
            label: label.to_string(),
            type_tag: type_tag.to_string(),
            measure: None,
            children: Vec::new(),
            link_target: RwLock::new(None),
            document_path: PathBuf::from("/memory/untitled.fcstd"),
        }
    }

    /// Give the object a geometric shape with the given measure
    pub fn with_measure(mut self, measure: f64) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Attach ordered children
    pub fn with_children(mut self, children: Vec<ObjectRef>) -> Self {
        self.children = children;
        self
    }

    /// Set the link target
    pub fn with_link_target(self, target: ObjectRef) -> Self {
        *self.link_target.write().expect("link target lock") = Some(target);
        self
    }

    /// Set the owning document path
    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = path.into();
        self
    }

    /// Rewire the link target after construction; lets fixtures build
    /// cyclic link graphs.
    pub fn set_link_target(&self, target: ObjectRef) {
        *self.link_target.write().expect("link target lock") = Some(target);
    }
}

impl DocumentObject for MemoryObject {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn identity(&self) -> &str {
        &self.identity
    }

    fn shape_measure(&self) -> Option<f64> {
        self.measure
    }

    fn children(&self) -> Vec<ObjectRef> {
        self.children.clone()
    }

    fn link_target(&self) -> Option<ObjectRef> {
        self.link_target.read().expect("link target lock").clone()
    }

    fn document_path(&self) -> PathBuf {
        self.document_path.clone()
    }
}

/// In-memory document: a path plus ordered top-level objects
pub struct MemoryDocument {
    path: PathBuf,
    objects: Vec<ObjectRef>,
}

impl MemoryDocument {
    /// Create a document with the given top-level objects
    pub fn new(path: impl Into<PathBuf>, objects: Vec<ObjectRef>) -> Self {
        Self {
            path: path.into(),
            objects,
        }
    }

    /// Create a document with no objects
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Vec::new())
    }
}

impl Document for MemoryDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn top_level_objects(&self) -> Vec<ObjectRef> {
        self.objects.clone()
    }

    fn object_by_label(&self, label: &str) -> Option<ObjectRef> {
        self.objects.iter().find(|o| o.label() == label).cloned()
    }

    fn recompute(&self) -> Result<()> {
        Ok(())
    }
}
