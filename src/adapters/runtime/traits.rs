//! Collaborator abstraction traits
//!
//! These traits define the narrow interfaces cadex uses to talk to the
//! external CAD toolkit: the document runtime, the solid-geometry encoder,
//! the page renderer, and the GUI event loop. The core never reaches past
//! them, so a backend is swapped by providing one set of implementations.

use crate::config::TemplateFields;
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared reference to a document object
pub type ObjectRef = Arc<dyn DocumentObject>;

/// Shared reference to an open document
pub type DocumentRef = Arc<dyn Document>;

/// A single node in a document's object graph
///
/// Read-only to the core. Containers expose ordered children; link objects
/// expose the target they resolve to.
pub trait DocumentObject: Send + Sync {
    /// The runtime's declared type tag, e.g. `PartDesign::Body`
    fn type_tag(&self) -> &str;

    /// Human-readable display label
    fn label(&self) -> &str;

    /// Qualified identity string, unique within the owning document.
    /// Format: `{document}#{name}`.
    fn identity(&self) -> &str;

    /// Measure (surface area) of the object's geometric shape, or `None`
    /// when the object carries no shape attribute at all. Zero measure is
    /// the canonical symptom of a reference-only object.
    fn shape_measure(&self) -> Option<f64>;

    /// Direct children in the container's declared order; empty for leaves
    fn children(&self) -> Vec<ObjectRef>;

    /// Target object for link categories, `None` otherwise
    fn link_target(&self) -> Option<ObjectRef>;

    /// Absolute path of the file-backed document owning this object
    fn document_path(&self) -> PathBuf;
}

/// An open, file-backed document
pub trait Document: Send + Sync {
    /// Absolute path of the backing file
    fn path(&self) -> &Path;

    /// Top-level objects in document order
    fn top_level_objects(&self) -> Vec<ObjectRef>;

    /// Look up an object by its display label
    fn object_by_label(&self, label: &str) -> Option<ObjectRef>;

    /// Recompute the document's dependency graph
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime fails to recompute.
    fn recompute(&self) -> Result<()>;
}

/// The CAD application runtime owning documents and file I/O
///
/// The runtime is not safe for concurrent document mutation; callers must
/// access it strictly sequentially. Every document opened through this trait
/// must be closed again, including on error paths, since open documents leak
/// process-wide resources across batch runs.
pub trait CadRuntime: Send + Sync {
    /// Open the document backing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    fn open(&self, path: &Path) -> Result<DocumentRef>;

    /// Close the document backing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if no such document is open.
    fn close_document(&self, path: &Path) -> Result<()>;

    /// Paths of every document currently open in the runtime
    fn open_documents(&self) -> Vec<PathBuf>;

    /// Close every open document, releasing all runtime resources
    ///
    /// # Errors
    ///
    /// Returns the first close failure, after attempting every document.
    fn close_all(&self) -> Result<()> {
        let mut first_err = None;
        for path in self.open_documents() {
            if let Err(e) = self.close_document(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to close document");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Solid-geometry interchange encoder
///
/// Synchronous; implementations error on geometric failure.
pub trait ShapeEncoder: Send + Sync {
    /// Encode a single object's shape to an interchange file at `output`
    ///
    /// # Errors
    ///
    /// Returns an error if the object's geometry cannot be encoded.
    fn encode_shape(&self, object: &dyn DocumentObject, output: &Path) -> Result<()>;

    /// Encode an object and everything it resolves to as one compound shape
    ///
    /// Used for whole-assembly and part-aggregate exports.
    ///
    /// # Errors
    ///
    /// Returns an error if the compound cannot be resolved or encoded.
    fn encode_compound(&self, object: &dyn DocumentObject, output: &Path) -> Result<()>;

    /// File extension of the interchange format, without the dot
    fn extension(&self) -> &str {
        "step"
    }
}

/// Drawing-page renderer
///
/// Requires a fully initialized GUI; see [`GuiRuntime`] and the readiness
/// wait in [`super::context::RenderingContext`].
pub trait PageRenderer: Send + Sync {
    /// Rasterize a drawing page to a page-layout document at `output`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render_page(&self, page: &dyn DocumentObject, output: &Path) -> Result<()>;

    /// Apply a drawing template with the given field values to a page
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be applied.
    fn apply_template(
        &self,
        page: &dyn DocumentObject,
        template: &Path,
        fields: &TemplateFields,
    ) -> Result<()>;
}

/// GUI event-loop state owned by the external runtime
pub trait GuiRuntime: Send + Sync {
    /// Whether the runtime reports an active document
    fn document_active(&self) -> bool;

    /// Process one round of pending GUI events; returns `true` while more
    /// events remain queued
    fn pump_events(&self) -> bool;

    /// Force a main-window repaint
    fn repaint(&self);
}
