//! File-level orchestrators
//!
//! Open a document, enumerate its top-level objects, and drive the
//! dispatcher over them. Every orchestrator closes the document it opened,
//! on success and on failure.

use crate::adapters::runtime::traits::{CadRuntime, Document, ObjectRef};
use crate::core::export::dispatcher::{export_object, ExportContext};
use crate::core::export::summary::ExportSummary;
use crate::domain::{CadexError, Category, Result};
use std::path::Path;

/// Export every top-level object of the document at `path`.
///
/// Each object gets its own default output base under `out_dir`.
///
/// # Errors
///
/// Returns an error if the document cannot be opened; per-object failures
/// are recorded in `summary` instead.
pub fn export_file(
    runtime: &dyn CadRuntime,
    path: &Path,
    out_dir: &Path,
    ctx: &ExportContext<'_>,
    summary: &mut ExportSummary,
) -> Result<()> {
    with_document(runtime, path, |document| {
        tracing::info!(file = %path.display(), "Exporting file");
        for object in document.top_level_objects() {
            export_object(Some(object), document, out_dir, None, ctx, summary);
        }
        Ok(())
    })
}

/// Export only the drawing pages of the document at `path`.
///
/// # Errors
///
/// Returns an error if the document cannot be opened.
pub fn export_file_pages(
    runtime: &dyn CadRuntime,
    path: &Path,
    out_dir: &Path,
    ctx: &ExportContext<'_>,
    summary: &mut ExportSummary,
) -> Result<()> {
    with_document(runtime, path, |document| {
        tracing::info!(file = %path.display(), "Exporting drawing pages");
        for object in document.top_level_objects() {
            if Category::from_tag(object.type_tag()) == Category::DrawingPage {
                export_object(Some(object), document, out_dir, None, ctx, summary);
            }
        }
        Ok(())
    })
}

/// Export everything the assemblies in `path` pull in through links, as a
/// flat batch under one directory.
///
/// Top-level objects themselves are not exported; instead, for each
/// top-level assembly, every object reachable through its children is
/// visited, with `Link` indirections resolved to their targets first.
///
/// # Errors
///
/// Returns an error if the document cannot be opened.
pub fn export_file_links_only(
    runtime: &dyn CadRuntime,
    path: &Path,
    out_dir: &Path,
    ctx: &ExportContext<'_>,
    summary: &mut ExportSummary,
) -> Result<()> {
    with_document(runtime, path, |document| {
        tracing::info!(file = %path.display(), "Exporting assembly-linked objects");
        for object in document.top_level_objects() {
            if Category::from_tag(object.type_tag()) == Category::Assembly {
                for child in object.children() {
                    export_reachable(&child, document, out_dir, ctx, summary);
                }
            }
        }
        Ok(())
    })
}

fn export_reachable(
    object: &ObjectRef,
    document: &dyn Document,
    out_dir: &Path,
    ctx: &ExportContext<'_>,
    summary: &mut ExportSummary,
) {
    match Category::from_tag(object.type_tag()) {
        Category::Link => match object.link_target() {
            Some(target) => export_reachable(&target, document, out_dir, ctx, summary),
            None => {
                tracing::warn!(identity = object.identity(), "Link has no resolvable target");
            }
        },
        Category::Assembly => {
            // Nested assemblies are exported as compounds and walked further.
            export_object(Some(object.clone()), document, out_dir, None, ctx, summary);
            for child in object.children() {
                export_reachable(&child, document, out_dir, ctx, summary);
            }
        }
        _ => {
            export_object(Some(object.clone()), document, out_dir, None, ctx, summary);
        }
    }
}

/// Export a single object, looked up by label, from the document at `path`.
///
/// A failed lookup is handed to the dispatcher as a missing object so it is
/// reported through the same channel as every other outcome.
///
/// # Errors
///
/// Returns an error if the document cannot be opened.
pub fn export_file_object(
    runtime: &dyn CadRuntime,
    path: &Path,
    label: &str,
    out_dir: &Path,
    explicit_output: Option<&Path>,
    ctx: &ExportContext<'_>,
    summary: &mut ExportSummary,
) -> Result<()> {
    with_document(runtime, path, |document| {
        let object = document.object_by_label(label);
        if object.is_none() {
            tracing::error!(file = %path.display(), label = label, "Object not found");
        }
        export_object(object, document, out_dir, explicit_output, ctx, summary);
        Ok(())
    })
}

/// Open `path`, run `work`, and close the document again no matter how
/// `work` exits.
fn with_document<F>(runtime: &dyn CadRuntime, path: &Path, work: F) -> Result<()>
where
    F: FnOnce(&dyn Document) -> Result<()>,
{
    let document = runtime
        .open(path)
        .map_err(|e| CadexError::Runtime(format!("failed to open {}: {e}", path.display())))?;
    let result = work(document.as_ref());
    if let Err(e) = runtime.close_document(document.path()) {
        tracing::warn!(file = %path.display(), error = %e, "Failed to close document");
    }
    result
}
