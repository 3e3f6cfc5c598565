//! Assembly link closure
//!
//! A separate recursive traversal that, instead of exporting, collects the
//! set of external files referenced (directly or transitively) by link and
//! assembly objects. Used to verify that a batch of input files is
//! self-contained before exporting anything.

use crate::adapters::runtime::traits::{CadRuntime, DocumentObject, ObjectRef};
use crate::domain::{CadexError, Category, Result};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Result of a closure check over an input file set
#[derive(Debug, Clone)]
pub struct ClosureReport {
    /// Every file referenced by the input set's link graph
    pub referenced: BTreeSet<PathBuf>,

    /// Referenced files absent from the input set
    pub missing: Vec<PathBuf>,
}

impl ClosureReport {
    /// Whether the input set contains its own closure
    pub fn is_closed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Identity key for cycle detection: qualified identities are only unique
/// within one document, so the owning path is part of the key.
fn node_key(object: &dyn DocumentObject) -> String {
    format!("{}::{}", object.document_path().display(), object.identity())
}

/// Collect every file referenced (directly or transitively) by `object`.
///
/// Only the container categories contribute: a `Link` resolves its target's
/// owning document, then the walk continues through the target; an
/// `Assembly` contributes its own owning document and recurses into every
/// direct child in declared order. All other categories return empty.
///
/// # Errors
///
/// Returns [`CadexError::LinkCycle`] when the link graph revisits a node
/// already on the current path, and [`CadexError::Runtime`] for a link
/// without a resolvable target.
pub fn collect_links(object: &ObjectRef) -> Result<BTreeSet<PathBuf>> {
    let mut links = BTreeSet::new();
    let mut on_path = HashSet::new();
    walk(object, &mut on_path, &mut links)?;
    Ok(links)
}

fn walk(
    object: &ObjectRef,
    on_path: &mut HashSet<String>,
    links: &mut BTreeSet<PathBuf>,
) -> Result<()> {
    let category = Category::from_tag(object.type_tag());
    if !matches!(category, Category::Link | Category::Assembly) {
        tracing::debug!(
            identity = object.identity(),
            tag = object.type_tag(),
            "No links to follow"
        );
        return Ok(());
    }

    let key = node_key(object.as_ref());
    if !on_path.insert(key.clone()) {
        return Err(CadexError::LinkCycle(object.identity().to_string()));
    }

    let result = match category {
        Category::Link => {
            let target = object.link_target().ok_or_else(|| {
                CadexError::Runtime(format!(
                    "link {} has no resolvable target",
                    object.identity()
                ))
            })?;
            links.insert(target.document_path());
            walk(&target, on_path, links)
        }
        Category::Assembly => {
            links.insert(object.document_path());
            for child in object.children() {
                walk(&child, on_path, links)?;
            }
            Ok(())
        }
        _ => unreachable!("guarded above"),
    };

    on_path.remove(&key);
    result
}

/// Collect the union of [`collect_links`] over every top-level object of
/// every file in `files`.
///
/// Every document opened here is closed before returning, on success and on
/// failure, so repeated invocations in one process don't leak runtime
/// resources.
///
/// # Errors
///
/// Propagates open failures and walk errors.
pub fn collect_all_links(
    runtime: &dyn CadRuntime,
    files: &BTreeSet<PathBuf>,
) -> Result<BTreeSet<PathBuf>> {
    let result = collect_all_links_inner(runtime, files);
    if let Err(e) = runtime.close_all() {
        tracing::warn!(error = %e, "Failed to close documents after link collection");
    }
    result
}

fn collect_all_links_inner(
    runtime: &dyn CadRuntime,
    files: &BTreeSet<PathBuf>,
) -> Result<BTreeSet<PathBuf>> {
    let mut links = BTreeSet::new();
    for file in files {
        tracing::debug!(file = %file.display(), "Collecting assembly links");
        let document = runtime.open(file)?;
        for object in document.top_level_objects() {
            links.append(&mut collect_links(&object)?);
        }
    }
    Ok(links)
}

/// Run the pre-flight closure check: is the file set closed under reference?
///
/// # Errors
///
/// Propagates collection failures; a non-empty missing set is reported in
/// the returned [`ClosureReport`], not as an error.
pub fn check_links(runtime: &dyn CadRuntime, files: &BTreeSet<PathBuf>) -> Result<ClosureReport> {
    let referenced = collect_all_links(runtime, files)?;

    let resolved_inputs: BTreeSet<PathBuf> = files.iter().map(|p| resolve(p)).collect();
    let missing: Vec<PathBuf> = referenced
        .iter()
        .filter(|p| !resolved_inputs.contains(&resolve(p)))
        .cloned()
        .collect();

    if missing.is_empty() {
        tracing::info!(
            referenced = referenced.len(),
            "All links accounted for in the input set"
        );
    } else {
        tracing::error!(missing = ?missing, "Not all linked files found in the input set");
    }

    Ok(ClosureReport {
        referenced,
        missing,
    })
}

/// Canonicalize when the file exists, otherwise keep the path as reported
/// so missing files still show up verbatim in the report.
fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryObject;
    use std::sync::Arc;

    fn body(identity: &str) -> ObjectRef {
        Arc::new(MemoryObject::new(identity, "B", "PartDesign::Body").with_measure(1.0))
    }

    #[test]
    fn test_leaf_objects_contribute_nothing() {
        let links = collect_links(&body("demo#B")).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_link_contributes_target_document() {
        let target: ObjectRef = Arc::new(
            MemoryObject::new("part#B", "B", "PartDesign::Body")
                .with_measure(1.0)
                .with_document_path("/work/part.fcstd"),
        );
        let link: ObjectRef = Arc::new(
            MemoryObject::new("asm#L", "L", "App::Link")
                .with_document_path("/work/asm.fcstd")
                .with_link_target(target),
        );

        let links = collect_links(&link).unwrap();
        assert_eq!(links.len(), 1);
        assert!(links.contains(Path::new("/work/part.fcstd")));
    }

    #[test]
    fn test_assembly_contributes_self_and_recurses_children() {
        let sub_target: ObjectRef = Arc::new(
            MemoryObject::new("wheel#B", "B", "PartDesign::Body")
                .with_document_path("/work/wheel.fcstd"),
        );
        let sub_link: ObjectRef = Arc::new(
            MemoryObject::new("asm#L1", "L1", "Assembly::AssemblyLink")
                .with_document_path("/work/asm.fcstd")
                .with_link_target(sub_target),
        );
        let assembly: ObjectRef = Arc::new(
            MemoryObject::new("asm#A", "A", "Assembly::AssemblyObject")
                .with_document_path("/work/asm.fcstd")
                .with_children(vec![sub_link]),
        );

        let links = collect_links(&assembly).unwrap();
        assert!(links.contains(Path::new("/work/asm.fcstd")));
        assert!(links.contains(Path::new("/work/wheel.fcstd")));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_nested_link_chain_followed_transitively() {
        let innermost: ObjectRef = Arc::new(
            MemoryObject::new("bolt#B", "B", "PartDesign::Body")
                .with_document_path("/work/bolt.fcstd"),
        );
        let mid_link: ObjectRef = Arc::new(
            MemoryObject::new("bracket#L", "L", "App::Link")
                .with_document_path("/work/bracket.fcstd")
                .with_link_target(innermost),
        );
        let outer_link: ObjectRef = Arc::new(
            MemoryObject::new("asm#L", "L", "App::Link")
                .with_document_path("/work/asm.fcstd")
                .with_link_target(mid_link),
        );

        let links = collect_links(&outer_link).unwrap();
        assert!(links.contains(Path::new("/work/bracket.fcstd")));
        assert!(links.contains(Path::new("/work/bolt.fcstd")));
    }

    #[test]
    fn test_cycle_is_fatal_not_infinite() {
        // a -> b -> a, built with a shared-state cell in the memory object
        let a = MemoryObject::new("a#L", "L", "App::Link").with_document_path("/work/a.fcstd");
        let a: Arc<MemoryObject> = Arc::new(a);
        let b: ObjectRef = Arc::new(
            MemoryObject::new("b#L", "L", "App::Link")
                .with_document_path("/work/b.fcstd")
                .with_link_target(a.clone()),
        );
        a.set_link_target(b);

        let a: ObjectRef = a;
        let err = collect_links(&a).unwrap_err();
        assert!(matches!(err, CadexError::LinkCycle(_)));
    }

    #[test]
    fn test_link_without_target_is_runtime_error() {
        let dangling: ObjectRef =
            Arc::new(MemoryObject::new("asm#L", "L", "App::Link").with_document_path("/a.fcstd"));
        let err = collect_links(&dangling).unwrap_err();
        assert!(matches!(err, CadexError::Runtime(_)));
    }
}
