//! JSON fixture loader for the in-memory backend
//!
//! A fixture file describes one document: its top-level objects, their
//! nesting, and the links they make into other fixture files. The loader
//! pulls in transitively referenced files as well, so link targets and
//! closure-discovered documents are always resolvable, and patches link
//! targets in a second pass so cyclic link graphs can be described.

use crate::adapters::memory::object::{MemoryDocument, MemoryObject};
use crate::adapters::memory::runtime::MemoryRuntime;
use crate::adapters::runtime::traits::{DocumentObject, ObjectRef};
use crate::domain::{CadexError, Result};
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One document description
#[derive(Debug, Deserialize)]
struct DocumentDesc {
    objects: Vec<ObjectDesc>,
}

/// One object description, possibly nested
#[derive(Debug, Deserialize)]
struct ObjectDesc {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    measure: Option<f64>,
    #[serde(default)]
    children: Vec<ObjectDesc>,
    #[serde(default)]
    link: Option<LinkDesc>,
}

/// A link into another fixture file
#[derive(Debug, Deserialize)]
struct LinkDesc {
    /// Target fixture file, relative to the linking file's directory
    file: PathBuf,
    /// Label of the target object in that file
    object: String,
}

struct PendingLink {
    source: Arc<MemoryObject>,
    target_file: PathBuf,
    target_label: String,
}

/// Build a runtime from fixture files, following link references into
/// additional files until the set is closed.
///
/// # Errors
///
/// Returns an error for unreadable or malformed fixtures, or a link whose
/// target object does not exist in the target file.
pub fn load_runtime(files: &[PathBuf]) -> Result<MemoryRuntime> {
    let mut queue: VecDeque<PathBuf> = files.iter().map(|p| resolve(p)).collect();
    let mut loaded: HashMap<PathBuf, Vec<Arc<MemoryObject>>> = HashMap::new();
    let mut top_level: HashMap<PathBuf, Vec<ObjectRef>> = HashMap::new();
    let mut pending: Vec<PendingLink> = Vec::new();

    while let Some(path) = queue.pop_front() {
        if loaded.contains_key(&path) {
            continue;
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            CadexError::Input(format!("cannot read fixture {}: {e}", path.display()))
        })?;
        let desc: DocumentDesc = serde_json::from_str(&contents).map_err(|e| {
            CadexError::Input(format!("malformed fixture {}: {e}", path.display()))
        })?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut all = Vec::new();
        let mut tops = Vec::new();
        for object in &desc.objects {
            let built = build_object(object, &stem, &path, &mut all, &mut pending, &mut queue);
            tops.push(built as ObjectRef);
        }
        loaded.insert(path.clone(), all);
        top_level.insert(path, tops);
    }

    // Second pass: wire link targets now that every file is materialized.
    for link in pending {
        let objects = loaded.get(&link.target_file).ok_or_else(|| {
            CadexError::Input(format!(
                "link target file not loaded: {}",
                link.target_file.display()
            ))
        })?;
        let target = objects
            .iter()
            .find(|o| o.label() == link.target_label)
            .cloned()
            .ok_or_else(|| {
                CadexError::Input(format!(
                    "link target '{}' not found in {}",
                    link.target_label,
                    link.target_file.display()
                ))
            })?;
        link.source.set_link_target(target);
    }

    Ok(MemoryRuntime::with_documents(
        top_level
            .into_iter()
            .map(|(path, objects)| MemoryDocument::new(path, objects))
            .collect(),
    ))
}

fn build_object(
    desc: &ObjectDesc,
    stem: &str,
    path: &Path,
    all: &mut Vec<Arc<MemoryObject>>,
    pending: &mut Vec<PendingLink>,
    queue: &mut VecDeque<PathBuf>,
) -> Arc<MemoryObject> {
    let children: Vec<ObjectRef> = desc
        .children
        .iter()
        .map(|child| build_object(child, stem, path, all, pending, queue) as ObjectRef)
        .collect();

    let label = desc.label.clone().unwrap_or_else(|| desc.name.clone());
    let mut object = MemoryObject::new(
        &format!("{stem}#{}", desc.name),
        &label,
        &desc.type_tag,
    )
    .with_document_path(path)
    .with_children(children);
    if let Some(measure) = desc.measure {
        object = object.with_measure(measure);
    }
    let object = Arc::new(object);
    all.push(object.clone());

    if let Some(link) = &desc.link {
        let target_file = resolve(&path.parent().unwrap_or(Path::new(".")).join(&link.file));
        queue.push_back(target_file.clone());
        pending.push(PendingLink {
            source: object.clone(),
            target_file,
            target_label: link.object.clone(),
        });
    }

    object
}

fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
