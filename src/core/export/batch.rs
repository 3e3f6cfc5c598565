//! Batch controller
//!
//! Given a set of input files, deduplicates by stem, creates one output
//! directory per input, and drives the file-level orchestrators. All
//! batch-setup problems (duplicate stems, unresolvable inputs) fail fast
//! before any document is opened; per-file problems during the run are
//! logged and the batch continues.

use crate::adapters::runtime::traits::CadRuntime;
use crate::core::export::dispatcher::ExportContext;
use crate::core::export::orchestrator::{export_file, export_file_links_only, export_file_pages};
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::core::links::collect_all_links;
use crate::domain::{CadexError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What the batch exports per file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Every top-level object of every input file
    Objects,
    /// Only drawing pages
    PagesOnly,
    /// Everything the input assemblies pull in through links, flat.
    /// The working set is expanded with the link closure first.
    LinkedObjects,
}

/// Batch export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Version tag for generated base names
    pub version: String,

    /// Export mode
    pub mode: ExportMode,

    /// Place all outputs directly under the root instead of one
    /// subdirectory per input stem
    pub single_directory: bool,

    /// Root directory for outputs
    pub output_root: PathBuf,
}

/// Run a batch export over `files`.
///
/// Steps: resolve and deduplicate inputs; reject duplicate stems before any
/// document is opened or directory created; expand the working set with the
/// link closure when the mode requires it; export each file into its output
/// directory; close every open document on the way out.
///
/// # Errors
///
/// Returns an error for batch-setup failures (duplicate stems, closure
/// collection failures). Per-file export failures are recorded in the
/// returned summary instead.
pub fn run_export(
    runtime: &dyn CadRuntime,
    ctx: &ExportContext<'_>,
    files: &[PathBuf],
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let start = Instant::now();

    let inputs: BTreeSet<PathBuf> = files.iter().map(|p| resolve_input(p)).collect();
    check_duplicate_stems(&inputs)?;

    let result = run_export_inner(runtime, ctx, inputs, options);
    if let Err(e) = runtime.close_all() {
        tracing::warn!(error = %e, "Failed to close documents after batch");
    }

    let mut summary = result?;
    summary.duration = start.elapsed();
    summary.log_summary();
    Ok(summary)
}

fn run_export_inner(
    runtime: &dyn CadRuntime,
    ctx: &ExportContext<'_>,
    mut working_set: BTreeSet<PathBuf>,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    if options.mode == ExportMode::LinkedObjects {
        let closure = collect_all_links(runtime, &working_set)?;
        for discovered in closure {
            if working_set.insert(discovered.clone()) {
                tracing::info!(file = %discovered.display(), "Adding linked file to the batch");
            }
        }
        // The expanded set can collide on stems too.
        check_duplicate_stems(&working_set)?;
    }

    let mut summary = ExportSummary::new();
    for file in &working_set {
        summary.total_files += 1;

        let out_dir = if options.single_directory {
            options.output_root.clone()
        } else {
            options.output_root.join(stem_of(file))
        };
        if let Err(e) = std::fs::create_dir_all(&out_dir) {
            tracing::error!(dir = %out_dir.display(), error = %e, "Failed to create output directory");
            summary.add_error(
                ExportError::new(ExportErrorType::Input, e.to_string())
                    .with_context(format!("file={}", file.display())),
            );
            continue;
        }

        let run = match options.mode {
            ExportMode::Objects => export_file(runtime, file, &out_dir, ctx, &mut summary),
            ExportMode::PagesOnly => export_file_pages(runtime, file, &out_dir, ctx, &mut summary),
            ExportMode::LinkedObjects => {
                export_file_links_only(runtime, file, &out_dir, ctx, &mut summary)
            }
        };
        // One bad file never blocks the rest of the batch.
        if let Err(e) = run {
            tracing::error!(file = %file.display(), error = %e, "File export failed");
            summary.add_error(
                ExportError::new(ExportErrorType::Runtime, e.to_string())
                    .with_context(format!("file={}", file.display())),
            );
        }
    }

    tracing::info!("Finished all files");
    Ok(summary)
}

/// Reject the batch when two distinct inputs share a file stem, since both
/// would claim the same output subdirectory.
fn check_duplicate_stems(files: &BTreeSet<PathBuf>) -> Result<()> {
    let mut by_stem: BTreeMap<String, Vec<&PathBuf>> = BTreeMap::new();
    for file in files {
        by_stem.entry(stem_of(file)).or_default().push(file);
    }

    let duplicates: Vec<String> = by_stem
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(stem, paths)| {
            format!(
                "{stem} ({})",
                paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(CadexError::Input(format!(
            "duplicated file stems: {}",
            duplicates.join("; ")
        )))
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolve an input to canonical absolute form. Falls back to lexically
/// absolutizing when the file does not exist yet, so the error surfaces at
/// open time with the path the user recognizes.
fn resolve_input(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
