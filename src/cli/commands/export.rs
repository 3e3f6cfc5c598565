//! export command implementation

use crate::adapters::memory::load_runtime;
use crate::cli::commands::Backend;
use crate::config::load_config;
use crate::core::export::dispatcher::ExportContext;
use crate::core::export::{run_export, ExportMode, ExportOptions};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input document files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Version tag for generated file names
    #[arg(long)]
    pub version: Option<String>,

    /// Export only drawing pages
    #[arg(long, conflicts_with = "single_file")]
    pub pdf_only: bool,

    /// Export everything the assemblies pull in through links as one flat
    /// batch, expanding the input set with the link closure
    #[arg(long)]
    pub single_file: bool,

    /// Place all outputs under the output root instead of one
    /// subdirectory per input file
    #[arg(long)]
    pub single_directory: bool,

    /// Output root directory (defaults to the working directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;

        let version = self
            .version
            .clone()
            .unwrap_or_else(|| config.export.version.clone());
        let mode = if self.pdf_only {
            ExportMode::PagesOnly
        } else if self.single_file {
            ExportMode::LinkedObjects
        } else {
            ExportMode::Objects
        };
        let output_root = match &self.path {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };

        let options = ExportOptions {
            version: version.clone(),
            mode,
            single_directory: self.single_directory || config.export.single_directory,
            output_root,
        };

        let runtime = load_runtime(&self.files)?;
        let backend = Backend::reference(config.wait.clone());
        let ctx = ExportContext {
            encoder: &backend.encoder,
            rendering: &backend.rendering,
            template: config.template.as_ref(),
            version: &version,
        };

        let summary = match run_export(&runtime, &ctx, &self.files, &options) {
            Ok(summary) => summary,
            Err(e) if e.is_fatal() => {
                tracing::error!(error = %e, "Batch aborted");
                eprintln!("Error: {e}");
                return Ok(1);
            }
            Err(e) => return Err(e.into()),
        };

        println!("Export summary:");
        println!("  Files: {}", summary.total_files);
        println!("  Objects: {}", summary.total_objects);
        println!("  Exported: {}", summary.exported);
        println!("  Skipped: {}", summary.skipped);
        println!("  Failed: {}", summary.failed);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        if !summary.errors.is_empty() {
            println!("Errors:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    ({context})");
                }
            }
        }

        Ok(if summary.is_successful() { 0 } else { 1 })
    }
}
