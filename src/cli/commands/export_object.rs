//! export-object command implementation
//!
//! Exports one object, looked up by display label, with a caller-given
//! output base instead of the auto-generated name.

use crate::adapters::memory::load_runtime;
use crate::adapters::runtime::traits::CadRuntime;
use crate::cli::commands::Backend;
use crate::config::load_config;
use crate::core::export::dispatcher::ExportContext;
use crate::core::export::orchestrator::export_file_object;
use crate::core::export::summary::ExportSummary;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export-object command
#[derive(Args, Debug)]
pub struct ExportObjectArgs {
    /// Document file containing the object
    #[arg(long)]
    pub fname: PathBuf,

    /// Display label of the object to export
    #[arg(short, long = "object")]
    pub object: String,

    /// Version tag for generated file names
    #[arg(long)]
    pub version: Option<String>,

    /// Output directory (defaults to the working directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl ExportObjectArgs {
    /// Execute the export-object command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let version = self
            .version
            .clone()
            .unwrap_or_else(|| config.export.version.clone());

        let out_dir = match &self.path {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        std::fs::create_dir_all(&out_dir)?;

        let runtime = load_runtime(&[self.fname.clone()])?;
        let backend = Backend::reference(config.wait.clone());
        let ctx = ExportContext {
            encoder: &backend.encoder,
            rendering: &backend.rendering,
            template: config.template.as_ref(),
            version: &version,
        };

        let fname = std::fs::canonicalize(&self.fname).unwrap_or_else(|_| self.fname.clone());
        let explicit = out_dir.join(&self.object);
        let mut summary = ExportSummary::new();
        let result = export_file_object(
            &runtime,
            &fname,
            &self.object,
            &out_dir,
            Some(&explicit),
            &ctx,
            &mut summary,
        );
        if let Err(e) = runtime.close_all() {
            tracing::warn!(error = %e, "Failed to close documents");
        }
        result?;

        summary.log_summary();
        Ok(if summary.is_successful() { 0 } else { 1 })
    }
}
