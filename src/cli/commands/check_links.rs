//! check-links command implementation
//!
//! Verifies that the given file set is closed under assembly link
//! references before anything is exported.

use crate::adapters::memory::load_runtime;
use crate::core::links::check_links;
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Arguments for the check-links command
#[derive(Args, Debug)]
pub struct CheckLinksArgs {
    /// Input document files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl CheckLinksArgs {
    /// Execute the check-links command
    ///
    /// Exit code 1 when the closure is not contained in the input set.
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(files = self.files.len(), "Checking assembly link closure");

        let runtime = load_runtime(&self.files)?;
        let inputs: BTreeSet<PathBuf> = self
            .files
            .iter()
            .map(|p| std::fs::canonicalize(p).unwrap_or_else(|_| p.clone()))
            .collect();

        let report = check_links(&runtime, &inputs)?;
        if report.is_closed() {
            println!(
                "All links accounted for ({} referenced file(s))",
                report.referenced.len()
            );
            Ok(0)
        } else {
            eprintln!("Not all linked files are in the input set:");
            for path in &report.missing {
                eprintln!("  {}", path.display());
            }
            Ok(1)
        }
    }
}
