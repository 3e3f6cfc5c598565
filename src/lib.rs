//! # cadex - CAD document batch exporter
//!
//! cadex walks CAD document files and exports their contents to exchange
//! formats: solid bodies and assemblies to STEP, drawing pages to PDF. It
//! processes whole file sets in one strictly sequential batch and verifies
//! up front that the set is closed under assembly link references.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Classifying** document objects by type tag into export categories
//! - **Dispatching** each object to exactly one export path
//! - **Walking** the assembly link graph to compute the referenced-file
//!   closure and reject incomplete input sets
//! - **Batching** multi-file exports with per-file output directories and
//!   deterministic, versioned output names
//!
//! ## Architecture
//!
//! cadex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (naming, dispatch, link closure, batch)
//! - [`adapters`] - CAD runtime abstraction and the in-memory backend
//! - [`domain`] - Core domain types (categories, errors)
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cadex::adapters::memory::load_runtime;
//! use cadex::core::links::check_links;
//! use std::collections::BTreeSet;
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = vec![PathBuf::from("assembly.json")];
//!     let runtime = load_runtime(&files)?;
//!
//!     let inputs: BTreeSet<PathBuf> = files.into_iter().collect();
//!     let report = check_links(&runtime, &inputs)?;
//!
//!     if !report.is_closed() {
//!         for path in &report.missing {
//!             eprintln!("missing: {}", path.display());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! cadex uses the [`domain::CadexError`] type for all errors:
//!
//! ```rust,no_run
//! use cadex::domain::CadexError;
//!
//! fn example() -> Result<(), CadexError> {
//!     let config = cadex::config::load_config("cadex.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! cadex uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(label = "Sketch001", "Object skipped");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
