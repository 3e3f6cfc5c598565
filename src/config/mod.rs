//! Configuration management
//!
//! TOML-backed configuration with validation. The file is optional; CLI
//! flags override anything it sets.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    CadexConfig, ExportConfig, LoggingConfig, TemplateConfig, TemplateFields, WaitConfig,
};
