//! Configuration schema types
//!
//! Root structure mapping to the optional `cadex.toml` file. CLI flags
//! override file values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main cadex configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadexConfig {
    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,

    /// GUI readiness-wait bounds for drawing-page export
    #[serde(default)]
    pub wait: WaitConfig,

    /// Drawing template to apply to pages before rendering.
    /// Absent means no template is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CadexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.wait.validate()?;
        if let Some(template) = &self.template {
            template.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

/// Export defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Version tag appended to generated base names
    #[serde(default = "default_version")]
    pub version: String,

    /// Place all outputs under one directory instead of one per input stem
    #[serde(default)]
    pub single_directory: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            single_directory: false,
        }
    }
}

fn default_version() -> String {
    "X.X.X".to_string()
}

/// Bounds for the polling wait on GUI readiness
///
/// The wait polls `document_active` then drains pending events, each phase
/// capped at `max_attempts` iterations of `poll_interval_ms`, followed by a
/// final `settle_ms` delay. Exceeding a bound is a timeout failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum polling iterations per phase
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Final settle delay in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl WaitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("wait.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_attempts() -> u32 {
    600
}

fn default_settle_ms() -> u64 {
    1000
}

/// Drawing template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Path to the template sheet file
    pub sheet: PathBuf,

    /// Field values substituted into the template
    #[serde(default)]
    pub fields: TemplateFields,
}

impl TemplateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.sheet.as_os_str().is_empty() {
            return Err("template.sheet must not be empty".to_string());
        }
        Ok(())
    }
}

/// Recognized template field keys, named and typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFields {
    /// Drawing title block text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Revision identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl TemplateFields {
    /// Flatten into the key/value mapping the template engine consumes
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(title) = &self.title {
            pairs.push(("Title", title.as_str()));
        }
        if let Some(author) = &self.author {
            pairs.push(("Author", author.as_str()));
        }
        if let Some(revision) = &self.revision {
            pairs.push(("Revision", revision.as_str()));
        }
        pairs
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation policy: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.local_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!(
                "logging.local_rotation must be 'daily' or 'hourly', got '{other}'"
            )),
        }
    }
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
