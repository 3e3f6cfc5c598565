//! Configuration loader with TOML parsing

use super::schema::CadexConfig;
use crate::domain::errors::CadexError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// A missing file is not an error: the export tool runs fine on built-in
/// defaults, so an absent `cadex.toml` yields [`CadexConfig::default`].
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed, or
/// validated.
///
/// # Examples
///
/// ```no_run
/// use cadex::config::load_config;
///
/// let config = load_config("cadex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CadexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        return Ok(CadexConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CadexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config: CadexConfig = toml::from_str(&contents)
        .map_err(|e| CadexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    config.validate().map_err(|e| {
        CadexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config("/nonexistent/cadex.toml").unwrap();
        assert_eq!(config.export.version, "X.X.X");
    }

    #[test]
    fn test_load_complete_config() {
        let toml_content = r#"
[export]
version = "1.2.0"
single_directory = true

[wait]
poll_interval_ms = 50
max_attempts = 20
settle_ms = 200

[template]
sheet = "sheets/a3_landscape.svg"

[template.fields]
title = "Gearbox Assembly"
author = "Drafting"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "hourly"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.export.version, "1.2.0");
        assert!(config.export.single_directory);
        assert_eq!(config.wait.poll_interval_ms, 50);
        assert_eq!(config.wait.max_attempts, 20);

        let template = config.template.unwrap();
        assert_eq!(template.sheet.to_str().unwrap(), "sheets/a3_landscape.svg");
        assert_eq!(template.fields.title.as_deref(), Some("Gearbox Assembly"));
        assert_eq!(template.fields.revision, None);
        assert!(config.logging.local_enabled);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nversion = \"0.9\"\n").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.export.version, "0.9");
        assert_eq!(config.wait.max_attempts, 600);
        assert!(config.template.is_none());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"export = = broken").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, CadexError::Configuration(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[wait]\nmax_attempts = 0\n").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }
}
