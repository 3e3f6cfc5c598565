//! CLI interface and argument parsing
//!
//! Command-line interface for cadex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// cadex - batch exporter for CAD document files
#[derive(Parser, Debug)]
#[command(name = "cadex")]
#[command(version, about, long_about = None)]
#[command(author = "Cadex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cadex.toml", env = "CADEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CADEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(long)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level after applying the --debug shorthand
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.log_level.as_deref().unwrap_or("info")
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify that a file set is closed under assembly links
    CheckLinks(commands::check_links::CheckLinksArgs),

    /// Batch-export the objects of the given files
    Export(commands::export::ExportArgs),

    /// Export a single object, looked up by label
    ExportObject(commands::export_object::ExportObjectArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check_links() {
        let cli = Cli::parse_from(["cadex", "check-links", "a.json", "b.json"]);
        assert_eq!(cli.config, "cadex.toml");
        assert!(matches!(cli.command, Commands::CheckLinks(_)));
    }

    #[test]
    fn test_cli_parse_export_with_flags() {
        let cli = Cli::parse_from([
            "cadex",
            "export",
            "--version",
            "2.0",
            "--pdf-only",
            "--path",
            "/tmp/out",
            "demo.json",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.version.as_deref(), Some("2.0"));
                assert!(args.pdf_only);
                assert_eq!(args.path.as_deref(), Some(std::path::Path::new("/tmp/out")));
                assert_eq!(args.files.len(), 1);
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export_object() {
        let cli = Cli::parse_from([
            "cadex",
            "export-object",
            "--fname",
            "demo.json",
            "-o",
            "Housing",
        ]);
        match cli.command {
            Commands::ExportObject(args) => {
                assert_eq!(args.object, "Housing");
            }
            other => panic!("expected export-object, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_flag_raises_verbosity() {
        let cli = Cli::parse_from(["cadex", "--debug", "check-links", "a.json"]);
        assert_eq!(cli.effective_log_level(), "debug");

        let cli = Cli::parse_from(["cadex", "check-links", "a.json"]);
        assert_eq!(cli.effective_log_level(), "info");
    }

    #[test]
    fn test_single_file_and_pdf_only_conflict() {
        let result = Cli::try_parse_from([
            "cadex",
            "export",
            "--pdf-only",
            "--single-file",
            "demo.json",
        ]);
        assert!(result.is_err());
    }
}
