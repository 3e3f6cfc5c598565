use cadex::cli::{Cli, Commands};
use cadex::config::LoggingConfig;
use cadex::domain::CadexError;
use cadex::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging with console-only config (no file logging for CLI)
    let logging_config = LoggingConfig {
        local_enabled: false,
        local_path: String::new(),
        local_rotation: "daily".to_string(),
    };
    let _guard = match init_logging(cli.effective_log_level(), &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "cadex - CAD document batch exporter"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            match e.downcast_ref::<CadexError>() {
                Some(CadexError::Configuration(_)) => 2,
                _ => 5, // Fatal error exit code
            }
        }
    };

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::CheckLinks(args) => args.execute(),
        Commands::Export(args) => args.execute(&cli.config),
        Commands::ExportObject(args) => args.execute(&cli.config),
    }
}
