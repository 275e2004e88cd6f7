//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use ipnotd::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing interface, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - socket failure, enumeration failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns the hint printed after a configuration error, if any.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::INTERFACE => {
            Some("Usage: ipnotd [-n] [-a 4|6|all] [-s script] <interface>\nRun 'ipnotd init' to generate a configuration template.")
        }
        ConfigError::FileRead { .. } => {
            Some("Run 'ipnotd init' to generate a configuration template.")
        }
        _ => None,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the level chosen by `verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
