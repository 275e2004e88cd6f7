//! Configuration layer for ipnotd.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The interface has no default and must come from one of the first two.
//!
//! # Boolean Flag Semantics
//!
//! `--no-check-on-start` only disables: if either the CLI flag is given or
//! TOML sets `check_on_start = false`, the startup check is skipped.
//!
//! # Script
//!
//! An empty script string means no script. A leading `~` is expanded to the
//! home directory. The script is otherwise passed to the shell as given and
//! is not checked for existence.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{AddressFamilyArg, Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
