//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Notification configuration
    #[serde(default)]
    pub notify: NotifySection,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Interface to monitor
    pub interface: Option<String>,

    /// Address family: "4"/"ipv4", "6"/"ipv6", or "all"/"both"
    pub address_family: Option<String>,

    /// Report current addresses at startup (default: true)
    pub check_on_start: Option<bool>,
}

/// Notification configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Script run with the new address as its argument
    pub script: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipnotd Configuration File
# Command-line options override the values below.

[monitor]
# Interface to monitor (required here or as the command-line argument)
# interface = "em0"

# Address family to act on (default: "4")
# Accepted values: "4"/"ipv4", "6"/"ipv6", or "all"/"both"
address_family = "4"

# Report the interface's current addresses at startup (default: true)
# The -n/--no-check-on-start flag disables this regardless of the value here
check_on_start = true

[notify]
# Script to run when an address is new or has changed.
# It is invoked through /bin/sh as "<script> <address>", with stderr
# folded into stdout; every output line is logged.
# A leading "~" is expanded to the home directory.
# script = "~/bin/update-dns"
"#
    .to_string()
}
