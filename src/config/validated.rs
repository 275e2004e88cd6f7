//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::network::FamilyFilter;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Interface to monitor (required)
    pub interface: String,

    /// Address families to act on
    pub family_filter: FamilyFilter,

    /// Whether to report current addresses at startup
    pub check_on_start: bool,

    /// Notification script, with `~` expanded. `None` disables notification.
    pub script: Option<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ interface: {}, address_family: {}, check_on_start: {}, script: {} }}",
            self.interface,
            self.family_filter,
            self.check_on_start,
            self.script.as_deref().unwrap_or("none"),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The interface is missing or not a valid interface name
    /// - The TOML address family is not recognized
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let interface = Self::resolve_interface(cli, toml)?;
        let family_filter = Self::resolve_family_filter(cli, toml)?;

        // The CLI flag only disables; it cannot re-enable a TOML `false`
        let check_on_start = !cli.no_check_on_start
            && toml
                .and_then(|t| t.monitor.check_on_start)
                .unwrap_or(defaults::CHECK_ON_START);

        let script = Self::resolve_script(cli, toml);

        Ok(Self {
            interface,
            family_filter,
            check_on_start,
            script,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path, after
    /// expanding a leading `~`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_home_path(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_interface(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        // CLI takes precedence
        let name = cli
            .interface
            .as_deref()
            .or_else(|| toml.and_then(|t| t.monitor.interface.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::INTERFACE,
                    "Pass the interface as an argument or set monitor.interface in config file",
                )
            })?;

        validate_interface_name(name)?;
        Ok(name.to_string())
    }

    fn resolve_family_filter(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<FamilyFilter, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(family) = cli.address_family {
            return Ok(family.into());
        }

        toml.and_then(|t| t.monitor.address_family.as_deref())
            .map_or(Ok(defaults::FAMILY_FILTER), parse_address_family)
    }

    fn resolve_script(cli: &Cli, toml: Option<&TomlConfig>) -> Option<String> {
        cli.script
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.script.as_deref()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(expand_home)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_address_family(s: &str) -> Result<FamilyFilter, ConfigError> {
    match s.to_lowercase().as_str() {
        "4" | "ipv4" | "v4" => Ok(FamilyFilter::V4),
        "6" | "ipv6" | "v6" => Ok(FamilyFilter::V6),
        "all" | "both" => Ok(FamilyFilter::Both),
        _ => Err(ConfigError::InvalidAddressFamily {
            value: s.to_string(),
        }),
    }
}

fn validate_interface_name(name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.len() > defaults::MAX_INTERFACE_NAME_LEN {
        Some("longer than 15 bytes")
    } else if name.contains('/') {
        Some("must not contain '/'")
    } else if name.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(ConfigError::InvalidInterface {
            name: name.to_string(),
            reason,
        })
    })
}

/// Expands a leading `~` or `~/` to the home directory.
///
/// Other forms (`~user`) and paths without a home directory are returned
/// unchanged.
pub(super) fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };

    dirs::home_dir().map_or_else(
        || path.to_string(),
        |home| format!("{}{rest}", home.display()),
    )
}

fn expand_home_path(path: &Path) -> PathBuf {
    path.to_str()
        .map_or_else(|| path.to_path_buf(), |s| PathBuf::from(expand_home(s)))
}
