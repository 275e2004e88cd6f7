//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::network::FamilyFilter;

/// ipnotd: interface address notifier
///
/// Watches one network interface for address assignments, logs every
/// observation, and runs a script when the address is new or has changed.
#[derive(Debug, Parser)]
#[command(name = "ipnotd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Interface to monitor, e.g. em0 (required for run mode)
    #[arg(value_name = "INTERFACE")]
    pub interface: Option<String>,

    /// Address family to act on [default: 4]
    #[arg(long = "address-family", short = 'a', value_enum)]
    pub address_family: Option<AddressFamilyArg>,

    /// Skip reporting the interface's current addresses at startup
    #[arg(long = "no-check-on-start", short = 'n')]
    pub no_check_on_start: bool,

    /// Script to run on a new or changed address; receives the address as its argument
    #[arg(long, short = 's', value_name = "PATH")]
    pub script: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ipnotd
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Address family argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressFamilyArg {
    /// Act on IPv4 addresses only
    #[value(name = "4", alias = "ipv4")]
    V4,
    /// Act on IPv6 addresses only
    #[value(name = "6", alias = "ipv6")]
    V6,
    /// Act on both families, tracked independently
    #[value(name = "all", alias = "both")]
    All,
}

impl From<AddressFamilyArg> for FamilyFilter {
    fn from(arg: AddressFamilyArg) -> Self {
        match arg {
            AddressFamilyArg::V4 => Self::V4,
            AddressFamilyArg::V6 => Self::V6,
            AddressFamilyArg::All => Self::Both,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
