//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::network::FamilyFilter;

/// Default address family filter.
pub const FAMILY_FILTER: FamilyFilter = FamilyFilter::V4;

/// Whether current addresses are reported at startup by default.
pub const CHECK_ON_START: bool = true;

/// Default output path for `ipnotd init`.
pub const CONFIG_FILE: &str = "ipnotd.toml";

/// Longest interface name the OS accepts (`IFNAMSIZ` minus the terminator).
pub const MAX_INTERFACE_NAME_LEN: usize = 15;
