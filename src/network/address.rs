//! Core network types for interface address representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// An IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4 (`AF_INET`).
    V4,
    /// IPv6 (`AF_INET6`).
    V6,
}

impl AddressFamily {
    /// Returns the family of an IP address.
    #[must_use]
    pub const fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Which address families the monitor reacts to.
///
/// Defaults to IPv4 only, matching the behavior of running without `-a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FamilyFilter {
    /// React to IPv4 addresses only.
    #[default]
    V4,
    /// React to IPv6 addresses only.
    V6,
    /// React to both families, each tracked independently.
    Both,
}

impl FamilyFilter {
    /// Returns true if this filter includes IPv4.
    #[must_use]
    pub const fn includes_v4(self) -> bool {
        matches!(self, Self::V4 | Self::Both)
    }

    /// Returns true if this filter includes IPv6.
    #[must_use]
    pub const fn includes_v6(self) -> bool {
        matches!(self, Self::V6 | Self::Both)
    }

    /// Returns true if addresses of `family` pass this filter.
    #[must_use]
    pub const fn admits(self, family: AddressFamily) -> bool {
        match family {
            AddressFamily::V4 => self.includes_v4(),
            AddressFamily::V6 => self.includes_v6(),
        }
    }
}

impl fmt::Display for FamilyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// A family-tagged socket address payload.
///
/// Only the address bytes are kept; ports, flow info and scope ids carried
/// by the OS structures are not part of address identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SockAddr {
    /// An `AF_INET` address.
    V4(Ipv4Addr),
    /// An `AF_INET6` address.
    V6(Ipv6Addr),
    /// Any other family (link-layer, unspecified, ...), preserving the raw family code.
    Other {
        /// The OS family code from the socket address structure.
        family: u16,
    },
}

impl SockAddr {
    /// Returns the IP family, or `None` for non-IP addresses.
    #[must_use]
    pub const fn family(&self) -> Option<AddressFamily> {
        match self {
            Self::V4(_) => Some(AddressFamily::V4),
            Self::V6(_) => Some(AddressFamily::V6),
            Self::Other { .. } => None,
        }
    }

    /// Returns the IP address, or `None` for non-IP addresses.
    #[must_use]
    pub const fn ip(&self) -> Option<IpAddr> {
        match *self {
            Self::V4(addr) => Some(IpAddr::V4(addr)),
            Self::V6(addr) => Some(IpAddr::V6(addr)),
            Self::Other { .. } => None,
        }
    }
}

impl From<IpAddr> for SockAddr {
    fn from(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(addr) => Self::V4(addr),
            IpAddr::V6(addr) => Self::V6(addr),
        }
    }
}

impl fmt::Display for SockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(addr) => write!(f, "{addr}"),
            Self::V6(addr) => write!(f, "{addr}"),
            Self::Other { family } => write!(f, "<family {family}>"),
        }
    }
}

/// An address observed on a named interface.
///
/// Produced both by startup enumeration and by the notification decoders,
/// so both phases feed the monitor through the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// The interface name (e.g., "em0", "eth0").
    pub interface: String,
    /// The address assigned to the interface.
    pub address: SockAddr,
}

impl InterfaceAddress {
    /// Creates a new interface address.
    #[must_use]
    pub fn new(interface: impl Into<String>, address: impl Into<SockAddr>) -> Self {
        Self {
            interface: interface.into(),
            address: address.into(),
        }
    }
}
