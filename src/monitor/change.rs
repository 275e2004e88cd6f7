//! Address state tracking and change classification.

use crate::network::AddressFamily;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The outcome of comparing an observed address with the known state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// First address seen for this family.
    Initial,
    /// The address differs from the previously known one.
    Changed,
    /// The address is identical to the previously known one.
    Unchanged,
}

impl Classification {
    /// Returns true if this classification should trigger a notification.
    ///
    /// Repeated identical observations never notify.
    #[must_use]
    pub const fn should_notify(self) -> bool {
        matches!(self, Self::Initial | Self::Changed)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial address"),
            Self::Changed => write!(f, "changed to"),
            Self::Unchanged => write!(f, "remains"),
        }
    }
}

/// Last-known addresses of the monitored interface, one slot per family.
///
/// An empty slot means nothing has been observed for that family yet; the
/// `Option` makes it impossible to compare against a slot that was never set.
/// The two families are fully independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressState {
    v4: Option<Ipv4Addr>,
    v6: Option<Ipv6Addr>,
}

impl AddressState {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self { v4: None, v6: None }
    }

    /// Returns the known IPv4 address, if any.
    #[must_use]
    pub const fn v4(&self) -> Option<Ipv4Addr> {
        self.v4
    }

    /// Returns the known IPv6 address, if any.
    #[must_use]
    pub const fn v6(&self) -> Option<Ipv6Addr> {
        self.v6
    }

    /// Returns the known address for `family`, if any.
    #[must_use]
    pub fn get(&self, family: AddressFamily) -> Option<IpAddr> {
        match family {
            AddressFamily::V4 => self.v4.map(IpAddr::V4),
            AddressFamily::V6 => self.v6.map(IpAddr::V6),
        }
    }

    /// Classifies `observed` against the slot for its family and updates the slot.
    ///
    /// - empty slot: stores the address, returns [`Classification::Initial`]
    /// - different address: overwrites the slot, returns [`Classification::Changed`]
    /// - identical address: leaves the slot alone, returns [`Classification::Unchanged`]
    ///
    /// Comparison is byte-exact; there are no prefix or subnet semantics.
    pub fn classify_and_update(&mut self, observed: IpAddr) -> Classification {
        match observed {
            IpAddr::V4(addr) => update_slot(&mut self.v4, addr),
            IpAddr::V6(addr) => update_slot(&mut self.v6, addr),
        }
    }
}

fn update_slot<T: PartialEq>(slot: &mut Option<T>, observed: T) -> Classification {
    match slot {
        None => {
            *slot = Some(observed);
            Classification::Initial
        }
        Some(known) if *known != observed => {
            *known = observed;
            Classification::Changed
        }
        Some(_) => Classification::Unchanged,
    }
}

/// A classified address observation on the monitored interface.
///
/// Produced once per accepted observation and consumed immediately to
/// drive logging and notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The interface the address was observed on.
    pub interface: String,
    /// The observed address.
    pub address: IpAddr,
    /// How the address relates to the previous state.
    pub classification: Classification,
}

impl ChangeEvent {
    /// Creates a new change event.
    #[must_use]
    pub fn new(
        interface: impl Into<String>,
        address: IpAddr,
        classification: Classification,
    ) -> Self {
        Self {
            interface: interface.into(),
            address,
            classification,
        }
    }

    /// Returns the address family of this event.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.address)
    }

    /// Returns true if this event should trigger a notification.
    #[must_use]
    pub const fn should_notify(&self) -> bool {
        self.classification.should_notify()
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.interface, self.classification, self.address
        )
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
