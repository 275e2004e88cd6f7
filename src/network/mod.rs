//! Network layer for enumerating and representing interface addresses.
//!
//! This module provides types and traits for:
//! - Representing addresses observed on interfaces ([`InterfaceAddress`], [`SockAddr`])
//! - Address family selection ([`AddressFamily`], [`FamilyFilter`])
//! - Enumerating current addresses ([`AddressFetcher`])
//! - Resolving interface indices to names ([`InterfaceResolver`])
//! - Platform-specific implementations ([`platform`])

mod address;
mod fetcher;
pub mod platform;

pub use address::{AddressFamily, FamilyFilter, InterfaceAddress, SockAddr};
pub use fetcher::{AddressFetcher, FetchError, InterfaceResolver};
