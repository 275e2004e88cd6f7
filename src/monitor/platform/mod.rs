//! Platform-specific notification socket implementations.
//!
//! This module provides conditional compilation for the socket that feeds
//! the [`NotificationListener`](super::NotificationListener) trait, and for
//! the decoder matching that socket's record format.
//!
//! # Platform Support
//!
//! - **FreeBSD / DragonFly / macOS**: `PF_ROUTE` routing socket, decoded by
//!   [`RouteDecoder`].
//! - **Linux**: `NETLINK_ROUTE` socket subscribed to the address groups,
//!   decoded by [`NetlinkDecoder`].
//!
//! The reader bridge in [`SocketListener`] is shared by both; it works over
//! any blocking [`Read`](std::io::Read) source.

#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "macos"))]
mod bsd;
#[cfg(target_os = "linux")]
mod linux;
mod socket;


pub use socket::{SocketListener, SocketStream};

#[cfg(target_os = "linux")]
use super::decode::NetlinkDecoder;
#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "macos"))]
use super::decode::RouteDecoder;
#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "macos"
))]
use crate::network::platform::SystemResolver;

/// The notification listener for the current platform.
pub type PlatformListener = SocketListener;

/// The record decoder matching [`PlatformListener`]'s socket.
#[cfg(target_os = "linux")]
pub type PlatformDecoder = NetlinkDecoder<SystemResolver>;

/// The record decoder matching [`PlatformListener`]'s socket.
#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "macos"))]
pub type PlatformDecoder = RouteDecoder<SystemResolver>;

/// Creates the decoder for the current platform's notification records.
#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "macos"
))]
#[must_use]
pub const fn platform_decoder() -> PlatformDecoder {
    PlatformDecoder::new(SystemResolver)
}

#[cfg(target_os = "linux")]
use linux::open_socket;

#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "macos"))]
use bsd::open_socket;

#[cfg(not(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "macos"
)))]
fn open_socket() -> std::io::Result<std::os::fd::OwnedFd> {
    Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
}
