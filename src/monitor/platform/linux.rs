//! Linux rtnetlink socket subscribed to address notifications.

use netlink_sys::{Socket, SocketAddr, protocols::NETLINK_ROUTE};
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, OwnedFd};

/// Multicast groups carrying IPv4 and IPv6 address changes.
#[allow(clippy::cast_sign_loss)]
const ADDRESS_GROUPS: u32 = (libc::RTMGRP_IPV4_IFADDR | libc::RTMGRP_IPV6_IFADDR) as u32;

/// Opens a blocking `NETLINK_ROUTE` socket bound to the address groups.
///
/// The returned descriptor is a duplicate; the `netlink_sys` socket closes
/// its own copy when it goes out of scope.
#[cfg(not(tarpaulin_include))]
pub(super) fn open_socket() -> io::Result<OwnedFd> {
    let mut socket = Socket::new(NETLINK_ROUTE)?;
    socket.bind(&SocketAddr::new(0, ADDRESS_GROUPS))?;
    tracing::debug!("Netlink socket bound to the address groups ({ADDRESS_GROUPS:#x})");

    // SAFETY: the descriptor belongs to `socket`, which outlives the borrow.
    let fd = unsafe { BorrowedFd::borrow_raw(socket.as_raw_fd()) };
    fd.try_clone_to_owned()
}
