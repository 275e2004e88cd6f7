//! BSD routing socket.

use std::io;
use std::os::fd::{FromRawFd, OwnedFd};

/// Opens a blocking `PF_ROUTE` socket.
///
/// Routing sockets receive every routing message; there is no kernel-side
/// filter for address records, so the decoder skips the rest.
#[cfg(not(tarpaulin_include))]
pub(super) fn open_socket() -> io::Result<OwnedFd> {
    // SAFETY: socket(2) takes no pointers; the result is checked below.
    let fd = unsafe { libc::socket(libc::PF_ROUTE, libc::SOCK_RAW, 0) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: `fd` is a freshly created descriptor owned by nobody else.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}
