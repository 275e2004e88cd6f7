//! Unix address enumeration using `getifaddrs` and `if_indextoname`.

use crate::network::{AddressFetcher, FetchError, InterfaceAddress, InterfaceResolver, SockAddr};
use nix::ifaddrs::getifaddrs;
use nix::net::if_::if_indextoname;
use nix::sys::socket::{SockaddrLike, SockaddrStorage};
use std::ffi::CString;
use std::net::{SocketAddrV4, SocketAddrV6};

/// [`AddressFetcher`] backed by `getifaddrs(3)`.
///
/// Entries without an address (some point-to-point and down interfaces)
/// are skipped; non-IP entries such as link-layer addresses are returned
/// as [`SockAddr::Other`] and filtered out later by the monitor.
///
/// # Example
///
/// ```no_run
/// use ipnotd::network::{AddressFetcher, platform::SystemFetcher};
///
/// let fetcher = SystemFetcher::new();
/// for entry in fetcher.fetch().expect("getifaddrs failed") {
///     println!("{}: {}", entry.interface, entry.address);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SystemFetcher {
    _private: (),
}

impl SystemFetcher {
    /// Creates a new system address fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressFetcher for SystemFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceAddress>, FetchError> {
        let entries = getifaddrs()?
            .filter_map(|ifa| {
                let address = ifa.address.as_ref().map(convert_sockaddr)?;
                Some(InterfaceAddress::new(ifa.interface_name, address))
            })
            .collect();

        Ok(entries)
    }
}

/// Converts a `nix` socket address into our tagged representation.
fn convert_sockaddr(storage: &SockaddrStorage) -> SockAddr {
    if let Some(sin) = storage.as_sockaddr_in() {
        return SockAddr::V4(*SocketAddrV4::from(*sin).ip());
    }
    if let Some(sin6) = storage.as_sockaddr_in6() {
        return SockAddr::V6(*SocketAddrV6::from(*sin6).ip());
    }

    // SAFETY: `as_ptr` points at the initialized sockaddr owned by `storage`.
    let family = unsafe { (*storage.as_ptr()).sa_family };
    #[allow(clippy::useless_conversion)] // sa_family_t is u8 on the BSDs
    let family = u16::from(family);
    SockAddr::Other { family }
}

/// [`InterfaceResolver`] backed by `if_indextoname(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl InterfaceResolver for SystemResolver {
    fn resolve(&self, index: u32) -> Option<String> {
        interface_name(index, if_indextoname(index))
    }
}

/// Maps an `if_indextoname` result to a usable name.
///
/// Some kernels report success with an empty name for indices that do not
/// exist; that counts as unresolved.
fn interface_name(index: u32, result: nix::Result<CString>) -> Option<String> {
    match result {
        Ok(name) if !name.as_bytes().is_empty() => Some(name.to_string_lossy().into_owned()),
        Ok(_) => {
            tracing::trace!("Interface index {index} resolved to an empty name");
            None
        }
        Err(e) => {
            tracing::trace!("Interface index {index} did not resolve: {e}");
            None
        }
    }
}
