//! Platform-specific address enumeration and index resolution.
//!
//! Both are thin wrappers over libc calls exposed by `nix`:
//! `getifaddrs` for [`AddressFetcher`](super::AddressFetcher) and
//! `if_indextoname` for [`InterfaceResolver`](super::InterfaceResolver).
//! They are available on every Unix target.

mod unix;

pub use unix::{SystemFetcher, SystemResolver};
