//! Decoders for OS address-change notification records.
//!
//! A notification socket delivers a byte stream of packed, self-describing
//! records. The decoders here walk those bytes with a bounds-checked
//! [`ByteCursor`] and produce one [`InterfaceAddress`] per "new address"
//! record whose interface still exists:
//!
//! - [`RouteDecoder`]: BSD routing socket (`PF_ROUTE`) `ifa_msghdr` records
//! - [`NetlinkDecoder`]: Linux `NETLINK_ROUTE` `RTM_NEWADDR` messages
//!
//! Both are pure functions of their input bytes plus an
//! [`InterfaceResolver`](crate::network::InterfaceResolver), so they can be
//! exercised on any host.
//!
//! # Fault Policy
//!
//! Records of other types and records whose interface index no longer
//! resolves are skipped silently. A length field that runs past the end of
//! the buffer is a [`DecodeError`]: every later offset depends on it, so the
//! stream position cannot be recovered.

mod cursor;
mod netlink;
mod route;


pub use cursor::ByteCursor;
pub use netlink::NetlinkDecoder;
pub use route::{NATIVE_ALIGNMENT, RouteDecoder};

use crate::network::InterfaceAddress;
use thiserror::Error;

/// Error type for record decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A length field points past the end of the available bytes.
    #[error("Truncated record at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Offset of the read within the record buffer.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes actually left.
        available: usize,
    },

    /// A length field is self-inconsistent (e.g. shorter than its own header).
    #[error("Malformed record at offset {offset}: {reason}")]
    Malformed {
        /// Offset of the offending field within the record buffer.
        offset: usize,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Trait for turning raw notification bytes into address events.
///
/// One call consumes one buffer as returned by a single socket read, which
/// may contain several back-to-back records.
pub trait RecordDecoder: Send {
    /// Decodes every record in `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if any record is truncated or malformed.
    fn decode(&self, buf: &[u8]) -> Result<Vec<InterfaceAddress>, DecodeError>;
}
