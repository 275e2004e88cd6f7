//! BSD routing socket record decoder.
//!
//! A `PF_ROUTE` socket delivers `ifa_msghdr` records for address changes:
//!
//! ```text
//! offset  size  field
//!      0     2  ifam_msglen   total record length, header included
//!      2     1  ifam_version
//!      3     1  ifam_type     RTM_NEWADDR, RTM_DELADDR, ...
//!      4     4  ifam_addrs    bitmask of RTAX_* slots present
//!      8     4  ifam_flags
//!     12     2  ifam_index    interface index
//!     14     6  (metric and padding)
//!     20     -  sockaddrs, one per set bit, lowest bit first
//! ```
//!
//! Each sockaddr starts with its own `sa_len` byte followed by `sa_family`,
//! and is padded to the route alignment. A zero `sa_len` still occupies one
//! alignment unit. The layout above is shared by FreeBSD, DragonFly and
//! Darwin; only the alignment differs.

use super::{ByteCursor, DecodeError, RecordDecoder};
use crate::network::{InterfaceAddress, InterfaceResolver, SockAddr};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Record type for "address added to interface".
pub const RTM_NEWADDR: u8 = 0x0c;

/// Slot index of the interface address in the `ifam_addrs` bitmask.
pub const RTAX_IFA: u32 = 5;

/// Number of address slots a record can carry.
pub const RTAX_MAX: u32 = 8;

/// Size of `struct ifa_msghdr`.
pub const IFA_MSGHDR_LEN: usize = 20;

/// Smallest prefix of any routing record: `msglen`, `version`, `type`.
const RECORD_PREFIX_LEN: usize = 4;

/// `AF_INET` as stored in `sa_family`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const AF_INET: u8 = libc::AF_INET as u8;

/// `AF_INET6` as stored in `sa_family`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const AF_INET6: u8 = libc::AF_INET6 as u8;

/// Offset of the address bytes inside `sockaddr_in`.
const SIN_ADDR_OFFSET: usize = 4;

/// Offset of the address bytes inside `sockaddr_in6`.
const SIN6_ADDR_OFFSET: usize = 8;

/// Sockaddr padding unit used by the kernel for routing messages.
///
/// Darwin pads to 32 bits; the other BSDs pad to `sizeof(long)`.
#[cfg(target_vendor = "apple")]
pub const NATIVE_ALIGNMENT: usize = 4;

/// Sockaddr padding unit used by the kernel for routing messages.
///
/// Darwin pads to 32 bits; the other BSDs pad to `sizeof(long)`.
#[cfg(not(target_vendor = "apple"))]
pub const NATIVE_ALIGNMENT: usize = std::mem::size_of::<libc::c_ulong>();

/// Decoder for BSD routing socket records.
///
/// # Example
///
/// ```ignore
/// use ipnotd::monitor::decode::{RecordDecoder, RouteDecoder};
/// use ipnotd::network::platform::SystemResolver;
///
/// let decoder = RouteDecoder::new(SystemResolver);
/// let events = decoder.decode(&buf)?;
/// ```
#[derive(Debug, Clone)]
pub struct RouteDecoder<R> {
    resolver: R,
    alignment: usize,
}

impl<R> RouteDecoder<R> {
    /// Creates a decoder using the host's sockaddr alignment.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
            alignment: NATIVE_ALIGNMENT,
        }
    }

    /// Overrides the sockaddr alignment.
    ///
    /// Useful for decoding captures taken on a different platform. An
    /// alignment of zero is treated as one (no padding).
    #[must_use]
    pub const fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = if alignment == 0 { 1 } else { alignment };
        self
    }
}

impl<R: InterfaceResolver> RouteDecoder<R> {
    /// Decodes a single `ifa_msghdr` record of type `RTM_NEWADDR`.
    ///
    /// Returns `Ok(None)` when the interface is gone or the record carries
    /// no interface-address slot.
    fn decode_new_addr(&self, record: &[u8]) -> Result<Option<InterfaceAddress>, DecodeError> {
        let mut header = ByteCursor::new(record);
        header.peek(IFA_MSGHDR_LEN)?;
        header.skip(RECORD_PREFIX_LEN)?;
        let addrs = header.read_u32()?;
        header.skip(4)?; // ifam_flags
        let index = header.read_u16()?;

        let Some(interface) = self.resolver.resolve(u32::from(index)) else {
            tracing::debug!("Skipping address record for vanished interface index {index}");
            return Ok(None);
        };

        let mut body = ByteCursor::new(&record[IFA_MSGHDR_LEN..]);
        for slot in 0..RTAX_MAX {
            if addrs & (1 << slot) == 0 {
                continue;
            }
            let address = read_sockaddr(&mut body, self.alignment)?;
            if slot == RTAX_IFA {
                return Ok(Some(InterfaceAddress::new(interface, address)));
            }
        }

        Ok(None)
    }
}

impl<R: InterfaceResolver> RecordDecoder for RouteDecoder<R> {
    fn decode(&self, buf: &[u8]) -> Result<Vec<InterfaceAddress>, DecodeError> {
        let mut cursor = ByteCursor::new(buf);
        let mut events = Vec::new();

        while !cursor.is_empty() {
            let offset = cursor.position();
            let prefix = cursor.peek(RECORD_PREFIX_LEN)?;
            let msglen = usize::from(u16::from_ne_bytes([prefix[0], prefix[1]]));
            let kind = prefix[3];

            if msglen < RECORD_PREFIX_LEN {
                return Err(DecodeError::Malformed {
                    offset,
                    reason: "record length shorter than record prefix",
                });
            }

            let record = cursor.take(msglen)?;
            if kind != RTM_NEWADDR {
                tracing::trace!("Skipping routing record type {kind:#04x} ({msglen} bytes)");
                continue;
            }

            events.extend(self.decode_new_addr(record)?);
        }

        Ok(events)
    }
}

/// Reads one length-prefixed sockaddr and advances past its padding.
fn read_sockaddr(cursor: &mut ByteCursor<'_>, alignment: usize) -> Result<SockAddr, DecodeError> {
    let sa_len = usize::from(cursor.peek(1)?[0]);
    if sa_len == 0 {
        cursor.skip_padding(alignment);
        return Ok(SockAddr::Other { family: 0 });
    }

    let raw = cursor.take(sa_len)?;
    cursor.skip_padding(sa_len.next_multiple_of(alignment) - sa_len);

    Ok(parse_sockaddr(raw))
}

/// Interprets the bytes of a single sockaddr.
///
/// Netmask slots may be shortened by the kernel with trailing zero bytes
/// omitted, so missing address bytes are treated as zero.
fn parse_sockaddr(raw: &[u8]) -> SockAddr {
    let Some(&family) = raw.get(1) else {
        return SockAddr::Other { family: 0 };
    };

    match family {
        AF_INET => SockAddr::V4(Ipv4Addr::from(copy_address::<4>(raw, SIN_ADDR_OFFSET))),
        AF_INET6 => SockAddr::V6(Ipv6Addr::from(copy_address::<16>(raw, SIN6_ADDR_OFFSET))),
        other => SockAddr::Other {
            family: u16::from(other),
        },
    }
}

fn copy_address<const N: usize>(raw: &[u8], offset: usize) -> [u8; N] {
    let mut bytes = [0u8; N];
    if let Some(src) = raw.get(offset..) {
        let len = src.len().min(N);
        bytes[..len].copy_from_slice(&src[..len]);
    }
    bytes
}
