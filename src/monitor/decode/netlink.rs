//! Linux rtnetlink address message decoder.
//!
//! Messages on a `NETLINK_ROUTE` socket subscribed to the address groups are
//! `nlmsghdr`-framed and padded to 4 bytes. Framing is checked here so that
//! truncation faults keep their offsets; each `RTM_NEWADDR` message is then
//! parsed with `netlink-packet-route`.
//!
//! For point-to-point links `IFA_ADDRESS` is the peer and `IFA_LOCAL` the
//! interface's own address, so `IFA_LOCAL` wins when both are present.

use super::{ByteCursor, DecodeError, RecordDecoder};
use crate::network::{InterfaceAddress, InterfaceResolver, SockAddr};
use netlink_packet_core::{NetlinkMessage, NetlinkPayload};
use netlink_packet_route::RouteNetlinkMessage;
use netlink_packet_route::address::{AddressAttribute, AddressMessage};
use std::net::IpAddr;

/// Message type for "address added to interface".
pub const RTM_NEWADDR: u16 = 20;

/// Linux `AF_INET`.
pub const AF_INET: u8 = 2;

/// Linux `AF_INET6`.
pub const AF_INET6: u8 = 10;

/// Size of `struct nlmsghdr`.
pub const NLMSG_HDRLEN: usize = 16;

/// Alignment of netlink messages.
const NLMSG_ALIGNTO: usize = 4;

/// Decoder for rtnetlink `RTM_NEWADDR` messages.
#[derive(Debug, Clone)]
pub struct NetlinkDecoder<R> {
    resolver: R,
}

impl<R> NetlinkDecoder<R> {
    /// Creates a new netlink decoder.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: InterfaceResolver> NetlinkDecoder<R> {
    /// Picks the interface address out of one parsed `RTM_NEWADDR` message.
    fn decode_new_addr(&self, message: &AddressMessage) -> Option<InterfaceAddress> {
        let index = message.header.index;
        let Some(interface) = self.resolver.resolve(index) else {
            tracing::debug!("Skipping address message for vanished interface index {index}");
            return None;
        };

        let mut local = None;
        let mut peer = None;
        for attribute in &message.attributes {
            match attribute {
                AddressAttribute::Local(ip) => local = Some(*ip),
                AddressAttribute::Address(ip) => peer = Some(*ip),
                _ => {}
            }
        }

        let family = u8::from(message.header.family);
        local
            .or(peer)
            .map(|ip| InterfaceAddress::new(interface, tagged(family, ip)))
    }
}

impl<R: InterfaceResolver> RecordDecoder for NetlinkDecoder<R> {
    fn decode(&self, buf: &[u8]) -> Result<Vec<InterfaceAddress>, DecodeError> {
        let mut cursor = ByteCursor::new(buf);
        let mut events = Vec::new();

        while !cursor.is_empty() {
            let offset = cursor.position();
            let mut header = ByteCursor::new(cursor.peek(NLMSG_HDRLEN)?);
            let msg_len = header.read_u32()? as usize;
            let msg_type = header.read_u16()?;

            if msg_len < NLMSG_HDRLEN {
                return Err(DecodeError::Malformed {
                    offset,
                    reason: "message length shorter than netlink header",
                });
            }

            let bytes = cursor.take(msg_len)?;
            cursor.skip_padding(padding(msg_len));

            if msg_type != RTM_NEWADDR {
                tracing::trace!("Skipping netlink message type {msg_type} ({msg_len} bytes)");
                continue;
            }

            let message = NetlinkMessage::<RouteNetlinkMessage>::deserialize(bytes).map_err(|e| {
                tracing::debug!("Undecodable RTM_NEWADDR at offset {offset}: {e}");
                DecodeError::Malformed {
                    offset,
                    reason: "invalid RTM_NEWADDR message",
                }
            })?;

            if let NetlinkPayload::InnerMessage(RouteNetlinkMessage::NewAddress(address)) =
                &message.payload
            {
                events.extend(self.decode_new_addr(address));
            }
        }

        Ok(events)
    }
}

const fn padding(len: usize) -> usize {
    len.next_multiple_of(NLMSG_ALIGNTO) - len
}

/// Tags `ip` with the message's family; mismatches keep the raw family code.
fn tagged(family: u8, ip: IpAddr) -> SockAddr {
    match (family, ip) {
        (AF_INET, IpAddr::V4(_)) | (AF_INET6, IpAddr::V6(_)) => SockAddr::from(ip),
        _ => SockAddr::Other {
            family: u16::from(family),
        },
    }
}
