use log::{debug, trace};

use super::checksum::{ipv4_pseudo_checksum, ChecksumKind};
use super::field;
use crate::error::{PacketError, Result};
use crate::hextools::format_hexdump;

/// UDP header length in bytes
pub const UDP_HEADER_LEN: usize = 8;
/// Largest payload whose datagram length still fits the 16-bit length field.
pub const MAX_UDP_PAYLOAD_LEN: usize = u16::MAX as usize - UDP_HEADER_LEN;

/// UDP header together with the payload it carries.
///
/// `length` is written exactly as set; the codec never derives it from the
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UdpHeader {
    pub source_port: u16,
    pub destination_port: u16,
    pub length: u16,
    pub checksum: u16,
    pub payload: Vec<u8>,
}

impl UdpHeader {
    /// Serialises the header followed by the raw payload, `8 + payload.len()`
    /// bytes in total.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.payload.len() > MAX_UDP_PAYLOAD_LEN {
            return Err(PacketError::UdpPayloadTooLarge {
                max_size: MAX_UDP_PAYLOAD_LEN,
                len: self.payload.len(),
            });
        }

        let mut buffer = Vec::with_capacity(UDP_HEADER_LEN + self.payload.len());
        buffer.extend_from_slice(&self.source_port.to_be_bytes());
        buffer.extend_from_slice(&self.destination_port.to_be_bytes());
        buffer.extend_from_slice(&self.length.to_be_bytes());
        buffer.extend_from_slice(&self.checksum.to_be_bytes());
        buffer.extend_from_slice(&self.payload);

        trace!("encoded UDP datagram:\n{}", format_hexdump(&buffer));

        Ok(buffer)
    }

    /// Encodes the datagram with its IPv4 pseudo-header checksum, computed
    /// with the checksum field zeroed. Returns the checksummed header and
    /// its bytes; `self` is left untouched.
    pub fn encode_with_checksum(&self, laddr: &str, raddr: &str) -> Result<(UdpHeader, Vec<u8>)> {
        let mut header = self.clone();
        header.checksum = 0;

        let unchecked = header.encode()?;
        header.checksum =
            ipv4_pseudo_checksum(&unchecked, ChecksumKind::Udp.protocol(), laddr, raddr);
        debug!(
            "UDP checksum for {} -> {}: 0x{:04x}",
            laddr, raddr, header.checksum
        );

        let bytes = header.encode()?;
        Ok((header, bytes))
    }

    /// Parses a received datagram. Never fails: missing header bytes read
    /// as zero and everything past byte 8 is payload.
    pub fn decode(data: &[u8]) -> UdpHeader {
        UdpHeader {
            source_port: u16::from_be_bytes(field(data, 0)),
            destination_port: u16::from_be_bytes(field(data, 2)),
            length: u16::from_be_bytes(field(data, 4)),
            checksum: u16::from_be_bytes(field(data, 6)),
            payload: data.get(UDP_HEADER_LEN..).unwrap_or_default().to_vec(),
        }
    }
}
