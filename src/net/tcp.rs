use log::{debug, trace};

use super::checksum::{ipv4_pseudo_checksum, ChecksumKind};
use super::field;
use super::option::{decode_options, encode_options, TcpOption};
use crate::error::{PacketError, Result};
use crate::hextools::format_hexdump;

/// Fixed part of every TCP header, in bytes.
pub const TCP_HEADER_LEN: usize = 20;
pub const MIN_DATA_OFFSET: u8 = 5;
pub const MAX_DATA_OFFSET: u8 = 15;
/// Window written when the header leaves `window_size` at 0.
pub const DEFAULT_WINDOW_SIZE: u16 = 65535;

/// Control bits inside the 16-bit word that follows the ack number.
/// Data offset sits in bits 15-12 and the reserved bits in 11-9.
pub mod flags {
    pub const NS: u16 = 1 << 8;
    pub const CWR: u16 = 1 << 7;
    pub const ECE: u16 = 1 << 6;
    pub const URG: u16 = 1 << 5;
    pub const ACK: u16 = 1 << 4;
    pub const PSH: u16 = 1 << 3;
    pub const RST: u16 = 1 << 2;
    pub const SYN: u16 = 1 << 1;
    pub const FIN: u16 = 1;
}

/// Represents the structure of a TCP header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TcpHeader {
    /// Source port (16 bits)
    pub source_port: u16,
    /// Destination port (16 bits)
    pub destination_port: u16,
    /// Sequence number (32 bits)
    pub seq_num: u32,
    /// Acknowledgment number (32 bits)
    pub ack_num: u32,
    /// Data offset (4 bits) - Number of 32-bit words in header.
    /// 0 is encoded as 5.
    pub data_offset: u8,
    /// Reserved (3 bits)
    pub reserved: u8,
    /// Control flags (9 bits)
    pub ns: bool,  // ECN-nonce
    pub cwr: bool, // Congestion Window Reduced
    pub ece: bool, // ECN-Echo
    pub urg: bool, // Urgent
    pub ack: bool, // Acknowledgment
    pub psh: bool, // Push
    pub rst: bool, // Reset
    pub syn: bool, // Synchronize
    pub fin: bool, // Finish
    /// Window size (16 bits). 0 is encoded as 65535, so a zero window
    /// cannot be expressed.
    pub window_size: u16,
    /// Checksum (16 bits)
    pub checksum: u16,
    /// Urgent pointer (16 bits)
    pub urgent_pointer: u16,
    /// Options, in wire order
    pub options: Vec<TcpOption>,
}

fn flag(set: bool, bit: u16) -> u16 {
    if set {
        bit
    } else {
        0
    }
}

impl TcpHeader {
    /// A bare SYN from `source_port` to `destination_port`, everything else
    /// left to the encoder's defaults.
    pub fn syn(source_port: u16, destination_port: u16) -> Self {
        TcpHeader {
            source_port,
            destination_port,
            syn: true,
            ..Default::default()
        }
    }

    /// Copy of the header with the unset `data_offset` and `window_size`
    /// replaced by what the encoder writes for them.
    pub fn normalized(&self) -> TcpHeader {
        let mut header = self.clone();
        if header.data_offset == 0 {
            debug!("data offset unset, using {}", MIN_DATA_OFFSET);
            header.data_offset = MIN_DATA_OFFSET;
        }
        if header.window_size == 0 {
            debug!("window size unset, using {}", DEFAULT_WINDOW_SIZE);
            header.window_size = DEFAULT_WINDOW_SIZE;
        }
        header
    }

    /// Data offset, reserved bits and the nine flags packed as they appear
    /// on the wire.
    pub fn control_word(&self) -> u16 {
        (u16::from(self.data_offset & 0x0f) << 12)
            | (u16::from(self.reserved & 0x07) << 9)
            | flag(self.ns, flags::NS)
            | flag(self.cwr, flags::CWR)
            | flag(self.ece, flags::ECE)
            | flag(self.urg, flags::URG)
            | flag(self.ack, flags::ACK)
            | flag(self.psh, flags::PSH)
            | flag(self.rst, flags::RST)
            | flag(self.syn, flags::SYN)
            | flag(self.fin, flags::FIN)
    }

    /// Serialises the header, options and padding. The output is always
    /// `data_offset * 4` bytes long.
    ///
    /// The `checksum` field is written as set; use
    /// [`TcpHeader::encode_with_checksum`] to compute it.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = self.normalized();

        if !(MIN_DATA_OFFSET..=MAX_DATA_OFFSET).contains(&header.data_offset) {
            return Err(PacketError::DataOffsetInvalid);
        }

        let options = encode_options(&header.options)?;

        let used = TCP_HEADER_LEN + options.len();
        let total_length = usize::from(header.data_offset) * 4;
        if total_length < used {
            return Err(PacketError::DataOffsetTooSmall {
                expected: used.div_ceil(4),
            });
        }

        let mut buffer = Vec::with_capacity(total_length);
        buffer.extend_from_slice(&header.source_port.to_be_bytes());
        buffer.extend_from_slice(&header.destination_port.to_be_bytes());
        buffer.extend_from_slice(&header.seq_num.to_be_bytes());
        buffer.extend_from_slice(&header.ack_num.to_be_bytes());
        buffer.extend_from_slice(&header.control_word().to_be_bytes());
        buffer.extend_from_slice(&header.window_size.to_be_bytes());
        buffer.extend_from_slice(&header.checksum.to_be_bytes());
        buffer.extend_from_slice(&header.urgent_pointer.to_be_bytes());

        buffer.extend_from_slice(&options);
        buffer.resize(total_length, 0);

        trace!("encoded TCP header:\n{}", format_hexdump(&buffer));

        Ok(buffer)
    }

    /// Encodes the header with its IPv4 pseudo-header checksum filled in.
    ///
    /// The checksum is computed over the header as encoded with its current
    /// `checksum` field (normally 0). Returns the header that was finally
    /// encoded, defaults and checksum applied, along with its bytes; `self`
    /// is left untouched.
    pub fn encode_with_checksum(&self, laddr: &str, raddr: &str) -> Result<(TcpHeader, Vec<u8>)> {
        let mut header = self.normalized();

        let unchecked = header.encode()?;
        header.checksum =
            ipv4_pseudo_checksum(&unchecked, ChecksumKind::Tcp.protocol(), laddr, raddr);
        debug!(
            "TCP checksum for {} -> {}: 0x{:04x}",
            laddr, raddr, header.checksum
        );

        let bytes = header.encode()?;
        Ok((header, bytes))
    }

    /// Parses a received header. Never fails: missing bytes read as zero
    /// and `data_offset` is taken as received.
    pub fn decode(data: &[u8]) -> TcpHeader {
        let ctrl = u16::from_be_bytes(field(data, 12));
        let data_offset = (ctrl >> 12) as u8;

        let header_len = (usize::from(data_offset) * 4).min(data.len());
        let options = match data.get(TCP_HEADER_LEN..header_len) {
            Some(region) => decode_options(region),
            None => Vec::new(),
        };

        TcpHeader {
            source_port: u16::from_be_bytes(field(data, 0)),
            destination_port: u16::from_be_bytes(field(data, 2)),
            seq_num: u32::from_be_bytes(field(data, 4)),
            ack_num: u32::from_be_bytes(field(data, 8)),
            data_offset,
            reserved: ((ctrl >> 9) & 0x07) as u8,
            ns: ctrl & flags::NS != 0,
            cwr: ctrl & flags::CWR != 0,
            ece: ctrl & flags::ECE != 0,
            urg: ctrl & flags::URG != 0,
            ack: ctrl & flags::ACK != 0,
            psh: ctrl & flags::PSH != 0,
            rst: ctrl & flags::RST != 0,
            syn: ctrl & flags::SYN != 0,
            fin: ctrl & flags::FIN != 0,
            window_size: u16::from_be_bytes(field(data, 14)),
            checksum: u16::from_be_bytes(field(data, 16)),
            urgent_pointer: u16::from_be_bytes(field(data, 18)),
            options,
        }
    }
}
