//! Raw TCP and UDP headers for IPv4 raw sockets.
//!
//! Headers are plain owned values. `encode` turns one into the exact bytes a
//! raw socket expects, `encode_with_checksum` also fills in the IPv4
//! pseudo-header checksum, and `decode` rebuilds a header from bytes read
//! off the wire.
//!
//! ```
//! use maja_packets::{TcpHeader, TcpOption};
//!
//! let mut syn = TcpHeader::syn(40000, 443);
//! syn.options = vec![TcpOption::mss(1460), TcpOption::sack_permitted()];
//! syn.data_offset = 7;
//!
//! let (syn, bytes) = syn.encode_with_checksum("192.168.1.10", "192.168.1.1").unwrap();
//! assert_eq!(bytes.len(), 28);
//! assert_eq!(TcpHeader::decode(&bytes), syn);
//! ```

pub mod error;
pub mod hextools;
pub mod net;

pub use error::{PacketError, Result};
pub use net::checksum::{checksum_ipv4, internet_checksum, ipv4_pseudo_checksum, ChecksumKind};
pub use net::option::{decode_options, encode_options, TcpOption};
pub use net::tcp::TcpHeader;
pub use net::udp::UdpHeader;
