#![allow(dead_code)]

use maja_packets::{TcpHeader, UdpHeader};

pub const LOCAL: &str = "127.0.0.1";
pub const REMOTE: &str = "127.0.0.2";

/// Routes the crate's `log` output through the test harness; set `RUST_LOG`
/// to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// PSH+SYN from 44273 to 22, the header behind the TCP golden checksums.
pub fn psh_syn() -> TcpHeader {
    TcpHeader {
        source_port: 44273,
        destination_port: 22,
        seq_num: 42,
        ack_num: 0,
        data_offset: 5,
        psh: true,
        syn: true,
        window_size: 43690,
        ..Default::default()
    }
}

/// Four byte query from 4242 to 53, the datagram behind the UDP golden
/// checksum.
pub fn dns_probe() -> UdpHeader {
    UdpHeader {
        source_port: 4242,
        destination_port: 53,
        length: 12,
        checksum: 0,
        payload: vec![42, 128, 0, 0],
    }
}
