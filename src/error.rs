use thiserror::Error;

/// Every way encoding a header can fail.
///
/// Decoding never fails, so all variants come from `encode`,
/// `encode_with_checksum` or the generic checksum entry point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("DataOffset field must be at least 5 and no more than 15")]
    DataOffsetInvalid,
    #[error("The DataOffset field is too small for the data provided. It should be at least {expected}")]
    DataOffsetTooSmall { expected: usize },
    #[error("TCP Options are too large, must be less than {max_size} total bytes")]
    OptionsOverflow { max_size: usize },
    #[error("Option {index} Length doesn't match length of data")]
    OptionDataInvalid { index: usize },
    #[error("Option {index} Data cannot be larger than 253 bytes")]
    OptionDataTooLong { index: usize },
    #[error("UDP Payload must not be larger than {max_size} byte, was {len} bytes")]
    UdpPayloadTooLarge { max_size: usize, len: usize },
    #[error("Checksum kind should either be 'tcp' OR 'udp'.")]
    ChecksumInvalidKind,
}

pub type Result<T> = std::result::Result<T, PacketError>;
