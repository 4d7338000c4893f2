//! Transport headers and the checksum they share.

pub mod checksum;
pub mod option;
pub mod tcp;
pub mod udp;

/// Reads the `N` bytes at `offset`, or zeros when the buffer is too short
/// to hold the whole field.
pub(crate) fn field<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    data.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .unwrap_or([0; N])
}
