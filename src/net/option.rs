use log::debug;

use crate::error::{PacketError, Result};

/// Largest options region a TCP header can carry: (15 - 5) words.
pub const MAX_OPTIONS_LEN: usize = 40;
/// An option's length byte also counts the kind and length bytes.
pub const MAX_OPTION_DATA_LEN: usize = 253;

pub const EOL: u8 = 0;
pub const NOP: u8 = 1;
pub const MSS: u8 = 2;
pub const WINDOW_SCALE: u8 = 3;
pub const SACK_PERMITTED: u8 = 4;
pub const SACK: u8 = 5;
pub const TIMESTAMPS: u8 = 8;

/// A single TCP option as it appears on the wire: kind, total length, data.
///
/// `length` is written as given; `encode_options` rejects an option whose
/// `length` disagrees with `data`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TcpOption {
    pub kind: u8,
    pub length: u8,
    pub data: Vec<u8>,
}

impl TcpOption {
    /// Builds an option whose length byte matches `data`.
    ///
    /// The length wraps if `data` is longer than 253 bytes, which encoding
    /// then rejects.
    pub fn new(kind: u8, data: Vec<u8>) -> Self {
        TcpOption {
            kind,
            length: (data.len() + 2) as u8,
            data,
        }
    }

    pub fn mss(mss: u16) -> Self {
        Self::new(MSS, mss.to_be_bytes().to_vec())
    }

    pub fn window_scale(shift: u8) -> Self {
        Self::new(WINDOW_SCALE, vec![shift])
    }

    pub fn sack_permitted() -> Self {
        Self::new(SACK_PERMITTED, Vec::new())
    }

    pub fn timestamps(value: u32, echo_reply: u32) -> Self {
        let mut data = Vec::with_capacity(8);
        data.extend_from_slice(&value.to_be_bytes());
        data.extend_from_slice(&echo_reply.to_be_bytes());
        Self::new(TIMESTAMPS, data)
    }

    /// Bytes this option occupies once encoded, NOP padding included.
    pub fn encoded_len(&self) -> usize {
        let len = 2 + self.data.len();
        len + (len & 1)
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.data.len() > MAX_OPTION_DATA_LEN {
            return Err(PacketError::OptionDataTooLong { index });
        }
        if usize::from(self.length).checked_sub(2) != Some(self.data.len()) {
            return Err(PacketError::OptionDataInvalid { index });
        }
        Ok(())
    }
}

/// Serialises `options` in order. Every option with an odd encoded size is
/// followed by a NOP so each one contributes an even number of bytes.
///
/// The result is not aligned to 32 bits; the header encoder pads the
/// whole header instead.
pub fn encode_options(options: &[TcpOption]) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(MAX_OPTIONS_LEN);

    for (index, option) in options.iter().enumerate() {
        option.validate(index)?;

        buffer.push(option.kind);
        buffer.push(option.length);
        buffer.extend_from_slice(&option.data);

        if (2 + option.data.len()) & 1 == 1 {
            buffer.push(NOP);
        }
    }

    if buffer.len() > MAX_OPTIONS_LEN {
        return Err(PacketError::OptionsOverflow {
            max_size: MAX_OPTIONS_LEN,
        });
    }

    Ok(buffer)
}

/// Parses an options region back into options.
///
/// NOPs are single bytes and are skipped, which also consumes the padding
/// `encode_options` inserts. An EOL ends the list. Malformed input stops the
/// scan and returns what was parsed so far.
pub fn decode_options(bytes: &[u8]) -> Vec<TcpOption> {
    let mut options = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let kind = bytes[cursor];
        match kind {
            EOL => break,
            NOP => {
                cursor += 1;
                continue;
            }
            _ => {}
        }

        let Some(&length) = bytes.get(cursor + 1) else {
            debug!("option kind {} at offset {} has no length byte", kind, cursor);
            break;
        };
        let end = cursor + usize::from(length);
        if length < 2 || end > bytes.len() {
            debug!(
                "option kind {} at offset {} declares length {} with {} bytes left",
                kind,
                cursor,
                length,
                bytes.len() - cursor
            );
            break;
        }

        options.push(TcpOption {
            kind,
            length,
            data: bytes[cursor + 2..end].to_vec(),
        });
        cursor = end;
    }

    options
}
