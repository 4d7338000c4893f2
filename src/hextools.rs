use std::fmt::Write;

const BYTES_PER_ROW: usize = 16;

/// Renders `data` the way Wireshark's hex pane does: an offset column,
/// sixteen bytes split into two groups of eight, then the printable ASCII.
///
/// Used by the encoders to trace every buffer they produce.
pub fn format_hexdump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(BYTES_PER_ROW) * 76);

    for (row, chunk) in data.chunks(BYTES_PER_ROW).enumerate() {
        let _ = write!(out, "0x{:04x}:  ", row * BYTES_PER_ROW);

        for column in 0..BYTES_PER_ROW {
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(out, "{:02x} ", byte);
                }
                None => out.push_str("   "),
            }
            if column == 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.extend(chunk.iter().map(|&byte| {
            if byte.is_ascii_graphic() {
                byte as char
            } else {
                '.'
            }
        }));
        out.push('\n');
    }

    out
}
