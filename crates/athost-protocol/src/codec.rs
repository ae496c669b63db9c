//! Line framing for the raw serial byte stream.
//!
//! Modem responses carry no length information; the only framing is the
//! line break. `LineCodec` accumulates raw bytes as they arrive and yields
//! complete lines, tolerating reads that split a line (or a `\r\n` pair)
//! at any byte boundary.
//!
//! Blank lines are yielded as empty strings rather than swallowed here;
//! deciding what a blank line means is the classifier's job.

use bytes::{Buf, BytesMut};

/// Initial receive buffer capacity. Response lines from real modems are
/// short; the buffer grows if a payload line exceeds this.
const INITIAL_CAPACITY: usize = 256;

/// A codec for re-framing a byte stream into lines.
///
/// Accepts both `\r\n` and bare `\n` line breaks. A `\r\n` pair split
/// across two pushes is still treated as a single break.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// The previous line ended with `\r`; a directly following `\n`
    /// belongs to the same break and is swallowed.
    pending_lf: bool,
}

impl LineCodec {
    /// Create a new line codec.
    pub fn new() -> Self {
        LineCodec {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
            pending_lf: false,
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete line from the buffer.
    ///
    /// Returns `Some(line)` without the terminator (possibly empty for a
    /// blank line), or `None` if no complete line is buffered yet.
    pub fn decode_line(&mut self) -> Option<String> {
        if self.pending_lf {
            if self.buffer.is_empty() {
                return None;
            }
            if self.buffer[0] == b'\n' {
                self.buffer.advance(1);
            }
            self.pending_lf = false;
        }

        let end = self
            .buffer
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')?;

        let line_data = self.buffer.split_to(end);
        let line = String::from_utf8_lossy(&line_data).to_string();

        let terminator = self.buffer[0];
        self.buffer.advance(1);
        if terminator == b'\r' {
            if !self.buffer.is_empty() && self.buffer[0] == b'\n' {
                self.buffer.advance(1);
            } else {
                // The matching \n may arrive in a later push.
                self.pending_lf = self.buffer.is_empty();
            }
        }

        Some(line)
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pending_lf = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line() {
        let mut codec = LineCodec::new();
        codec.push(b"line1\r\nline2\r\n");

        assert_eq!(codec.decode_line(), Some("line1".to_string()));
        assert_eq!(codec.decode_line(), Some("line2".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_partial_line() {
        let mut codec = LineCodec::new();
        codec.push(b"OK");

        assert!(codec.decode_line().is_none());

        codec.push(b"\r\n");
        assert_eq!(codec.decode_line(), Some("OK".to_string()));
    }

    #[test]
    fn test_split_crlf() {
        let mut codec = LineCodec::new();
        codec.push(b"OK\r");

        assert_eq!(codec.decode_line(), Some("OK".to_string()));

        // The \n of the split pair must not become an empty line.
        codec.push(b"\n+DATA\r\n");
        assert_eq!(codec.decode_line(), Some("+DATA".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_blank_lines_are_yielded() {
        let mut codec = LineCodec::new();
        codec.push(b"first\r\n\r\nOK\r\n");

        assert_eq!(codec.decode_line(), Some("first".to_string()));
        assert_eq!(codec.decode_line(), Some("".to_string()));
        assert_eq!(codec.decode_line(), Some("OK".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_bare_newline() {
        let mut codec = LineCodec::new();
        codec.push(b"ready\nOK\n");

        assert_eq!(codec.decode_line(), Some("ready".to_string()));
        assert_eq!(codec.decode_line(), Some("OK".to_string()));
    }

    #[test]
    fn test_clear() {
        let mut codec = LineCodec::new();
        codec.push(b"partial");
        assert_eq!(codec.buffered_len(), 7);

        codec.clear();
        assert_eq!(codec.buffered_len(), 0);
        assert!(codec.decode_line().is_none());
    }
}
