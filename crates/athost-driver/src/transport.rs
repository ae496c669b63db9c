//! Blocking transport abstraction.
//!
//! The engine needs two operations from a transport: write a whole
//! command string, and block until one response line is available. How
//! the bytes move (serial port, TCP bridge, in-memory test double) is
//! the transport's business.

use std::io::{self, Read, Write};

use athost_protocol::LineCodec;
use thiserror::Error;

/// Failures of the underlying channel.
///
/// These are always fatal to the in-flight exchange and are never
/// retried by the engine; any lines collected before the failure are
/// dropped so a broken link can never masquerade as a completed
/// exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Read or write failed at the I/O layer.
    #[error("transport I/O failure: {0}")]
    Io(#[from] io::Error),

    /// The channel reached end-of-stream mid-exchange.
    #[error("transport closed")]
    Closed,

    /// A transport-level read timeout expired.
    #[error("transport read timed out")]
    TimedOut,

    /// The per-exchange deadline expired before a terminal token.
    #[error("exchange deadline exceeded")]
    DeadlineExceeded,
}

/// A blocking, exclusively-owned byte channel with line framing.
pub trait Transport {
    /// Write the whole buffer, flushing through to the device.
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Block until one complete line is available and return it without
    /// its terminator. A blank line is returned as an empty string.
    fn read_line(&mut self) -> Result<String, TransportError>;
}

/// Adapter that turns any `io::Read` + `io::Write` pair into a
/// [`Transport`] by running the raw bytes through a [`LineCodec`].
///
/// Timeout-capable readers (a serial port with a configured read
/// timeout) surface their expiry as [`TransportError::TimedOut`]; that
/// is what makes the engine's exchange deadline effective rather than
/// advisory.
#[derive(Debug)]
pub struct IoTransport<R, W> {
    reader: R,
    writer: W,
    codec: LineCodec,
}

impl<R: Read, W: Write> IoTransport<R, W> {
    /// Wrap a reader/writer pair.
    pub fn new(reader: R, writer: W) -> Self {
        IoTransport {
            reader,
            writer,
            codec: LineCodec::new(),
        }
    }

    /// Consume the adapter and return the underlying pair.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

fn map_read_error(err: io::Error) -> TransportError {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TransportError::TimedOut,
        _ => TransportError::Io(err),
    }
}

impl<R: Read, W: Write> Transport for IoTransport<R, W> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        loop {
            if let Some(line) = self.codec.decode_line() {
                return Ok(line);
            }
            let mut buf = [0u8; 64];
            let n = self.reader.read(&mut buf).map_err(map_read_error)?;
            if n == 0 {
                return Err(TransportError::Closed);
            }
            self.codec.push(&buf[..n]);
        }
    }
}
