//! AT Modem Host Driver
//!
//! This crate provides the blocking command exchange engine for talking
//! to ESP-AT style modems over a serial byte stream. One exchange is a
//! command write followed by a read of response lines until the modem
//! emits a terminal `OK` or `ERROR` token; the engine classifies the
//! stream and returns a structured result.
//!
//! The protocol layer (command serialization, response classification,
//! line framing) lives in [`athost_protocol`] and is re-exported here.
//!
//! # Example
//!
//! ```rust,ignore
//! use athost_driver::{AtEngine, IoTransport};
//!
//! let port = open_serial_port()?; // anything Read + Write
//! let (rx, tx) = port.split();
//! let mut engine = AtEngine::new(IoTransport::new(rx, tx));
//!
//! if engine.is_ready()? {
//!     let rtt = engine.probe_latency("192.168.4.1", 250)?;
//! }
//! ```

mod engine;
mod error;
mod transport;

pub use engine::*;
pub use error::*;
pub use transport::*;

pub use athost_protocol::{
    AtCommand, AtResponse, AtStatus, AtValue, LineCodec, ProtocolError, ResponseClassifier,
};
