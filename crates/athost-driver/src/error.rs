//! Error types for the exchange engine.

use athost_protocol::ProtocolError;
use thiserror::Error;

pub use crate::transport::TransportError;

/// Errors surfaced by the driver's public operations.
///
/// A modem answering `ERROR` is not represented here: protocol outcomes
/// travel as data in [`AtResponse`](athost_protocol::AtResponse) so
/// that callers can tell "device said no" from "link is broken". The
/// `Transport` variant is the broken-link channel.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The underlying channel failed or closed mid-exchange.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The command could not be serialized safely.
    #[error("command rejected: {0}")]
    Command(#[from] ProtocolError),
}

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
