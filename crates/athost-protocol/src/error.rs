//! Error types for the protocol layer.

use thiserror::Error;

/// Errors that can occur when constructing a command.
///
/// Protocol-level outcomes (`OK`/`ERROR` plus payload) are data, not
/// errors; see [`AtResponse`](crate::AtResponse). These variants cover
/// only commands that could never be framed correctly on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Verb contains characters that would corrupt command framing.
    #[error("invalid verb: {0:?}")]
    InvalidVerb(String),

    /// Text argument contains a line break.
    #[error("invalid argument: {0:?}")]
    InvalidArgument(String),
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
