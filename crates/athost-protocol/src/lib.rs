//! AT Command Protocol
//!
//! This crate provides types and utilities for speaking the line-based AT
//! command protocol used by ESP-AT style serial modems. The protocol has no
//! length prefixes or checksums; the only framing is the line break, and a
//! command exchange ends when the device emits a terminal status token.
//!
//! # Protocol Overview
//!
//! - **Commands** (host → modem): `AT[+VERB][=arg1,arg2,...]` terminated
//!   with `\r\n`
//! - **Terminal tokens** (modem → host): the exact lines `OK` or `ERROR`
//! - **Error code lines**: `ERR CODE:` followed by a hexadecimal code
//! - **Payload lines**: any other non-empty line, kept verbatim
//!
//! # Example
//!
//! ```rust,ignore
//! use athost_protocol::{AtCommand, AtValue, ResponseClassifier};
//!
//! // Build a command
//! let cmd = AtCommand::new("PING", vec![AtValue::from("192.168.4.1")])?;
//! let wire = cmd.serialize("AT", "\r\n");
//!
//! // Classify response lines until the terminal token
//! let mut classifier = ResponseClassifier::new();
//! assert!(classifier.push("+42").is_none());
//! let response = classifier.push("OK").unwrap();
//! ```

mod codec;
mod commands;
mod error;
mod responses;

pub use codec::*;
pub use commands::*;
pub use error::*;
pub use responses::*;
