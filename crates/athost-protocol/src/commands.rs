//! Command construction and serialization.
//!
//! A command is a verb plus an ordered list of positional arguments. The
//! wire form is `<prefix>[+<verb>][=arg1,arg2,...]` followed by the line
//! terminator; prefix and terminator belong to the engine configuration
//! and are passed in at serialization time so that independent transports
//! can carry different dialects in one process.

use std::fmt;

use crate::error::{ProtocolError, ProtocolResult};

/// A single positional command argument.
///
/// `Absent` marks "no value supplied" for a trailing optional argument;
/// a trailing run of `Absent` values is removed before serialization. An
/// interior `Absent` serializes as an empty field between commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtValue {
    /// Signed integer argument.
    Int(i64),
    /// Unsigned integer argument.
    Uint(u64),
    /// Raw text argument, emitted without quoting.
    Text(String),
    /// Placeholder for an omitted optional argument.
    Absent,
}

impl fmt::Display for AtValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtValue::Int(v) => write!(f, "{}", v),
            AtValue::Uint(v) => write!(f, "{}", v),
            AtValue::Text(s) => f.write_str(s),
            AtValue::Absent => Ok(()),
        }
    }
}

impl From<&str> for AtValue {
    fn from(s: &str) -> Self {
        AtValue::Text(s.to_string())
    }
}

impl From<String> for AtValue {
    fn from(s: String) -> Self {
        AtValue::Text(s)
    }
}

impl From<i64> for AtValue {
    fn from(v: i64) -> Self {
        AtValue::Int(v)
    }
}

impl From<u64> for AtValue {
    fn from(v: u64) -> Self {
        AtValue::Uint(v)
    }
}

impl From<u32> for AtValue {
    fn from(v: u32) -> Self {
        AtValue::Uint(v as u64)
    }
}

impl<T: Into<AtValue>> From<Option<T>> for AtValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => AtValue::Absent,
        }
    }
}

/// A command ready to be serialized and exchanged.
///
/// The verb may be empty: `AtCommand::probe()` is the bare status probe
/// that serializes to just the prefix and terminator and which a live
/// modem answers with a lone `OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommand {
    verb: String,
    args: Vec<AtValue>,
}

impl AtCommand {
    /// Create a command, validating that the verb and text arguments
    /// cannot corrupt the line framing.
    pub fn new(verb: &str, args: Vec<AtValue>) -> ProtocolResult<Self> {
        if verb.contains(['\r', '\n', '=', ',']) {
            return Err(ProtocolError::InvalidVerb(verb.to_string()));
        }
        for arg in &args {
            if let AtValue::Text(text) = arg {
                if text.contains(['\r', '\n']) {
                    return Err(ProtocolError::InvalidArgument(text.clone()));
                }
            }
        }
        Ok(AtCommand {
            verb: verb.to_string(),
            args,
        })
    }

    /// The bare status probe: empty verb, no arguments.
    pub fn probe() -> Self {
        AtCommand {
            verb: String::new(),
            args: Vec::new(),
        }
    }

    /// Get the verb.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Get the arguments as given, before trailing-absent trimming.
    pub fn args(&self) -> &[AtValue] {
        &self.args
    }

    /// The arguments with the trailing run of `Absent` values removed.
    /// Interior `Absent` values are preserved.
    pub fn trimmed_args(&self) -> &[AtValue] {
        let mut end = self.args.len();
        while end > 0 && self.args[end - 1] == AtValue::Absent {
            end -= 1;
        }
        &self.args[..end]
    }

    /// Serialize to the wire form, including the terminator.
    ///
    /// The verb segment is emitted only for a non-empty verb; the `=`
    /// segment only when arguments remain after trimming.
    pub fn serialize(&self, prefix: &str, line_ending: &str) -> String {
        let mut out = String::from(prefix);
        if !self.verb.is_empty() {
            out.push('+');
            out.push_str(&self.verb);
        }
        let args = self.trimmed_args();
        if !args.is_empty() {
            out.push('=');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&arg.to_string());
            }
        }
        out.push_str(line_ending);
        out
    }
}
