//! The command exchange engine.
//!
//! One exchange is one command write followed by a blocking read of
//! response lines until the modem emits a terminal token. The engine
//! owns its transport for its whole lifetime, so a second exchange
//! cannot start while one is in flight.

use std::time::{Duration, Instant};

use athost_protocol::{AtCommand, AtResponse, AtValue, ResponseClassifier};
use log::{debug, trace};

use crate::error::DriverResult;
use crate::transport::{Transport, TransportError};

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "AT";

/// Default command line terminator.
pub const DEFAULT_LINE_ENDING: &str = "\r\n";

/// Default upper time bound passed to the latency probe, in
/// milliseconds.
pub const DEFAULT_PING_BOUND_MS: u32 = 250;

const VERB_VERSION: &str = "GMR";
const VERB_PING: &str = "PING";

/// Per-instance engine configuration.
///
/// Prefix and terminator are fields rather than process-wide constants
/// so that independent transports in one process can speak different
/// dialects. Immutable once the engine is constructed.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Command prefix, `AT` for the standard dialect.
    pub prefix: String,
    /// Command line terminator.
    pub line_ending: String,
    /// Wall-clock budget for one whole exchange. Checked between line
    /// reads, so it needs a transport whose reads return periodically
    /// (a serial port with a read timeout); timed-out reads are
    /// retried until the budget runs out, and expiry surfaces as
    /// [`TransportError::DeadlineExceeded`], never as a protocol
    /// result. Without a deadline a timed-out read propagates as-is,
    /// and `None` otherwise means the exchange may block indefinitely.
    pub deadline: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            prefix: DEFAULT_PREFIX.to_string(),
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            deadline: None,
        }
    }
}

/// Blocking command exchange engine over an exclusively-owned
/// transport.
#[derive(Debug)]
pub struct AtEngine<T: Transport> {
    transport: T,
    config: EngineConfig,
}

impl<T: Transport> AtEngine<T> {
    /// Create an engine with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(transport: T, config: EngineConfig) -> Self {
        AtEngine { transport, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consume the engine and return the transport. Abandoning an
    /// engine mid-exchange is the only supported cancellation; protocol
    /// tokens are never injected.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Perform one exchange with an already-constructed command.
    ///
    /// Writes the serialized command in a single transport write, then
    /// reads lines until the classifier consumes a terminal token.
    /// Transport failure aborts the exchange: lines collected so far
    /// are dropped rather than returned as a partial result.
    pub fn exchange(&mut self, cmd: &AtCommand) -> Result<AtResponse, TransportError> {
        let wire = cmd.serialize(&self.config.prefix, &self.config.line_ending);
        debug!("send: {:?}", wire.trim_end_matches(&self.config.line_ending));
        self.transport.write_all(wire.as_bytes())?;

        let started = Instant::now();
        let mut classifier = ResponseClassifier::new();
        loop {
            if let Some(deadline) = self.config.deadline {
                if started.elapsed() >= deadline {
                    return Err(TransportError::DeadlineExceeded);
                }
            }
            let line = match self.transport.read_line() {
                Ok(line) => line,
                // A quiet period inside the budget; the deadline check
                // above decides when to give up.
                Err(TransportError::TimedOut) if self.config.deadline.is_some() => continue,
                Err(err) => return Err(err),
            };
            trace!("recv: {:?}", line);
            if let Some(response) = classifier.push(&line) {
                debug!(
                    "done: {:?} ({} lines, code {:?})",
                    response.status,
                    response.lines.len(),
                    response.error_code
                );
                return Ok(response);
            }
        }
    }

    /// Generic escape hatch: build a command from a verb and arguments
    /// and exchange it.
    pub fn execute(&mut self, verb: &str, args: &[AtValue]) -> DriverResult<AtResponse> {
        let cmd = AtCommand::new(verb, args.to_vec())?;
        Ok(self.exchange(&cmd)?)
    }

    /// Liveness probe: a bare command with no verb, answered by a live
    /// modem with a lone `OK`.
    pub fn is_ready(&mut self) -> Result<bool, TransportError> {
        Ok(self.exchange(&AtCommand::probe())?.is_ok())
    }

    /// Query the firmware version banner. Returns the payload lines in
    /// the order the modem printed them.
    pub fn query_version(&mut self) -> DriverResult<Vec<String>> {
        Ok(self.execute(VERB_VERSION, &[])?.lines)
    }

    /// Reachability probe: ping `dest` with an upper time bound and
    /// return the reported round-trip time in milliseconds, or `None`
    /// when the reply carries no `+<n>` line.
    pub fn probe_latency(&mut self, dest: &str, bound_ms: u32) -> DriverResult<Option<i64>> {
        let response = self.execute(
            VERB_PING,
            &[AtValue::from(dest), AtValue::from(bound_ms)],
        )?;
        Ok(response.first_number())
    }
}
