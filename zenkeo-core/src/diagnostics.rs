//! Diagnostics sink
//!
//! Components receive a sink at construction instead of logging through a
//! global. [`TracingDiagnostics`] forwards everything to `tracing`.

use tracing::{debug, trace, warn};

use crate::{command::Command, error::ParseError};

/// Receiver for protocol-level events
pub trait Diagnostics: Send + Sync {
    /// A frame is about to be written
    fn frame_sent(&self, command: &Command, sequence: u8, frame: &[u8]) {
        trace!(
            command = command.name(),
            sequence,
            "TX {} bytes: {}",
            frame.len(),
            hex::encode(frame)
        );
    }

    /// Raw bytes came back for `command`
    fn response_received(&self, command: &Command, response: &[u8]) {
        trace!(
            command = command.name(),
            "RX {} bytes: {}",
            response.len(),
            hex::encode(response)
        );
    }

    /// A state-bearing response could not be decoded
    fn parse_failed(&self, error: &ParseError, response: &[u8]) {
        debug!(
            %error,
            "Failed to parse state, full response: {}",
            hex::encode(response)
        );
    }

    /// The session is reopening its socket
    fn reconnecting(&self, remote: &str, reason: &str) {
        warn!(remote, reason, "Reconnecting");
    }
}

/// Sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {}
