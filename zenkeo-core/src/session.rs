//! Session management for the Zenkeo protocol
//!
//! A session represents one logical conversation with a unit and tracks:
//! - Connection state
//! - Sequence counter (one per exchange, wraps at 256)

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No socket open
    Unconnected,

    /// Socket open, no exchange in progress
    Connected,

    /// Frame written, response not fully read yet.
    ///
    /// Observed outside an exchange only when a caller abandoned one; the
    /// stream must then be reopened.
    Exchanging,

    /// Last exchange failed; the socket must be reopened
    Faulted,
}

/// Session manager
///
/// Manages connection state and sequence number generation.
/// Thread-safe and can be cloned cheaply (Arc internally).
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Next sequence number to hand out
    sequence: AtomicU8,

    /// Current session state
    state: parking_lot::RwLock<SessionState>,
}

impl Session {
    /// First sequence number of a new session
    pub const INITIAL_SEQUENCE: u8 = 0;

    /// Create a new unconnected session
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                sequence: AtomicU8::new(Self::INITIAL_SEQUENCE),
                state: parking_lot::RwLock::new(SessionState::Unconnected),
            }),
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        *self.inner.state.read()
    }

    /// Check if the session can start an exchange without reconnecting
    pub fn is_ready(&self) -> bool {
        matches!(self.state(), SessionState::Connected)
    }

    /// Record a freshly opened socket
    pub fn connected(&self) {
        *self.inner.state.write() = SessionState::Connected;
    }

    /// Mark the start of an exchange
    pub fn begin_exchange(&self) -> Result<()> {
        let mut state = self.inner.state.write();

        if *state != SessionState::Connected {
            return Err(Error::InvalidSessionState(format!(
                "Cannot start exchange from state: {:?}",
                *state
            )));
        }

        *state = SessionState::Exchanging;
        Ok(())
    }

    /// Mark the response as fully read
    pub fn complete_exchange(&self) -> Result<()> {
        let mut state = self.inner.state.write();

        if *state != SessionState::Exchanging {
            return Err(Error::InvalidSessionState(format!(
                "Cannot complete exchange from state: {:?}",
                *state
            )));
        }

        *state = SessionState::Connected;
        Ok(())
    }

    /// Record an I/O failure
    pub fn fault(&self) {
        *self.inner.state.write() = SessionState::Faulted;
    }

    /// Close session
    ///
    /// The sequence counter survives; only a new session restarts it.
    pub fn close(&self) {
        *self.inner.state.write() = SessionState::Unconnected;
    }

    /// Peek at the next sequence number without consuming it
    pub fn peek_sequence(&self) -> u8 {
        self.inner.sequence.load(Ordering::Acquire)
    }

    /// Get next sequence number
    ///
    /// Wraps around after 255.
    pub fn next_sequence(&self) -> u8 {
        // fetch_add on AtomicU8 wraps on overflow
        self.inner.sequence.fetch_add(1, Ordering::AcqRel)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
