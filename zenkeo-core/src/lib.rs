//! # zenkeo-core
//!
//! Core protocol implementation for Atlantic Zenkeo air conditioners.
//!
//! This crate provides the low-level protocol primitives:
//! - Envelope structure and encoding
//! - Set-state checksum
//! - Command catalog
//! - State response parser
//! - Session state and sequence numbers

pub mod checksum;
pub mod command;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod mac;
pub mod parser;
pub mod session;

pub use command::Command;
pub use constants::DEFAULT_PORT;
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use error::{Error, ParseError, Result};
pub use frame::Envelope;
pub use mac::MacAddress;
pub use session::{Session, SessionState};
