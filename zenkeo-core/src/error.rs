//! Error types for zenkeo-core

/// Result type alias for zenkeo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// MAC string is not 12 hex digits once separators are stripped
    #[error("Invalid MAC address: {0}")]
    InvalidMac(String),

    /// Target temperature cannot be encoded in one nibble
    #[error("Target temperature out of range: {0}")]
    TemperatureOutOfRange(#[source] zenkeo_types::Error),

    /// Payload too large
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Frame is too short to hold an envelope
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// Frame does not start with the envelope magic
    #[error("Bad envelope magic: {0:02X?}")]
    BadMagic([u8; 8]),

    /// Invalid session state
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),

    /// State response could not be decoded
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Errors raised while building or checking frames, before any I/O
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMac(_)
                | Self::TemperatureOutOfRange(_)
                | Self::PayloadTooLarge { .. }
                | Self::FrameTooShort { .. }
                | Self::BadMagic(_)
        )
    }
}

/// State response decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("State marker FF FF 22 00 not found")]
    MarkerNotFound,

    #[error("Truncated state: need {needed} bytes after marker, got {available}")]
    Truncated {
        needed: usize,
        available: usize,
    },

    #[error("Invalid {field} code: {value}")]
    InvalidEnum {
        field: &'static str,
        value: u16,
    },
}

impl From<zenkeo_types::Error> for ParseError {
    fn from(err: zenkeo_types::Error) -> Self {
        match err {
            zenkeo_types::Error::UnknownCode { field, value }
            | zenkeo_types::Error::OutOfRange { field, value, .. } => {
                Self::InvalidEnum { field, value }
            }
        }
    }
}
