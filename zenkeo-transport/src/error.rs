//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Already connected")]
    AlreadyConnected,

    #[error("Connection timeout after {0:?}")]
    ConnectionTimeout(std::time::Duration),

    #[error("Connection refused: {0}")]
    ConnectionRefused(#[source] io::Error),

    #[error("Device unreachable: {0}")]
    Unreachable(#[source] io::Error),

    #[error("Read timeout")]
    ReadTimeout,

    #[error("Connection closed by remote")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl Error {
    /// Check if the failure happened while opening the connection
    pub fn is_connect_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout(_)
                | Self::ConnectionRefused(_)
                | Self::Unreachable(_)
                | Self::InvalidAddress(_)
        )
    }

    pub(crate) fn from_connect(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::ConnectionRefused(err),
            _ => Self::Unreachable(err),
        }
    }
}
