//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] zenkeo_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] zenkeo_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] zenkeo_types::Error),
}

impl Error {
    /// The unit could not be reached at all
    pub fn is_connect_error(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect_error())
    }

    /// Bad input or configuration; retrying cannot help
    pub fn is_protocol_violation(&self) -> bool {
        match self {
            Self::Core(e) => e.is_protocol_violation(),
            Self::Types(_) => true,
            Self::Transport(_) => false,
        }
    }
}
