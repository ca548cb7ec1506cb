//! Error types for engine sessions.

use std::io;
use std::path::PathBuf;

use uci_options::{OptionError, ResolveError};

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownOption,
    TypeMismatch,
    OutOfRange,
    TransportFailure,
    InternalConsistency,
    InvalidSetting,
    Startup,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// A requested value was rejected before anything was sent
    #[error(transparent)]
    Option(#[from] OptionError),

    /// Writing to or reading from the engine failed
    #[error("engine transport failed: {0}")]
    Transport(#[source] io::Error),

    /// Cached state is not usable for the requested change
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),

    /// A session setting outside its allowed range
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("failed to spawn engine at {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The engine did not complete the `uci` / `uciok` exchange
    #[error("engine handshake failed: {0}")]
    Handshake(String),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Option(OptionError::UnknownOption { .. }) => ErrorKind::UnknownOption,
            SessionError::Option(OptionError::TypeMismatch { .. } | OptionError::Parse { .. }) => {
                ErrorKind::TypeMismatch
            }
            SessionError::Option(OptionError::OutOfRange { .. }) => ErrorKind::OutOfRange,
            SessionError::Transport(_) => ErrorKind::TransportFailure,
            SessionError::InternalConsistency(_) => ErrorKind::InternalConsistency,
            SessionError::InvalidSetting(_) => ErrorKind::InvalidSetting,
            SessionError::Spawn { .. } | SessionError::Handshake(_) => ErrorKind::Startup,
        }
    }
}

impl From<ResolveError> for SessionError {
    fn from(e: ResolveError) -> Self {
        SessionError::InternalConsistency(e.to_string())
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
