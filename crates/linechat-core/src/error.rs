//! Error types for the linechat core library.

use std::time::Duration;

use thiserror::Error;

use crate::target::Target;

/// Result type alias using linechat Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for linechat operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed command-line input (e.g. a non-numeric port)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resolving or connecting to the remote endpoint failed
    #[error("Failed to connect to {target}: {source}")]
    Connection {
        target: Target,
        #[source]
        source: std::io::Error,
    },

    /// Reading local input or writing outbound data failed
    #[error("Local I/O error: {0}")]
    LocalIo(#[source] std::io::Error),

    /// Reading from the remote endpoint failed
    #[error("Remote I/O error: {0}")]
    RemoteIo(#[source] std::io::Error),

    /// No line arrived from the peer within the configured window
    #[error("No data from peer within {0:?}")]
    ReadTimeout(Duration),
}

impl Error {
    /// Whether this error ends the whole process rather than a single path.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Connection { .. } | Self::ReadTimeout(_)
        )
    }
}
