//! Client configuration.
//!
//! Resolved once at startup from the command line and environment; nothing is
//! read from or written to disk.

use std::time::Duration;

use crate::target::Target;

/// Settings for one relay session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote endpoint to connect to.
    pub target: Target,
    /// Maximum wait for a line from the peer. `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
    /// Disable Nagle's algorithm so each line leaves immediately.
    pub nodelay: bool,
}

impl ClientConfig {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Set the inbound read timeout from whole seconds. Zero disables it.
    #[must_use]
    pub fn with_read_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.read_timeout = secs.filter(|s| *s > 0).map(Duration::from_secs);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            read_timeout: None,
            nodelay: true,
        }
    }
}
