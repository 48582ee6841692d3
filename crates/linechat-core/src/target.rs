//! Remote endpoint resolution from positional arguments.

use std::fmt;

use crate::error::{Error, Result};

/// Host used when no override is given.
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when no override is given.
pub const DEFAULT_PORT: u16 = 6666;

/// Host and port of the single remote peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve the target from positional arguments.
    ///
    /// Exactly two arguments override host and port. Any other count falls
    /// back to `localhost:6666` without complaint, so a lone stray argument is
    /// ignored. A port that is not a valid integer in `0..=65535` is a
    /// configuration error.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        match args {
            [host, port] => Ok(Self::new(host.as_ref(), parse_port(port.as_ref())?)),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| Error::Configuration(format!("invalid port {raw:?}: {e}")))
}
