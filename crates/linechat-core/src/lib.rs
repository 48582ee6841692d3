//! linechat Core Library
//!
//! Everything the `linechat` binary needs apart from its argument surface:
//! - Target resolution from positional arguments
//! - Client configuration
//! - The relay session: one TCP connection, two concurrent line paths
//! - Common error types and tracing setup

pub mod config;
pub mod error;
pub mod relay;
pub mod target;
pub mod tracing_init;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use relay::{RelaySession, SessionEnd, SessionSummary};
pub use target::Target;
