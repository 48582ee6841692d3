//! Line relay between local stdio and a single TCP peer.
//!
//! A session runs two paths over one connection:
//! - outbound: local input lines → socket (spawned task)
//! - inbound: socket lines → local output (session's own task)
//!
//! The inbound path decides the session's lifetime. When the peer closes,
//! the outbound task is cancelled and joined before the connection is dropped.

mod inbound;
mod input;
mod outbound;
mod output;
mod session;

pub use inbound::Inbound;
pub use input::{LINE_CHANNEL_CAPACITY, LineReceiver, spawn_line_reader};
pub use outbound::{Outbound, OutboundEnd};
pub use output::SharedOutput;
pub use session::{RelaySession, SessionEnd, SessionSummary};

/// Marker printed before local input is expected.
pub const PROMPT: &str = ">";
