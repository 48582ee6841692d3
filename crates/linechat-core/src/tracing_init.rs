//! Diagnostics setup for the linechat binary.
//!
//! Chat traffic owns stdout, so every log line is written to stderr. Quiet by
//! default: a user piping a conversation should only see warnings.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "linechat=warn";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_filter` (e.g. `RUST_LOG=linechat_core=debug`
/// to watch both relay paths start and stop). With `log_json` each event is
/// one JSON object per line on stderr.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    let registry = tracing_subscriber::registry().with(env_filter);

    if log_json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }
}
