//! linechat CLI
//!
//! Connects to one TCP peer, sends each line typed on stdin and prints each
//! line the peer sends. Exits when the peer closes the connection.

use clap::Parser;
use tracing::info;

use linechat_cli::cli::Cli;
use linechat_core::RelaySession;
use linechat_core::relay::{SharedOutput, spawn_line_reader};
use linechat_core::tracing_init::{DEFAULT_FILTER, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(DEFAULT_FILTER, cli.log_json);

    let config = cli.client_config()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        target = %config.target,
        "Starting linechat"
    );

    let session = RelaySession::new(config);
    let (reader, writer) = session.connect().await?.into_split();

    // Stdin is read only once the connection is up.
    let input = spawn_line_reader(std::io::stdin())?;
    let output = SharedOutput::new(tokio::io::stdout());

    session.relay(reader, writer, input, output).await?;
    Ok(())
}
