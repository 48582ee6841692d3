//! Relay session lifecycle: connect, run both paths, shut down.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::inbound::Inbound;
use super::input::LineReceiver;
use super::outbound::{Outbound, OutboundEnd};
use super::output::SharedOutput;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// How the inbound path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The peer closed its side of the connection.
    PeerClosed,
    /// A read error surfaced and was treated as a close.
    RemoteError,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines_sent: u64,
    pub lines_received: u64,
    pub end: SessionEnd,
}

/// One connection to one peer, relayed in both directions.
pub struct RelaySession {
    config: ClientConfig,
}

impl RelaySession {
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open the connection. A single attempt; no retry.
    pub async fn connect(&self) -> Result<TcpStream> {
        let target = &self.config.target;
        let stream = TcpStream::connect((target.host.as_str(), target.port))
            .await
            .map_err(|source| Error::Connection {
                target: target.clone(),
                source,
            })?;
        if self.config.nodelay {
            if let Err(e) = stream.set_nodelay(true) {
                warn!(?e, "Failed to set TCP_NODELAY");
            }
        }
        info!(target = %target, "Connected");
        Ok(stream)
    }

    /// Connect, then relay until the peer closes.
    pub async fn run<O>(
        &self,
        input: LineReceiver,
        output: SharedOutput<O>,
    ) -> Result<SessionSummary>
    where
        O: AsyncWrite + Unpin + Send + 'static,
    {
        let stream = self.connect().await?;
        let (reader, writer) = stream.into_split();
        self.relay(reader, writer, input, output).await
    }

    /// Relay over an already established duplex stream.
    ///
    /// The outbound path runs on a spawned task; the inbound path runs here
    /// and decides when the session ends. On return both halves of the
    /// connection have been dropped and the outbound task has finished.
    pub async fn relay<R, W, O>(
        &self,
        reader: R,
        writer: W,
        mut input: LineReceiver,
        output: SharedOutput<O>,
    ) -> Result<SessionSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
        O: AsyncWrite + Unpin + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let outbound_cancel = cancel.clone();
        let mut outbound = Outbound::new(writer, output.clone());
        let outbound_task = tokio::spawn(async move {
            let result = outbound.run(&mut input, &outbound_cancel).await;
            match &result {
                Ok(OutboundEnd::InputExhausted) => debug!("Outbound path finished"),
                Ok(OutboundEnd::Cancelled) => debug!("Outbound path cancelled"),
                Err(e) => warn!(error = %e, "Outbound path stopped"),
            }
            outbound
        });

        let mut inbound = Inbound::new(reader, output, self.config.read_timeout);
        let inbound_result = inbound.run().await;
        let lines_received = inbound.lines_received();
        drop(inbound);

        cancel.cancel();
        let lines_sent = match outbound_task.await {
            Ok(outbound) => outbound.lines_sent(),
            Err(e) => {
                error!(?e, "Outbound task failed");
                0
            }
        };

        let summary = SessionSummary {
            lines_sent,
            lines_received,
            end: inbound_result?,
        };
        info!(?summary, "Session ended");
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::time::Duration;

    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn peer_close_ends_session_while_input_open() {
        let (peer, local) = tokio::io::duplex(256);
        let (local_read, local_write) = tokio::io::split(local);
        let (_input_tx, input_rx) = mpsc::channel::<io::Result<Vec<u8>>>(4);
        let output = SharedOutput::new(Vec::new());

        let (_peer_read, mut peer_write) = tokio::io::split(peer);
        peer_write.write_all(b"welcome\n").await.unwrap();
        peer_write.shutdown().await.unwrap();

        let session = RelaySession::new(ClientConfig::default());
        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            session.relay(local_read, local_write, input_rx, output.clone()),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(summary.end, SessionEnd::PeerClosed);
        assert_eq!(summary.lines_received, 1);
        assert_eq!(summary.lines_sent, 0);
        let printed = String::from_utf8(output.lock().await.clone()).unwrap();
        assert!(printed.contains("welcome\n>"));
    }

    #[tokio::test]
    async fn peer_close_ends_session_while_send_is_blocked() {
        let (peer, local) = tokio::io::duplex(16);
        let (local_read, local_write) = tokio::io::split(local);
        let (input_tx, input_rx) = mpsc::channel::<io::Result<Vec<u8>>>(4);
        input_tx.send(Ok(vec![b'x'; 1024])).await.unwrap();

        // Peer never reads; it hangs up once the client's send has stalled.
        let (peer_read, mut peer_write) = tokio::io::split(peer);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            peer_write.shutdown().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(peer_read);
        });

        let session = RelaySession::new(ClientConfig::default());
        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            session.relay(local_read, local_write, input_rx, SharedOutput::new(Vec::new())),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(summary.end, SessionEnd::PeerClosed);
        assert_eq!(summary.lines_sent, 0);
        drop(input_tx);
    }

    #[tokio::test]
    async fn input_eof_keeps_inbound_running() {
        let (peer, local) = tokio::io::duplex(256);
        let (local_read, local_write) = tokio::io::split(local);
        let (peer_read, mut peer_write) = tokio::io::split(peer);
        let (input_tx, input_rx) = mpsc::channel::<io::Result<Vec<u8>>>(4);
        let output = SharedOutput::new(Vec::new());

        input_tx.send(Ok("only line".into())).await.unwrap();
        drop(input_tx);

        let peer_task = tokio::spawn(async move {
            let mut lines = BufReader::new(peer_read).lines();
            let got = lines.next_line().await.unwrap().unwrap();
            // Input is exhausted by now; the peer keeps talking.
            peer_write.write_all(b"still here\n").await.unwrap();
            peer_write.write_all(b"bye\n").await.unwrap();
            peer_write.shutdown().await.unwrap();
            got
        });

        let session = RelaySession::new(ClientConfig::default());
        let summary = session
            .relay(local_read, local_write, input_rx, output.clone())
            .await
            .unwrap();

        assert_eq!(peer_task.await.unwrap(), "only line");
        assert_eq!(summary.lines_sent, 1);
        assert_eq!(summary.lines_received, 2);
        let printed = String::from_utf8(output.lock().await.clone()).unwrap();
        assert!(printed.ends_with("still here\n>bye\n>"));
    }

    #[tokio::test]
    async fn outbound_failure_does_not_end_session() {
        let (peer, local) = tokio::io::duplex(256);
        let (local_read, local_write) = tokio::io::split(local);
        let (_peer_read, mut peer_write) = tokio::io::split(peer);
        let (input_tx, input_rx) = mpsc::channel::<io::Result<Vec<u8>>>(4);
        let output = SharedOutput::new(Vec::new());

        input_tx
            .send(Err(io::Error::from(io::ErrorKind::InvalidData)))
            .await
            .unwrap();

        let peer_task = tokio::spawn(async move {
            tokio::task::yield_now().await;
            peer_write.write_all(b"after failure\n").await.unwrap();
            peer_write.shutdown().await.unwrap();
        });

        let session = RelaySession::new(ClientConfig::default());
        let summary = session
            .relay(local_read, local_write, input_rx, output.clone())
            .await
            .unwrap();
        peer_task.await.unwrap();

        assert_eq!(summary.end, SessionEnd::PeerClosed);
        assert_eq!(summary.lines_sent, 0);
        assert_eq!(summary.lines_received, 1);
        drop(input_tx);
    }

    #[tokio::test]
    async fn connect_refused_is_connection_error() {
        // Bind then drop to find a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let session = RelaySession::new(ClientConfig::new(crate::Target::new("127.0.0.1", port)));
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, Error::Connection { ref target, .. } if target.port == port));
    }
}
