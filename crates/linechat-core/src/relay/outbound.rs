//! Outbound path: local input lines to the connection.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::input::LineReceiver;
use super::output::SharedOutput;
use crate::error::{Error, Result};

/// Why the outbound path stopped without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundEnd {
    /// Local input reached end-of-stream.
    InputExhausted,
    /// The session shut down while waiting for input or mid-send.
    Cancelled,
}

/// Forwards local lines to the connection's write half.
///
/// Owns the write half for the whole session. Stopping the path does not
/// close the connection; the writer is released only when this value drops.
pub struct Outbound<W, O> {
    writer: W,
    output: SharedOutput<O>,
    lines_sent: u64,
}

impl<W, O> Outbound<W, O>
where
    W: AsyncWrite + Unpin,
    O: AsyncWrite + Unpin,
{
    pub const fn new(writer: W, output: SharedOutput<O>) -> Self {
        Self {
            writer,
            output,
            lines_sent: 0,
        }
    }

    /// Relay lines until input ends, `cancel` fires, or an I/O error occurs.
    ///
    /// Prints the prompt once before the first read. `cancel` is honoured
    /// both while waiting for input and while a send is blocked on a peer
    /// that stopped reading; a line cut off that way is not counted.
    pub async fn run(
        &mut self,
        lines: &mut LineReceiver,
        cancel: &CancellationToken,
    ) -> Result<OutboundEnd> {
        self.output.prompt().await.map_err(Error::LocalIo)?;

        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(OutboundEnd::Cancelled),
                next = lines.recv() => next,
            };

            let line = match next {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(Error::LocalIo(e)),
                None => {
                    debug!(lines_sent = self.lines_sent, "Local input exhausted");
                    return Ok(OutboundEnd::InputExhausted);
                }
            };

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(len = line.len(), "Send interrupted by shutdown");
                    return Ok(OutboundEnd::Cancelled);
                }
                sent = Self::send_line(&mut self.writer, &line) => sent?,
            }
            self.lines_sent += 1;
            trace!(len = line.len(), "Line sent");
        }
    }

    async fn send_line(writer: &mut W, line: &[u8]) -> Result<()> {
        writer.write_all(line).await.map_err(Error::LocalIo)?;
        writer.write_all(b"\n").await.map_err(Error::LocalIo)?;
        writer.flush().await.map_err(Error::LocalIo)
    }

    pub const fn lines_sent(&self) -> u64 {
        self.lines_sent
    }

    /// Give back the write half.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
