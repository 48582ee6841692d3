//! Inbound path: connection lines to local output.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tracing::{debug, trace};

use super::output::SharedOutput;
use super::session::SessionEnd;
use crate::error::{Error, Result};

/// Reads newline-delimited text from the peer and echoes it locally.
pub struct Inbound<R, O> {
    reader: BufReader<R>,
    output: SharedOutput<O>,
    read_timeout: Option<Duration>,
    lines_received: u64,
}

impl<R, O> Inbound<R, O>
where
    R: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
{
    pub fn new(reader: R, output: SharedOutput<O>, read_timeout: Option<Duration>) -> Self {
        Self {
            reader: BufReader::new(reader),
            output,
            read_timeout,
            lines_received: 0,
        }
    }

    /// Relay lines until the peer closes.
    ///
    /// A read error counts as the peer closing. Only an elapsed read timeout or
    /// a failure to write local output is returned as an error.
    pub async fn run(&mut self) -> Result<SessionEnd> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.read_line(&mut buf).await? {
                Ok(0) => {
                    debug!(lines_received = self.lines_received, "Peer closed connection");
                    return Ok(SessionEnd::PeerClosed);
                }
                Ok(_) => {
                    let line = decode_line(&buf);
                    self.output
                        .line_then_prompt(&line)
                        .await
                        .map_err(Error::LocalIo)?;
                    self.lines_received += 1;
                    trace!(len = line.len(), "Line received");
                }
                Err(e) => {
                    debug!(error = %Error::RemoteIo(e), "Treating read error as close");
                    return Ok(SessionEnd::RemoteError);
                }
            }
        }
    }

    /// One raw line including its terminator, bounded by the read timeout.
    async fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<std::io::Result<usize>> {
        let read = self.reader.read_until(b'\n', buf);
        match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .map_err(|_| Error::ReadTimeout(limit)),
            None => Ok(read.await),
        }
    }

    pub const fn lines_received(&self) -> u64 {
        self.lines_received
    }
}

/// Strip `\n` or `\r\n` and decode, replacing invalid UTF-8.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
