//! Blocking local input reader.
//!
//! Stdin reads run on a dedicated OS thread. A blocking read cannot be
//! cancelled, so the thread is never joined; it exits on end-of-stream, on a
//! read error, or on the first line after the receiver is dropped.

use std::io::{self, BufRead, BufReader, Read};

use tokio::sync::mpsc;
use tracing::debug;

/// Lines buffered between the reader thread and the outbound path.
pub const LINE_CHANNEL_CAPACITY: usize = 64;

/// Raw local lines with `\n` or `\r\n` stripped. Closes at end-of-stream.
///
/// Bytes are passed through untouched; input need not be valid UTF-8.
pub type LineReceiver = mpsc::Receiver<io::Result<Vec<u8>>>;

/// Spawn a thread that reads `source` line by line into a channel.
pub fn spawn_line_reader<R>(source: R) -> io::Result<LineReceiver>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
    std::thread::Builder::new()
        .name("linechat-input".into())
        .spawn(move || {
            let mut reader = BufReader::new(source);
            loop {
                let mut buf = Vec::new();
                let next = match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => Ok(strip_terminator(buf)),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => Err(e),
                };
                let failed = next.is_err();
                if tx.blocking_send(next).is_err() {
                    debug!("Outbound path gone, input reader stopping");
                    return;
                }
                if failed {
                    return;
                }
            }
            debug!("Local input reached end-of-stream");
        })?;
    Ok(rx)
}

fn strip_terminator(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    line
}
