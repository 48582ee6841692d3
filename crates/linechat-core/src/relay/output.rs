//! Local output sink shared by both relay paths.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{Mutex, MutexGuard};

use super::PROMPT;

/// Serializes writes to local output at line granularity.
///
/// Each write holds the lock for one full line (or prompt) and flushes before
/// releasing it, so the two paths never interleave partial lines.
pub struct SharedOutput<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> Clone for SharedOutput<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O> SharedOutput<O> {
    pub fn new(sink: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Direct access to the sink.
    pub async fn lock(&self) -> MutexGuard<'_, O> {
        self.inner.lock().await
    }
}

impl<O: AsyncWrite + Unpin> SharedOutput<O> {
    /// Print the prompt marker without a trailing newline.
    pub async fn prompt(&self) -> io::Result<()> {
        let mut sink = self.inner.lock().await;
        sink.write_all(PROMPT.as_bytes()).await?;
        sink.flush().await
    }

    /// Print a received line followed by a fresh prompt.
    pub async fn line_then_prompt(&self, line: &str) -> io::Result<()> {
        let mut sink = self.inner.lock().await;
        sink.write_all(line.as_bytes()).await?;
        sink.write_all(b"\n").await?;
        sink.write_all(PROMPT.as_bytes()).await?;
        sink.flush().await
    }
}
