//! Line-delimited JSON framing.
//!
//! Each JSON-RPC message is a single line terminated by `\n`. Blank
//! lines between messages are skipped. Generic over the reader and
//! writer so tests can drive it with in-memory buffers.

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::error::TransportError;

/// One-message-per-line reader/writer pair.
pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
    buf: String,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            buf: String::new(),
        }
    }

    /// Returns the next non-blank line, trimmed, or `None` at EOF.
    pub async fn next_message(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .await
                .map_err(|e| TransportError::Read(e.to_string()))?;
            if read == 0 {
                return Ok(None);
            }
            let line = self.buf.trim();
            if !line.is_empty() {
                trace!(len = line.len(), "read message");
                return Ok(Some(line.to_string()));
            }
        }
    }

    /// Serializes `message` onto one line and flushes it.
    pub async fn send<T: Serialize>(&mut self, message: &T) -> Result<(), TransportError> {
        let mut line =
            serde_json::to_vec(message).map_err(|e| TransportError::Encode(e.to_string()))?;
        line.push(b'\n');
        trace!(len = line.len(), "writing message");

        self.writer
            .write_all(&line)
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn skips_blank_lines_and_trims() {
        let input: &[u8] = b"\n  \r\n  {\"a\":1}  \n\n{\"b\":2}\n";
        let mut t = LineTransport::new(input, Vec::new());
        assert_eq!(t.next_message().await.expect("r1").as_deref(), Some("{\"a\":1}"));
        assert_eq!(t.next_message().await.expect("r2").as_deref(), Some("{\"b\":2}"));
        assert_eq!(t.next_message().await.expect("r3"), None);
    }

    #[tokio::test]
    async fn last_line_without_newline_is_read() {
        let input: &[u8] = b"{\"id\":1}";
        let mut t = LineTransport::new(input, Vec::new());
        assert_eq!(t.next_message().await.expect("read").as_deref(), Some("{\"id\":1}"));
    }

    #[tokio::test]
    async fn send_writes_one_compact_line() {
        let input: &[u8] = b"";
        let mut t = LineTransport::new(input, Vec::new());
        t.send(&json!({"ok": true, "nested": {"x": [1, 2]}}))
            .await
            .expect("send");
        let out = String::from_utf8(t.into_writer()).expect("utf8");
        assert_eq!(out, "{\"nested\":{\"x\":[1,2]},\"ok\":true}\n");
    }
}
