//! Blocking MLLP writer.

use std::io::Write;

use fast_hl7::Message;
use tracing::debug;

use crate::error::MllpResult;
use crate::frame::encode_frame;

/// Writes MLLP-framed messages to any [`Write`] sink.
///
/// Every message is written as one frame and the sink is flushed straight
/// after, so a peer waiting for the frame is never left behind a buffer.
///
/// # Example
///
/// ```rust
/// use fast_hl7_mllp::MllpWriter;
///
/// let mut writer = MllpWriter::new(Vec::new());
/// writer.send("MSH|^~\\&|App").unwrap();
/// assert_eq!(writer.into_inner(), b"\x0bMSH|^~\\&|App\x1c\x0d");
/// ```
#[derive(Debug)]
pub struct MllpWriter<W: Write> {
    inner: W,
    frame: Vec<u8>,
}

impl<W: Write> MllpWriter<W> {
    /// Creates a writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            frame: Vec::new(),
        }
    }

    /// Frames, writes and flushes one message.
    ///
    /// # Errors
    ///
    /// Returns [`MllpError::Io`](crate::MllpError::Io) if writing or flushing
    /// fails.
    pub fn send(&mut self, message: &str) -> MllpResult<()> {
        self.frame.clear();
        encode_frame(message, &mut self.frame);
        self.inner.write_all(&self.frame)?;
        self.inner.flush()?;
        debug!(bytes = message.len(), "sent MLLP frame");
        Ok(())
    }

    /// Sends the full text of a parsed message.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub fn send_message(&mut self, message: &Message<'_>) -> MllpResult<()> {
        self.send(message.text())
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
