//! Blocking MLLP reader.

use std::io::{self, Read};

use tracing::{debug, warn};

use crate::config::MllpConfig;
use crate::error::{MllpError, MllpResult};
use crate::frame::{decode_frame, Frame, END_BLOCK};

/// Reads MLLP-framed messages from any [`Read`] source.
///
/// Each message is handed out as a `&str` borrowed from the reader's
/// internal buffer, valid until the next read. Framing errors are reported
/// as they are found and never skipped over; after any error other than
/// [`MllpError::InvalidUtf8`] the stream position is undefined and the
/// reader should be dropped.
///
/// # Example
///
/// ```rust
/// use fast_hl7::Message;
/// use fast_hl7_mllp::MllpReader;
///
/// let stream: &[u8] = b"\x0bMSH|^~\\&|App|Fac|||20231010||ADT^A01|MSG001|P|2.5\x1c\x0d";
/// let mut reader = MllpReader::new(stream);
///
/// let text = reader.read_message().unwrap().unwrap();
/// let message = Message::parse(text).unwrap();
/// assert_eq!(message.query("MSH.10").unwrap(), "MSG001");
///
/// assert!(reader.read_message().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct MllpReader<R> {
    inner: R,
    config: MllpConfig,
    buffer: Vec<u8>,
    // bytes of the last returned frame, dropped on the next read
    consumed: usize,
}

impl<R: Read> MllpReader<R> {
    /// Creates a reader with the default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, MllpConfig::default())
    }

    /// Creates a reader with a custom configuration.
    pub fn with_config(inner: R, config: MllpConfig) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(config.read_chunk_size),
            config,
            consumed: 0,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MllpConfig {
        &self.config
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consumes the reader, returning the underlying source. Buffered bytes
    /// that were not yet returned as a message are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads the next message.
    ///
    /// Returns `Ok(None)` when the source ends cleanly between frames.
    ///
    /// # Errors
    ///
    /// - [`MllpError::MissingStartBlock`] / [`MllpError::MissingTrailer`] for
    ///   framing violations
    /// - [`MllpError::UnexpectedEof`] if the source ends inside a frame
    /// - [`MllpError::FrameTooLarge`] if the body exceeds `max_frame_size`
    /// - [`MllpError::InvalidUtf8`] if the body is not UTF-8; that frame is
    ///   skipped and the next call continues after it
    /// - [`MllpError::Io`] for errors from the source
    pub fn read_message(&mut self) -> MllpResult<Option<&str>> {
        if self.consumed > 0 {
            self.buffer.drain(..self.consumed);
            self.consumed = 0;
        }

        loop {
            let decoded = decode_frame(&self.buffer).map_err(violation)?;
            if let Some(frame) = decoded {
                return self.take_frame(frame).map(Some);
            }

            self.check_partial_size()?;

            if self.fill()? == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(violation(MllpError::UnexpectedEof {
                    buffered: self.buffer.len(),
                }));
            }
        }
    }

    /// Calls `handler` with every message until the source ends, returning
    /// how many messages were read.
    ///
    /// # Errors
    ///
    /// Stops at the first error, as [`read_message`](Self::read_message).
    pub fn read_messages<F>(&mut self, mut handler: F) -> MllpResult<usize>
    where
        F: FnMut(&str),
    {
        let mut count = 0;
        while let Some(message) = self.read_message()? {
            handler(message);
            count += 1;
        }
        Ok(count)
    }

    fn take_frame(&mut self, frame: Frame) -> MllpResult<&str> {
        self.consumed = frame.consumed;

        if let Some(limit) = self.config.max_frame_size {
            if frame.body_len() > limit {
                return Err(violation(MllpError::FrameTooLarge {
                    size: frame.body_len(),
                    limit,
                }));
            }
        }

        debug!(bytes = frame.body_len(), "decoded MLLP frame");
        std::str::from_utf8(&self.buffer[frame.body])
            .map_err(|err| violation(MllpError::InvalidUtf8(err)))
    }

    /// Fails early once an unfinished frame has outgrown the limit.
    fn check_partial_size(&self) -> MllpResult<()> {
        let Some(limit) = self.config.max_frame_size else {
            return Ok(());
        };
        // the end block can only be buffered as the last byte, still waiting for its trailer
        let mut size = self.buffer.len().saturating_sub(1);
        if self.buffer.last() == Some(&END_BLOCK) {
            size = size.saturating_sub(1);
        }
        if size > limit {
            return Err(violation(MllpError::FrameTooLarge { size, limit }));
        }
        Ok(())
    }

    fn fill(&mut self) -> MllpResult<usize> {
        let start = self.buffer.len();
        self.buffer.resize(start + self.config.read_chunk_size, 0);

        let result = loop {
            match self.inner.read(&mut self.buffer[start..]) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        let read = match result {
            Ok(read) => read,
            Err(err) => {
                self.buffer.truncate(start);
                return Err(err.into());
            }
        };
        self.buffer.truncate(start + read);
        Ok(read)
    }
}

fn violation(err: MllpError) -> MllpError {
    warn!(error = %err, "MLLP protocol violation");
    err
}
