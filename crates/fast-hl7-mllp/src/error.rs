//! Error types for MLLP framing.

use std::str::Utf8Error;

use thiserror::Error;

/// Errors that can occur while reading or writing MLLP frames.
#[derive(Error, Debug)]
pub enum MllpError {
    /// A frame did not begin with the VT start block.
    #[error("expected start block 0x0B, found 0x{found:02X}")]
    MissingStartBlock {
        /// The byte found where the start block belongs.
        found: u8,
    },

    /// The FS end block was not followed by a carriage return.
    #[error("expected carriage return after end block, found 0x{found:02X}")]
    MissingTrailer {
        /// The byte found where the trailer belongs.
        found: u8,
    },

    /// The stream ended part way through a frame.
    #[error("stream ended inside a frame ({buffered} bytes buffered)")]
    UnexpectedEof {
        /// Bytes of the incomplete frame that were received.
        buffered: usize,
    },

    /// A frame body exceeded the configured maximum.
    #[error("frame of at least {size} bytes exceeds limit of {limit}")]
    FrameTooLarge {
        /// Body size seen so far.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A frame body was not valid UTF-8.
    #[error("frame body is not valid UTF-8: {0}")]
    InvalidUtf8(#[source] Utf8Error),

    /// Error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MllpError {
    /// True for errors caused by the peer breaking the framing rules, as
    /// opposed to I/O failures.
    pub fn is_protocol_violation(&self) -> bool {
        !matches!(self, MllpError::Io(_))
    }
}

/// Result type for MLLP operations.
pub type MllpResult<T> = std::result::Result<T, MllpError>;
