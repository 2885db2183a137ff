//! MLLP frame layout.
//!
//! ```text
//! <VT> message bytes <FS><CR>
//! 0x0B               0x1C 0x0D
//! ```
//!
//! Decoding works on whatever has been buffered so far and reports whether
//! a whole frame is present. It never copies the body.

use std::ops::Range;

use memchr::memchr;

use crate::error::{MllpError, MllpResult};

/// Vertical tab, opens a frame.
pub const START_BLOCK: u8 = 0x0B;

/// File separator, closes the frame body.
pub const END_BLOCK: u8 = 0x1C;

/// Carriage return, must follow [`END_BLOCK`].
pub const TRAILER: u8 = 0x0D;

/// Bytes of framing around each body.
pub const FRAME_OVERHEAD: usize = 3;

/// The position of one complete frame at the start of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Byte range of the message body, between the start and end blocks.
    pub body: Range<usize>,
    /// Total bytes the frame occupies, framing included.
    pub consumed: usize,
}

impl Frame {
    /// Length of the message body in bytes.
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Looks for a complete frame at the start of `buffer`.
///
/// Returns `Ok(None)` when more bytes are needed: the buffer is empty, has no
/// end block yet, or ends right after the end block.
///
/// ```rust
/// use fast_hl7_mllp::decode_frame;
///
/// let buffer = b"\x0bMSH|^~\\&|App\x1c\x0d\x0bMSH";
/// let frame = decode_frame(buffer).unwrap().unwrap();
/// assert_eq!(&buffer[frame.body.clone()], b"MSH|^~\\&|App");
/// assert_eq!(frame.consumed, 15);
/// ```
///
/// # Errors
///
/// [`MllpError::MissingStartBlock`] if the first byte is not VT, and
/// [`MllpError::MissingTrailer`] if the end block is followed by anything but
/// CR.
pub fn decode_frame(buffer: &[u8]) -> MllpResult<Option<Frame>> {
    let Some((&first, rest)) = buffer.split_first() else {
        return Ok(None);
    };
    if first != START_BLOCK {
        return Err(MllpError::MissingStartBlock { found: first });
    }

    let Some(end) = memchr(END_BLOCK, rest) else {
        return Ok(None);
    };

    match rest.get(end + 1) {
        None => Ok(None),
        Some(&TRAILER) => Ok(Some(Frame {
            body: 1..1 + end,
            consumed: end + FRAME_OVERHEAD,
        })),
        Some(&found) => Err(MllpError::MissingTrailer { found }),
    }
}

/// Appends `message` to `out` as one frame.
pub fn encode_frame(message: &str, out: &mut Vec<u8>) {
    out.reserve(message.len() + FRAME_OVERHEAD);
    out.push(START_BLOCK);
    out.extend_from_slice(message.as_bytes());
    out.push(END_BLOCK);
    out.push(TRAILER);
}
