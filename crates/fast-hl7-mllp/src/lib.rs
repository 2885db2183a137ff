//! # fast-hl7-mllp
//!
//! Minimal Lower Layer Protocol (MLLP) framing for HL7 v2 message streams.
//!
//! MLLP wraps each message in a start block (VT, `0x0B`) and an end block
//! (FS, `0x1C`) followed by a carriage return. This crate decodes and
//! encodes those frames over blocking [`std::io`] readers and writers, and
//! hands message bodies to [`fast_hl7::Message`] without copying them.
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_hl7::Message;
//! use fast_hl7_mllp::{MllpReader, MllpWriter};
//!
//! let mut writer = MllpWriter::new(Vec::new());
//! writer.send("MSH|^~\\&|LAB|HOSP|||20231010||ORU^R01|MSG001|P|2.5").unwrap();
//! writer.send("MSH|^~\\&|LAB|HOSP|||20231010||ORU^R01|MSG002|P|2.5").unwrap();
//! let bytes = writer.into_inner();
//!
//! let mut reader = MllpReader::new(bytes.as_slice());
//! let mut ids = Vec::new();
//! reader
//!     .read_messages(|text| {
//!         if let Ok(message) = Message::parse(text) {
//!             ids.push(message.query("MSH.10").unwrap_or_default().to_string());
//!         }
//!     })
//!     .unwrap();
//! assert_eq!(ids, ["MSG001", "MSG002"]);
//! ```
//!
//! ## With Configuration
//!
//! ```rust
//! use fast_hl7_mllp::{MllpConfig, MllpReader};
//!
//! let config = MllpConfig::builder()
//!     .with_max_frame_size(64 * 1024)
//!     .with_read_chunk_size(8 * 1024)
//!     .build();
//!
//! let reader = MllpReader::with_config(std::io::empty(), config);
//! assert_eq!(reader.config().max_frame_size, Some(64 * 1024));
//! ```
//!
//! ## Protocol Violations
//!
//! | Condition | Error |
//! |-----------|-------|
//! | Frame does not start with VT | [`MllpError::MissingStartBlock`] |
//! | FS not followed by CR | [`MllpError::MissingTrailer`] |
//! | Stream ends inside a frame | [`MllpError::UnexpectedEof`] |
//! | Body over `max_frame_size` | [`MllpError::FrameTooLarge`] |
//! | Body not UTF-8 | [`MllpError::InvalidUtf8`] |
//!
//! Violations are logged at `warn` level and returned; the reader never
//! tries to resynchronise on the next start block.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod frame;
mod reader;
mod writer;

// Public re-exports
pub use config::{MllpConfig, MllpConfigBuilder, DEFAULT_READ_CHUNK_SIZE};
pub use error::{MllpError, MllpResult};
pub use frame::{decode_frame, encode_frame, Frame, END_BLOCK, FRAME_OVERHEAD, START_BLOCK, TRAILER};
pub use reader::MllpReader;
pub use writer::MllpWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<MllpConfig> = None;
        let _: Option<Frame> = None;
        let _: Option<MllpResult<()>> = None;
        let _: Option<MllpReader<&[u8]>> = None;
        let _: Option<MllpWriter<Vec<u8>>> = None;
    }

    #[test]
    fn test_frame_bytes() {
        assert_eq!(START_BLOCK, 0x0B);
        assert_eq!(END_BLOCK, 0x1C);
        assert_eq!(TRAILER, b'\r');
    }
}
