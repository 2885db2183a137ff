//! # fast-hl7
//!
//! A zero-copy parser and query engine for HL7 v2 pipe-delimited messages.
//!
//! A message is split into segments (lines), fields, repeats, components and
//! sub-components using the delimiters it declares in its own `MSH` header.
//! Views only record byte ranges into the caller's buffer, so parsing and
//! querying allocate nothing for typical messages. Decoding escape sequences
//! is the one operation that produces new text.
//!
//! ## Usage
//!
//! ```rust
//! use fast_hl7::{escape, Message};
//!
//! let text = "MSH|^~\\&|LAB|HOSP|||20231011121314||ORU^R01|MSG0001|P|2.5\r\
//!             PID|1||123456^^^MRN~987^^^SSN||Doe^John\r\
//!             OBX|1|ST|GLU^Glucose||Obstetrician \\T\\ Gynaecologist";
//!
//! let message = Message::parse(text).unwrap();
//!
//! // Dotted queries: segment[(repeat)].field[(repeat)].component.sub_component
//! assert_eq!(message.query("MSH.9.1").unwrap(), "ORU");
//! assert_eq!(message.query("PID.5.2").unwrap(), "John");
//! assert_eq!(message.query("PID.3(2).4").unwrap(), "SSN");
//!
//! // Or walk the views directly
//! let obx = message.segment_by_name("OBX").unwrap();
//! let field = obx.field(5).unwrap();
//! assert_eq!(field.unescaped(), "Obstetrician & Gynaecologist");
//! assert!(escape::requires_unescaping(field.value(), &message.delimiters()));
//! ```
//!
//! ## Query Syntax
//!
//! | Term | Meaning | Example |
//! |------|---------|---------|
//! | `NAME` | First segment with that name | `PID` |
//! | `NAME(n)` | n-th segment with that name | `OBX(3)` |
//! | `i` | Field `i` (0 is the segment name) | `PID.5` |
//! | `i(n)` | n-th repeat of field `i` | `PID.3(2)` |
//! | `c` | Component `c` (1-based) | `PID.5.2` |
//! | `s` | Sub-component `s` (1-based) | `PID.3.4.2` |
//!
//! A segment that is not present yields an empty result rather than an
//! error. Out-of-range positions within a present segment are errors of
//! kind [`ErrorKind::Index`]; malformed input is [`ErrorKind::Format`].
//!
//! ## Feature Flags
//!
//! - `datetime` (default) - `DT`/`DTM` decoding via `chrono`
//! - `serde` - `Serialize`/`Deserialize` for [`Delimiters`] and [`ErrorKind`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

#[cfg(feature = "datetime")]
pub mod datetime;
mod delimiters;
mod error;
pub mod escape;
mod field;
mod message;
mod query;
mod segment;
pub mod split;

pub use delimiters::{Delimiters, HEADER_SEGMENT};
pub use error::{ErrorKind, Hl7Error, Hl7Result, Level};
pub use field::Field;
pub use message::Message;
pub use segment::Segment;
