//! MLLP framing round trips through the core parser.

use std::io::{self, Read};

use fast_hl7::Message;
use fast_hl7_mllp::{MllpConfig, MllpError, MllpReader, MllpWriter};
use pretty_assertions::assert_eq;

const ADT: &str = "MSH|^~\\&|SendingApp|SendingFac|ReceivingApp|ReceivingFac|202310101010||ADT^A01|MSG00001|P|2.3\r\
EVN|A01|202310101010\r\
PID|1||123456^^^MRN||Doe^John||19800101|M";

const ORU: &str = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20231011121314||ORU^R01|MSG00002|P|2.5\r\
PID|1||654321^^^MRN||Smith^Jane\r\
OBX|1|NM|GLU^Glucose||5.4|mmol/L\r\
OBX|2|ST|NOTE^Note||Caf\\XC3A9\\ visit";

/// Returns one byte per read call.
struct OneByte<'a>(&'a [u8]);

impl Read for OneByte<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&byte, rest)), Some(slot)) => {
                *slot = byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

fn framed(messages: &[&str]) -> Vec<u8> {
    let mut writer = MllpWriter::new(Vec::new());
    for message in messages {
        writer.send(message).unwrap();
    }
    writer.into_inner()
}

#[test]
fn test_round_trip_through_parser() {
    let bytes = framed(&[ADT, ORU]);
    let mut reader = MllpReader::new(bytes.as_slice());

    let text = reader.read_message().unwrap().unwrap();
    assert_eq!(text, ADT);
    let message = Message::parse(text).unwrap();
    assert_eq!(message.query("MSH.10").unwrap(), "MSG00001");
    assert_eq!(message.query("PID.5.2").unwrap(), "John");

    let text = reader.read_message().unwrap().unwrap();
    let message = Message::parse(text).unwrap();
    assert_eq!(message.query("MSH.9.1").unwrap(), "ORU");
    assert_eq!(message.query("OBX(2).5").unwrap(), "Caf\\XC3A9\\ visit");
    let note = message.segment_by_name("OBX(2)").unwrap().field(5).unwrap();
    assert_eq!(note.unescaped(), "Café visit");

    assert!(reader.read_message().unwrap().is_none());
}

#[test]
fn test_one_byte_at_a_time() {
    let bytes = framed(&[ADT, ORU, ADT]);
    let config = MllpConfig::builder().with_read_chunk_size(1).build();
    let mut reader = MllpReader::with_config(OneByte(&bytes), config);

    let mut control_ids = Vec::new();
    let count = reader
        .read_messages(|text| {
            let message = Message::parse(text).unwrap();
            control_ids.push(message.query("MSH.10").unwrap().to_string());
        })
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(control_ids, ["MSG00001", "MSG00002", "MSG00001"]);
}

#[test]
fn test_truncated_stream() {
    let mut bytes = framed(&[ADT, ORU]);
    bytes.truncate(bytes.len() - 10);
    let mut reader = MllpReader::new(bytes.as_slice());

    assert_eq!(reader.read_message().unwrap(), Some(ADT));
    let err = reader.read_message().unwrap_err();
    assert!(err.is_protocol_violation());
    assert!(matches!(err, MllpError::UnexpectedEof { .. }));
}

#[test]
fn test_garbage_between_frames() {
    let mut bytes = framed(&[ADT]);
    bytes.extend_from_slice(b"\r\n");
    bytes.extend_from_slice(&framed(&[ORU]));
    let mut reader = MllpReader::new(bytes.as_slice());

    assert_eq!(reader.read_message().unwrap(), Some(ADT));
    assert!(matches!(
        reader.read_message().unwrap_err(),
        MllpError::MissingStartBlock { found: b'\r' }
    ));
}

#[test]
fn test_bad_trailer() {
    let mut bytes = framed(&[ADT]);
    let last = bytes.len() - 1;
    bytes[last] = b'\n';
    let mut reader = MllpReader::new(bytes.as_slice());

    assert!(matches!(
        reader.read_message().unwrap_err(),
        MllpError::MissingTrailer { found: b'\n' }
    ));
}

#[test]
fn test_frame_size_limit() {
    let bytes = framed(&[ADT, ORU]);
    let config = MllpConfig::builder().with_max_frame_size(ADT.len()).build();
    let mut reader = MllpReader::with_config(bytes.as_slice(), config);

    assert_eq!(reader.read_message().unwrap(), Some(ADT));
    assert!(matches!(
        reader.read_message().unwrap_err(),
        MllpError::FrameTooLarge { .. }
    ));
}
