//! End-to-end parsing and query tests against realistic messages.

use fast_hl7::{Delimiters, ErrorKind, Hl7Error, Level, Message};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use test_case::test_case;

const ADT: &str = "MSH|^~\\&|SendingApp|SendingFac|ReceivingApp|ReceivingFac|202310101010||ADT^A01|1234567890|P|2.3\r\
EVN|A01|202310101010\r\
PID|1||123456^^^MRN~777^^^SSN||Doe^John||19800101|M|||123 Main St^^Anytown^CA^12345||(555)555-5555|||||||987654321\r\
PID|2||654321^^^MRN||Smith^Jane||19850101|F|||456 Elm St^^Othertown^CA^54321||(555) 555-1234|||||||123456789\r\
NK1|1|Doe^Jane|SPO\r\
OBX|1|CE|Code1^Description1||Value1&Value2|||N";

fn adt() -> Message<'static> {
    Message::parse(ADT).unwrap()
}

#[test_case("MSH.3", "SendingApp"; "sending application")]
#[test_case("MSH.7", "202310101010"; "timestamp")]
#[test_case("MSH.9", "ADT^A01"; "message type")]
#[test_case("MSH.9.1", "ADT"; "message code")]
#[test_case("MSH.9.2", "A01"; "trigger event")]
#[test_case("MSH.10", "1234567890"; "control id")]
#[test_case("MSH.12", "2.3"; "version")]
#[test_case("EVN.1", "A01"; "event type")]
#[test_case("PID.3", "123456^^^MRN~777^^^SSN"; "whole repeating field")]
#[test_case("PID.3.1", "123456"; "component of first repeat")]
#[test_case("PID.3(2)", "777^^^SSN"; "second repeat")]
#[test_case("PID.3(2).4", "SSN"; "component of second repeat")]
#[test_case("PID.5.1", "Doe"; "family name")]
#[test_case("PID(2).5.2", "Jane"; "second segment")]
#[test_case("PID(2).11.3", "Othertown"; "city of second segment")]
#[test_case("PID.2", ""; "empty field")]
#[test_case("OBX.5.1.2", "Value2"; "sub component")]
#[test_case("NK1.0", "NK1"; "segment name as field zero")]
fn test_query_values(path: &str, expected: &str) {
    assert_eq!(adt().query(path).unwrap(), expected);
}

#[test_case("ZZZ"; "unknown segment")]
#[test_case("ZZZ.1.1"; "unknown segment with path")]
#[test_case("PID(3).5"; "segment repeat beyond count")]
#[test_case("OBX(2)"; "missing second observation")]
fn test_query_missing_segment_yields_empty(path: &str) {
    assert_eq!(adt().query(path).unwrap(), "");
}

#[test_case("PID.99", ErrorKind::Index; "field out of range")]
#[test_case("PID.5.7", ErrorKind::Index; "component out of range")]
#[test_case("PID.5.1.3", ErrorKind::Index; "sub component out of range")]
#[test_case("PID.3(3)", ErrorKind::Index; "field repeat out of range")]
#[test_case("PID.5.a", ErrorKind::Index; "non numeric component")]
#[test_case("PID.abc", ErrorKind::Format; "non numeric field")]
#[test_case("PID(a).1", ErrorKind::Format; "non numeric segment repeat")]
#[test_case("PID(1.1", ErrorKind::Format; "unbalanced segment repeat")]
#[test_case("PID)(2).1", ErrorKind::Format; "closing paren before opening")]
#[test_case("PID.3(x)", ErrorKind::Format; "non numeric field repeat")]
#[test_case("PID(+2).1", ErrorKind::Format; "signed segment repeat")]
#[test_case("PID.5.+1", ErrorKind::Index; "signed component")]
fn test_query_error_kinds(path: &str, kind: ErrorKind) {
    assert_eq!(adt().query(path).unwrap_err().kind(), kind);
}

#[test]
fn test_header_is_first_segment() {
    let message = adt();
    let msh = message.segment(0).unwrap();
    assert!(msh.is_header());
    assert_eq!(msh.field(1).unwrap().value(), "|");
    assert_eq!(msh.field(2).unwrap().value(), "^~\\&");
    assert_eq!(msh.field_count(), 13);
}

#[test]
fn test_segment_walk() {
    let message = adt();
    let summary: Vec<(&str, usize)> = message
        .segments()
        .map(|segment| (segment.name(), segment.field_count()))
        .collect();

    assert_eq!(
        summary,
        vec![("MSH", 13), ("EVN", 3), ("PID", 21), ("PID", 21), ("NK1", 4), ("OBX", 9)]
    );
}

#[test]
fn test_segment_out_of_range() {
    assert_eq!(
        adt().segment(6).unwrap_err(),
        Hl7Error::IndexOutOfRange {
            level: Level::Segment,
            index: 6,
            count: 6,
        }
    );
}

#[test]
fn test_line_endings_are_interchangeable() {
    let crlf = ADT.replace('\r', "\r\n");
    let lf = ADT.replace('\r', "\n");

    for text in [crlf.as_str(), lf.as_str()] {
        let message = Message::parse(text).unwrap();
        assert_eq!(message.segment_count(), 6);
        assert_eq!(message.query("PID(2).5.2").unwrap(), "Jane");
        assert_eq!(message.query("OBX.8").unwrap(), "N");
    }
}

#[test]
fn test_blank_lines_are_ignored() {
    let text = "MSH|^~\\&|App\r\r\n\nPID|1\r\n";
    let message = Message::parse(text).unwrap();
    assert_eq!(message.segment_count(), 2);
    assert_eq!(message.segment(1).unwrap().value(), "PID|1");
}

#[test]
fn test_segment_lookup_is_case_insensitive_prefix() {
    let message = adt();
    assert_eq!(message.query("pid.5.1").unwrap(), "Doe");
    assert!(message.segment_by_name("NK").unwrap().value().starts_with("NK1|"));
}

#[test]
fn test_segment_lookup_rejects_reversed_parens() {
    let err = adt().segment_by_name("PID)(2)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_custom_delimiters() {
    let text = "MSH#@*!%#App#Fac\rPID#1##A@B*C@D%E!x";
    let message = Message::parse(text).unwrap();
    let delimiters: Delimiters = message.delimiters();
    assert_eq!(delimiters.field_delimiter(), '#');
    assert_eq!(delimiters.encoding_characters(), ['@', '*', '!', '%']);
    assert_eq!(message.query("MSH.1").unwrap(), "#");
    assert_eq!(message.query("MSH.2").unwrap(), "@*!%");
    assert_eq!(message.query("MSH.4").unwrap(), "Fac");
    assert_eq!(message.query("PID.3.2").unwrap(), "B");
    assert_eq!(message.query("PID.3(2).2").unwrap(), "D%E!x");
    assert_eq!(message.query("PID.3(2).2.2").unwrap(), "E!x");
}

#[test]
fn test_parse_failures() {
    assert_eq!(Message::parse("").unwrap_err(), Hl7Error::MissingHeader);
    assert_eq!(Message::parse("PID|1").unwrap_err(), Hl7Error::MissingHeader);
    assert_eq!(Message::parse("MSH|^~").unwrap_err(), Hl7Error::TruncatedHeader(6));
    assert!(Message::parse("MSH|^~\\&").is_ok());
}

#[test]
fn test_values_borrow_from_input() {
    let message = adt();
    let value = message.query("PID.5.1").unwrap();
    let start = value.as_ptr() as usize - ADT.as_ptr() as usize;
    assert_eq!(&ADT[start..start + value.len()], "Doe");
}

#[test]
fn test_field_unescape_through_message() {
    let text = "MSH|^~\\&|App\rOBX|1|ST|||Obstetrician \\T\\ Gynaecologist";
    let message = Message::parse(text).unwrap();
    let field = message.segment_by_name("OBX").unwrap().field(5).unwrap();
    assert_eq!(field.value(), "Obstetrician \\T\\ Gynaecologist");
    assert_eq!(field.unescaped(), "Obstetrician & Gynaecologist");
}

proptest! {
    #[test]
    fn query_is_idempotent(path in "[A-Z]{3}(\\([0-3]\\))?(\\.[0-9]{1,2}(\\([0-3]\\))?){0,3}") {
        let message = adt();
        prop_assert_eq!(message.query(&path), message.query(&path));
    }

    #[test]
    fn first_segment_is_first_line(tail in "[A-Za-z0-9 ^|~&]{0,40}") {
        let header = format!("MSH|^~\\&|{tail}");
        let text = format!("{header}\rPID|1||42");
        let message = Message::parse(&text).unwrap();
        prop_assert_eq!(message.segment(0).unwrap().value(), header.as_str());
    }
}
