use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fast_hl7::{escape, Delimiters, Message};

const ORU: &str = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20231011121314||ORU^R01^ORU_R01|MSG0001|P|2.5.1\r\
PID|1||123456^^^MRN~987654^^^SSN||Doe^John^Q||19800101|M|||123 Main St^^Anytown^CA^12345||(555)555-5555\r\
PV1|1|O|CLINIC^101^A||||1234^Smith^Pat\r\
OBR|1|ORD001|FIL001|GLU^Glucose^L|||20231011110000\r\
OBX|1|NM|GLU^Glucose^L||5.4|mmol/L|3.9-5.8|N|||F\r\
OBX|2|NM|HBA1C^Hemoglobin A1c^L||6.1|%|4.0-5.6|H|||F\r\
OBX|3|ST|COMMENT^Comment^L||Obstetrician \\T\\ Gynaecologist\\.br\\Review in 3 months||||||F";

fn large_message(observations: usize) -> String {
    let mut text = String::from(ORU);
    for i in 0..observations {
        text.push_str(&format!("\rOBX|{}|NM|CODE{i}^Observation {i}^L||{i}.5|unit|0-100|N|||F", i + 4));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_oru", |b| b.iter(|| Message::parse(black_box(ORU))));

    let large = large_message(500);
    c.bench_function("parse_oru_500_obx", |b| {
        b.iter(|| Message::parse(black_box(&large)).map(|m| m.segment_count()))
    });
}

fn bench_query(c: &mut Criterion) {
    let Ok(message) = Message::parse(ORU) else {
        return;
    };

    c.bench_function("query_header_field", |b| b.iter(|| message.query(black_box("MSH.10"))));
    c.bench_function("query_repeat_component", |b| b.iter(|| message.query(black_box("PID.3(2).4"))));
    c.bench_function("query_segment_repeat", |b| b.iter(|| message.query(black_box("OBX(2).3.2"))));

    let large = large_message(500);
    let Ok(message) = Message::parse(&large) else {
        return;
    };
    c.bench_function("query_late_segment", |b| b.iter(|| message.query(black_box("OBX(450).5"))));
}

fn bench_unescape(c: &mut Criterion) {
    let delimiters = Delimiters::default();
    let escaped = "Obstetrician \\T\\ Gynaecologist\\.br\\Caf\\XC3A9\\ \\S\\ Bar";

    c.bench_function("unescape_mixed", |b| {
        b.iter(|| escape::unescape(black_box(escaped), &delimiters))
    });
    c.bench_function("unescape_plain", |b| {
        b.iter(|| escape::unescape(black_box("Nothing to decode here at all"), &delimiters))
    });
}

criterion_group!(benches, bench_parse, bench_query, bench_unescape);
criterion_main!(benches);
