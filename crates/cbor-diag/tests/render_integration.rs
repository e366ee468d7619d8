//! Integration test: bytes → cursor → diagnostic text
//!
//! Renders composite documents through the public API and pins the
//! output with inline insta snapshots. Inputs are written as hex so the
//! encoding being exercised stays readable.

use cbor_decoder::{DecoderConfig, ErrorKind, ItemCursor};
use cbor_diag::{DiagConfig, DiagRenderer, InvalidTextPolicy, diagnostic};
use insta::assert_snapshot;

fn from_hex(text: &str) -> Vec<u8> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(compact).expect("fixture must be valid hex")
}

fn render(text: &str) -> String {
    diagnostic(&from_hex(text)).expect("fixture must render")
}

/// A document mixing every major type, nested two levels deep.
#[test]
fn mixed_document() {
    let output = render(
        "a4                      \
         61 61  01               \
         61 62  82 20 3a ffffffff \
         61 63  bf 43 010203 f5 ff \
         61 64  c1 fb 3ff8000000000000",
    );
    assert_snapshot!(output, @r#"{"a", 1, "b", [-1, -4294967296], "c", {_ h'010203', true}, "d", 1(1.5)}"#);
}

#[test]
fn streamed_strings_and_containers() {
    let output = render("9f 7f 63 48656c 62 6c6f ff 5f 41 00 40 ff bf ff ff");
    assert_snapshot!(output, @r#"[_ "Hello", h'00', {_ }]"#);
}

#[test]
fn concatenated_stream() {
    let output = render("00 20 f4 f6 f7 80 a0");
    assert_snapshot!(output, @"0, -1, false, null, undefined, [], {}");
}

#[test]
fn floats_and_simple_values() {
    let output = render("f9 3c00  fa 3fc00000  fb 3ff199999999999a  f0  f8 20  fa 7f800000  fb fff0000000000000");
    assert_snapshot!(output, @"__f16(3c00), 1.5f, 1.1, simple(16), simple(32), Infinityf, -Infinity");
}

#[test]
fn escaped_text() {
    let output = render("67 22 5c 09 00 c3 a9 7e  64 f0 9f 98 80");
    assert_snapshot!(output, @r#""\"\\\t\u0000\u00E9~", "\uD83D\uDE00""#);
}

#[test]
fn invalid_text_escaped_on_request() {
    let renderer = DiagRenderer::new(DiagConfig {
        invalid_text: InvalidTextPolicy::Escape,
        ..DiagConfig::default()
    });
    let output = renderer.render(&from_hex("63 61 ff 62")).unwrap();
    assert_snapshot!(output, @r#""a\xFFb""#);
}

#[test]
fn failure_reports_kind_and_partial() {
    let err = diagnostic(&from_hex("82 01 5f 61 78 ff")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStructure);
    assert_eq!(err.partial, "[1, ");
    assert_snapshot!(
        err.to_string(),
        @r#"malformed input at offset 3: chunk of the wrong type inside an indefinite-length string (partial output: "[1, ")"#
    );
}

#[test]
fn deep_nesting_stops_at_limit() {
    let renderer = DiagRenderer::new(DiagConfig {
        decoder: DecoderConfig { max_depth: 4 },
        ..DiagConfig::default()
    });
    let err = renderer.render(&[0x81, 0x81, 0x81, 0x81, 0x81, 0x00]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingLimit);
    assert_eq!(err.partial, "[[[[[");
}

#[test]
fn render_sequence_from_inside_a_container() {
    let bytes = from_hex("83 01 02 03");
    let top = ItemCursor::new(&bytes).unwrap();
    let mut child = top.enter_container().unwrap();
    child.advance().unwrap();
    let mut out = String::new();
    DiagRenderer::default()
        .render_sequence(&mut child, &mut out)
        .unwrap();
    assert_eq!(out, "2, 3");
}
