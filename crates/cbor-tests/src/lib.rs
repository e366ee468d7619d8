//! Shared fixtures for the conformance tests and benches.
//!
//! Inputs are written as hex text so each case reads like the bytes on
//! the wire. Generated documents are built from raw headers, without an
//! encoder, so the suite never depends on the code it checks.

#![warn(clippy::pedantic)]

/// Decode a hex fixture; whitespace between digits is ignored.
///
/// # Panics
///
/// If `text` is not valid hex. Fixtures are fixed strings in the test
/// source, so this is a bug in the test itself.
#[must_use]
pub fn fixture(text: &str) -> Vec<u8> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(&compact).unwrap_or_else(|e| panic!("bad hex fixture {text:?}: {e}"))
}

/// Append a header with the shortest argument encoding for `value`.
#[allow(clippy::cast_possible_truncation)]
pub fn push_header(out: &mut Vec<u8>, major: u8, value: u64) {
    let initial = major << 5;
    match value {
        0..=23 => out.push(initial | value as u8),
        24..=0xFF => {
            out.push(initial | 24);
            out.push(value as u8);
        }
        0x100..=0xFFFF => {
            out.push(initial | 25);
            out.extend_from_slice(&(value as u16).to_be_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(initial | 26);
            out.extend_from_slice(&(value as u32).to_be_bytes());
        }
        _ => {
            out.push(initial | 27);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
}

/// `depth` nested one-element arrays around a zero: `[[[...[0]...]]]`.
#[must_use]
pub fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut out = vec![0x81; depth];
    out.push(0x00);
    out
}

/// An array of `records` maps, each shaped like
/// `{"id": n, "name": "record-n", "tags": [_ 1, -1], "blob": h'..', "ok": true}`.
/// Every fifth name is sent as a two-chunk indefinite-length string.
#[must_use]
pub fn record_array(records: u64) -> Vec<u8> {
    let mut out = Vec::new();
    push_header(&mut out, 4, records);
    for n in 0..records {
        push_header(&mut out, 5, 5);

        push_text(&mut out, "id");
        push_header(&mut out, 0, n * 1_000);

        push_text(&mut out, "name");
        let name = format!("record-{n}");
        if n % 5 == 0 {
            let (head, tail) = name.split_at(name.len() / 2);
            out.push(0x7F);
            push_text(&mut out, head);
            push_text(&mut out, tail);
            out.push(0xFF);
        } else {
            push_text(&mut out, &name);
        }

        push_text(&mut out, "tags");
        out.extend_from_slice(&[0x9F, 0x01, 0x20, 0xFF]);

        push_text(&mut out, "blob");
        push_header(&mut out, 2, 16);
        out.extend((0..16u8).map(|b| b.wrapping_mul(17)));

        push_text(&mut out, "ok");
        out.push(0xF5);
    }
    out
}

fn push_text(out: &mut Vec<u8>, text: &str) {
    push_header(out, 3, text.len() as u64);
    out.extend_from_slice(text.as_bytes());
}
