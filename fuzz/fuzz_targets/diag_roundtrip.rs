#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

// Fuzz target: generated value → encoded bytes → diagnostic text.
//
// The encoder below picks a width for every argument (including overlong
// ones) and may stream strings and containers. The expected text is built
// straight from the value, so any disagreement is a decoder or renderer
// bug.

#[derive(Arbitrary, Debug)]
enum Value {
    Unsigned(u64, Width),
    Negative(u64, Width),
    Bytes(Vec<Vec<u8>>, bool),
    Text(Vec<String>, bool),
    Array(Vec<Value>, bool),
    Map(Vec<(Value, Value)>, bool),
    Tag(u64, Box<Value>),
    Bool(bool),
    Null,
}

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Width {
    Shortest,
    One,
    Two,
    Four,
    Eight,
}

fn header(out: &mut Vec<u8>, major: u8, value: u64, width: Width) {
    let initial = major << 5;
    let width = match width {
        Width::One if value <= 0xFF => Width::One,
        Width::Two if value <= 0xFFFF => Width::Two,
        Width::Four if value <= 0xFFFF_FFFF => Width::Four,
        Width::Eight => Width::Eight,
        _ => match value {
            0..=23 => {
                out.push(initial | value as u8);
                return;
            }
            24..=0xFF => Width::One,
            0x100..=0xFFFF => Width::Two,
            0x1_0000..=0xFFFF_FFFF => Width::Four,
            _ => Width::Eight,
        },
    };
    match width {
        Width::One => out.extend_from_slice(&[initial | 24, value as u8]),
        Width::Two => {
            out.push(initial | 25);
            out.extend_from_slice(&(value as u16).to_be_bytes());
        }
        Width::Four => {
            out.push(initial | 26);
            out.extend_from_slice(&(value as u32).to_be_bytes());
        }
        Width::Eight | Width::Shortest => {
            out.push(initial | 27);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
}

fn strings(out: &mut Vec<u8>, major: u8, chunks: &[&[u8]], streamed: bool) {
    if streamed {
        out.push((major << 5) | 31);
        for chunk in chunks {
            header(out, major, chunk.len() as u64, Width::Shortest);
            out.extend_from_slice(chunk);
        }
        out.push(0xFF);
    } else {
        let joined = chunks.concat();
        header(out, major, joined.len() as u64, Width::Shortest);
        out.extend_from_slice(&joined);
    }
}

fn encode(value: &Value, out: &mut Vec<u8>, depth: usize) -> bool {
    if depth > 64 {
        return false;
    }
    match value {
        Value::Unsigned(v, w) => header(out, 0, *v, *w),
        Value::Negative(v, w) => header(out, 1, *v, *w),
        Value::Bytes(chunks, streamed) => {
            let chunks: Vec<&[u8]> = chunks.iter().map(Vec::as_slice).collect();
            strings(out, 2, &chunks, *streamed);
        }
        Value::Text(chunks, streamed) => {
            let chunks: Vec<&[u8]> = chunks.iter().map(String::as_bytes).collect();
            strings(out, 3, &chunks, *streamed);
        }
        Value::Array(items, streamed) => {
            if *streamed {
                out.push(0x9F);
            } else {
                header(out, 4, items.len() as u64, Width::Shortest);
            }
            for item in items {
                if !encode(item, out, depth + 1) {
                    return false;
                }
            }
            if *streamed {
                out.push(0xFF);
            }
        }
        Value::Map(pairs, streamed) => {
            if *streamed {
                out.push(0xBF);
            } else {
                header(out, 5, pairs.len() as u64, Width::Shortest);
            }
            for (k, v) in pairs {
                if !encode(k, out, depth + 1) || !encode(v, out, depth + 1) {
                    return false;
                }
            }
            if *streamed {
                out.push(0xFF);
            }
        }
        Value::Tag(tag, inner) => {
            header(out, 6, *tag, Width::Shortest);
            return encode(inner, out, depth + 1);
        }
        Value::Bool(b) => out.push(if *b { 0xF5 } else { 0xF4 }),
        Value::Null => out.push(0xF6),
    }
    true
}

fn escape(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
        }
    }
}

fn expected(value: &Value, out: &mut String) {
    match value {
        Value::Unsigned(v, _) => out.push_str(&v.to_string()),
        Value::Negative(v, _) => out.push_str(&(-1 - i128::from(*v)).to_string()),
        Value::Bytes(chunks, _) => {
            out.push_str("h'");
            for chunk in chunks {
                for byte in chunk {
                    out.push_str(&format!("{byte:02x}"));
                }
            }
            out.push('\'');
        }
        Value::Text(chunks, _) => {
            out.push('"');
            escape(&chunks.concat(), out);
            out.push('"');
        }
        Value::Array(items, streamed) => {
            out.push('[');
            if *streamed {
                out.push_str("_ ");
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                expected(item, out);
            }
            out.push(']');
        }
        Value::Map(pairs, streamed) => {
            out.push('{');
            if *streamed {
                out.push_str("_ ");
            }
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                expected(k, out);
                out.push_str(", ");
                expected(v, out);
            }
            out.push('}');
        }
        Value::Tag(tag, inner) => {
            out.push_str(&format!("{tag}("));
            expected(inner, out);
            out.push(')');
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
    }
}

fuzz_target!(|value: Value| {
    let mut bytes = Vec::new();
    if !encode(&value, &mut bytes, 0) {
        return;
    }
    let mut want = String::new();
    expected(&value, &mut want);

    let got = cbor_diag::diagnostic(&bytes).unwrap();
    assert_eq!(got, want);
});
