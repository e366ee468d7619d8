use std::fmt::Write as _;

use cbor_decoder::DecodeError;

use crate::config::InvalidTextPolicy;

/// Append `bytes` as lowercase hex, two digits per byte.
pub fn write_hex(out: &mut String, bytes: &[u8]) {
    out.push_str(&hex::encode(bytes));
}

/// Append the body of a text string (without the surrounding quotes).
///
/// `offset` is the position of the string item, used for the error.
///
/// # Errors
///
/// [`DecodeError::InvalidCharacterData`] under
/// [`InvalidTextPolicy::Reject`] when `bytes` is not UTF-8.
pub fn write_text(
    out: &mut String,
    bytes: &[u8],
    policy: InvalidTextPolicy,
    offset: usize,
) -> Result<(), DecodeError> {
    match policy {
        InvalidTextPolicy::Reject => {
            let text = std::str::from_utf8(bytes)
                .map_err(|_| DecodeError::InvalidCharacterData { offset })?;
            write_escaped(out, text);
        }
        InvalidTextPolicy::Escape => {
            for chunk in bytes.utf8_chunks() {
                write_escaped(out, chunk.valid());
                for byte in chunk.invalid() {
                    let _ = write!(out, "\\x{byte:02X}");
                }
            }
        }
    }
    Ok(())
}

/// Escape one string so the output is pure printable ASCII.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────┐
/// │ Input                    │ Output                   │
/// ├──────────────────────────┼──────────────────────────┤
/// │ "  \                     │ \"  \\                   │
/// │ U+0008 U+000C \n \r \t   │ \b \f \n \r \t           │
/// │ 0x20..=0x7E otherwise    │ as is                    │
/// │ anything else            │ \uXXXX per UTF-16 unit   │
/// └──────────────────────────┴──────────────────────────┘
/// ```
///
/// Characters outside the BMP become a surrogate pair, e.g. U+1F600 is
/// written `\uD83D\uDE00`.
pub fn write_escaped(out: &mut String, text: &str) {
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
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(text: &str) -> String {
        let mut out = String::new();
        write_escaped(&mut out, text);
        out
    }

    #[test]
    fn printable_ascii_unchanged() {
        assert_eq!(escaped("Hello, world ~"), "Hello, world ~");
    }

    #[test]
    fn short_escapes() {
        assert_eq!(escaped("\"\\\u{8}\u{c}\n\r\t"), "\\\"\\\\\\b\\f\\n\\r\\t");
    }

    #[test]
    fn control_and_non_ascii() {
        assert_eq!(escaped("\0"), "\\u0000");
        assert_eq!(escaped("\u{1F}\u{7F}"), "\\u001F\\u007F");
        assert_eq!(escaped("é"), "\\u00E9");
        assert_eq!(escaped("水"), "\\u6C34");
        assert_eq!(escaped("😀"), "\\uD83D\\uDE00");
    }

    #[test]
    fn hex_is_lowercase() {
        let mut out = String::new();
        write_hex(&mut out, &[0x00, 0xAB, 0x7F]);
        assert_eq!(out, "00ab7f");
    }

    #[test]
    fn reject_policy_flags_invalid_utf8() {
        let mut out = String::new();
        let err = write_text(&mut out, b"a\xFFb", InvalidTextPolicy::Reject, 3).unwrap_err();
        assert_eq!(err, DecodeError::InvalidCharacterData { offset: 3 });
    }

    #[test]
    fn escape_policy_shows_raw_bytes() {
        let mut out = String::new();
        write_text(&mut out, b"a\xFF\xC3b\n", InvalidTextPolicy::Escape, 0).unwrap();
        assert_eq!(out, "a\\xFF\\xC3b\\n");
    }
}
