/// Implementation of `cbordiag inspect`.
///
/// Prints one line per item header in stream order, indented by nesting
/// level. The argument column shows how many bytes carried the argument,
/// so overlong encodings stand out:
///
/// ```text
/// offset  depth  item
///      0      0  array     2
///      1      1    unsigned  0 (8-byte argument)
///     10      1    tag       1
///     11      2      negative  0  = -1
/// ```
///
/// Strings are not expanded; their note gives the total length across
/// all chunks. Text is not checked for UTF-8 here.
use std::fmt::Write as _;

use anyhow::{Context, Result};
use cbor_decoder::{DecodeError, ItemCursor};
use cbor_diag::special::write_special;
use cbor_types::Item;
use cbor_wire::{Argument, ArgumentWidth, Header};

use crate::InspectArgs;
use crate::input;

/// Run the `cbordiag inspect` command.
///
/// Lines produced before a decode error are still printed.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or is not well formed.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = input::load(&args.input)?;
    let mut lines = Vec::new();
    let result = inspect(&bytes, &mut lines);

    println!("offset  depth  item");
    for line in &lines {
        println!("{line}");
    }
    result.with_context(|| format!("cannot inspect {}", args.input.file.display()))
}

fn inspect(bytes: &[u8], lines: &mut Vec<String>) -> Result<(), DecodeError> {
    let mut cursor = ItemCursor::new(bytes)?;
    while !cursor.at_end() {
        visit(&mut cursor, lines, 0)?;
    }
    Ok(())
}

fn visit(
    cursor: &mut ItemCursor<'_>,
    lines: &mut Vec<String>,
    level: usize,
) -> Result<(), DecodeError> {
    let limit = cursor.config().max_depth;
    let (Some(header), Some(item)) = (cursor.header(), cursor.item()) else {
        return Ok(());
    };
    if level > limit {
        return Err(DecodeError::NestingTooDeep {
            offset: header.offset,
            limit,
        });
    }

    let mut line = describe(&header, level);
    match item {
        Item::Negative(n) => {
            let _ = write!(line, "  = {n}");
        }
        Item::Special(special) => {
            line.push_str("  = ");
            write_special(&mut line, special);
        }
        Item::ByteString(_) | Item::TextString(_) => {
            let len = cursor.string_length()?;
            let _ = write!(line, "  = {len} byte{}", if len == 1 { "" } else { "s" });
        }
        Item::Unsigned(_) => {}
        Item::Array(_) | Item::Map(_) => {
            lines.push(line);
            let mut child = cursor.enter_container()?;
            while !child.at_end() {
                visit(&mut child, lines, level + 1)?;
            }
            return cursor.leave_container(child);
        }
        Item::Tag(_) => {
            lines.push(line);
            cursor.unwrap_tag()?;
            return visit(cursor, lines, level + 1);
        }
    }
    lines.push(line);
    cursor.advance()
}

/// Offset, depth, type name and argument of one header.
fn describe(header: &Header, level: usize) -> String {
    let indent = "  ".repeat(level);
    let mut line = format!(
        "{:>6}  {level:>5}  {indent}{:<8}  ",
        header.offset,
        header.major.name()
    );
    match header.argument {
        Argument::Value(value, width) => {
            let _ = write!(line, "{value}");
            if width != ArgumentWidth::Immediate {
                let _ = write!(line, " ({}-byte argument)", width.extra_bytes());
            }
        }
        Argument::Indefinite => line.push_str("indefinite"),
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(bytes: &[u8]) -> Vec<String> {
        let mut out = Vec::new();
        inspect(bytes, &mut out).unwrap();
        out
    }

    #[test]
    fn overlong_width_is_shown() {
        let out = lines(&[0x82, 0x1B, 0, 0, 0, 0, 0, 0, 0, 0, 0xC1, 0x20]);
        assert_eq!(
            out,
            vec![
                "     0      0  array     2",
                "     1      1    unsigned  0 (8-byte argument)",
                "    10      1    tag       1",
                "    11      2      negative  0  = -1",
            ]
        );
    }

    #[test]
    fn strings_report_total_length() {
        let out = lines(b"\x7F\x62ab\x61c\xFF\x40");
        assert_eq!(
            out,
            vec![
                "     0      0  text      indefinite  = 3 bytes",
                "     7      0  bytes     0  = 0 bytes",
            ]
        );
    }

    #[test]
    fn floats_use_diagnostic_form() {
        let out = lines(&[0xF9, 0x3C, 0x00, 0xF5]);
        assert_eq!(out[0], "     0      0  simple    15360 (2-byte argument)  = __f16(3c00)");
        assert_eq!(out[1], "     3      0  simple    21  = true");
    }

    #[test]
    fn lines_before_error_are_kept() {
        let mut out = Vec::new();
        let err = inspect(&[0x01, 0x9F, 0x02], &mut out).unwrap_err();
        assert_eq!(err, DecodeError::EndOfInput { offset: 3 });
        assert_eq!(out.len(), 3);
    }
}
