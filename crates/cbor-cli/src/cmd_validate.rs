/// Implementation of `cbordiag validate`.
///
/// Walks every item of the input, assembling strings and checking text
/// for UTF-8, and reports either a series of success checkmarks (`✓`) or
/// a diagnostic failure line (`✗`). The main dispatcher turns the
/// returned `Err` into exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Structure: 2 top-level items, 7 items in total
/// ✓ Nesting: maximum depth 3 (limit 256)
/// ✓ Text: 2 text strings, all valid UTF-8
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error (malformed structure): malformed input at offset 4: unexpected break code
/// ```
use anyhow::{Result, anyhow};
use cbor_decoder::{DecodeError, DecoderConfig, ErrorKind, ItemCursor};
use cbor_types::Item;

use crate::ValidateArgs;
use crate::input;

/// Counters gathered while walking the input.
#[derive(Debug, Default, PartialEq, Eq)]
struct Report {
    top_level: usize,
    items: usize,
    max_depth: usize,
    text_strings: usize,
}

/// Run the `cbordiag validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or is not well formed.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes = input::load(&args.input)?;
    let config = DecoderConfig::default();

    match validate(&bytes, config) {
        Ok(report) => {
            println!(
                "✓ Structure: {} top-level item{}, {} item{} in total",
                report.top_level,
                plural(report.top_level),
                report.items,
                plural(report.items)
            );
            println!(
                "✓ Nesting: maximum depth {} (limit {})",
                report.max_depth, config.max_depth
            );
            println!(
                "✓ Text: {} text string{}, all valid UTF-8",
                report.text_strings,
                plural(report.text_strings)
            );
            Ok(())
        }
        Err(e) => {
            println!("✗ Error ({}): {e}", kind_label(e.kind()));
            Err(anyhow!("validation failed"))
        }
    }
}

fn validate(bytes: &[u8], config: DecoderConfig) -> Result<Report, DecodeError> {
    let mut report = Report::default();
    let mut cursor = ItemCursor::with_config(bytes, config)?;
    while !cursor.at_end() {
        report.top_level += 1;
        walk(&mut cursor, &mut report, 0)?;
    }
    Ok(report)
}

/// Visit the current item and everything inside it, leaving `cursor` on
/// the next sibling. A cursor already at its end is left alone.
fn walk(
    cursor: &mut ItemCursor<'_>,
    report: &mut Report,
    level: usize,
) -> Result<(), DecodeError> {
    let Some(item) = cursor.item() else {
        return Ok(());
    };
    let limit = cursor.config().max_depth;
    if level > limit {
        return Err(DecodeError::NestingTooDeep {
            offset: cursor.offset(),
            limit,
        });
    }
    report.items += 1;
    report.max_depth = report.max_depth.max(level);

    match item {
        Item::TextString(_) => {
            report.text_strings += 1;
            cursor.read_text()?;
        }
        Item::ByteString(_) => {
            cursor.read_byte_string()?;
        }
        Item::Array(_) | Item::Map(_) => {
            let mut child = cursor.enter_container()?;
            while !child.at_end() {
                walk(&mut child, report, level + 1)?;
            }
            cursor.leave_container(child)?;
        }
        Item::Tag(_) => {
            cursor.unwrap_tag()?;
            walk(cursor, report, level + 1)?;
        }
        Item::Unsigned(_) | Item::Negative(_) | Item::Special(_) => {
            cursor.advance()?;
        }
    }
    Ok(())
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::EndOfInput => "end of input",
        ErrorKind::MalformedStructure => "malformed structure",
        ErrorKind::UnsupportedType => "unsupported type",
        ErrorKind::InvalidCharacterData => "invalid text",
        ErrorKind::NestingLimit => "nesting limit",
        ErrorKind::Usage => "usage",
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
