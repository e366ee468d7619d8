use std::fmt::Write as _;

use cbor_decoder::{DecodeError, ItemCursor};
use cbor_types::Item;
use log::debug;

use crate::config::DiagConfig;
use crate::error::DiagFailure;
use crate::escape::{write_hex, write_text};
use crate::special::write_special;

/// Renders encoded items as diagnostic notation.
///
/// The renderer is a recursive pull over an [`ItemCursor`]: it asks the
/// cursor what is here, writes it, and for containers opens a child
/// cursor and recurses before handing the child back.
///
/// ```text
/// ┌────────────────────┬─────────────────────────────────────────┐
/// │ Item               │ Rendering                               │
/// ├────────────────────┼─────────────────────────────────────────┤
/// │ Unsigned(v)        │ v                                       │
/// │ Negative(v)        │ -(v + 1), exact even for v = 2^64 - 1   │
/// │ ByteString         │ h'0a1b'                                 │
/// │ TextString         │ "escaped text"                          │
/// │ Array              │ [a, b]      [_ a, b] if indefinite      │
/// │ Map                │ {k, v}      {_ k, v} if indefinite      │
/// │ Tag(n)             │ n(item)                                 │
/// │ Special            │ see write_special                       │
/// └────────────────────┴─────────────────────────────────────────┘
/// ```
///
/// Top-level items of a concatenated stream are joined with `", "`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagRenderer {
    config: DiagConfig,
}

impl DiagRenderer {
    #[must_use]
    pub fn new(config: DiagConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> DiagConfig {
        self.config
    }

    /// Render every item in `bytes`.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`], wrapped in a [`DiagFailure`] together with the
    /// text produced before the failure.
    pub fn render(&self, bytes: &[u8]) -> Result<String, DiagFailure> {
        let mut out = String::new();
        match self.render_into(bytes, &mut out) {
            Ok(()) => Ok(out),
            Err(error) => {
                debug!("render failed after {} chars: {error}", out.len());
                Err(DiagFailure {
                    error,
                    partial: out,
                })
            }
        }
    }

    fn render_into(&self, bytes: &[u8], out: &mut String) -> Result<(), DecodeError> {
        let mut cursor = ItemCursor::with_config(bytes, self.config.decoder)?;
        self.render_sequence(&mut cursor, out)
    }

    /// Render the remaining items of `cursor`'s level, joined by `", "`.
    ///
    /// # Errors
    ///
    /// The first [`DecodeError`] hit; `out` keeps what was written so far.
    pub fn render_sequence(
        &self,
        cursor: &mut ItemCursor<'_>,
        out: &mut String,
    ) -> Result<(), DecodeError> {
        self.render_children(cursor, out, cursor.depth())
    }

    /// Render the current item and move `cursor` to its next sibling.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] if the cursor is already at its
    /// end, otherwise the first [`DecodeError`] inside the item.
    pub fn render_one(
        &self,
        cursor: &mut ItemCursor<'_>,
        out: &mut String,
    ) -> Result<(), DecodeError> {
        self.render_item(cursor, out, cursor.depth())
    }

    fn render_children(
        &self,
        cursor: &mut ItemCursor<'_>,
        out: &mut String,
        level: usize,
    ) -> Result<(), DecodeError> {
        let mut first = true;
        while !cursor.at_end() {
            if !first {
                out.push_str(", ");
            }
            first = false;
            self.render_item(cursor, out, level)?;
        }
        Ok(())
    }

    /// `level` counts enclosing containers and tags, so a long tag chain
    /// hits the depth limit just like nested arrays do.
    fn render_item(
        &self,
        cursor: &mut ItemCursor<'_>,
        out: &mut String,
        level: usize,
    ) -> Result<(), DecodeError> {
        let offset = cursor.offset();
        let limit = self.config.decoder.max_depth;
        if level > limit {
            return Err(DecodeError::NestingTooDeep { offset, limit });
        }
        let Some(item) = cursor.item() else {
            return Err(DecodeError::UnexpectedType {
                offset,
                expected: "item",
                found: "end of items",
            });
        };

        match item {
            Item::Unsigned(v) => {
                let _ = write!(out, "{v}");
                cursor.advance()?;
            }
            Item::Negative(n) => {
                let _ = write!(out, "{n}");
                cursor.advance()?;
            }
            Item::Special(special) => {
                write_special(out, special);
                cursor.advance()?;
            }
            Item::ByteString(_) => {
                let bytes = cursor.read_byte_string()?;
                out.push_str("h'");
                write_hex(out, &bytes);
                out.push('\'');
            }
            Item::TextString(_) => {
                let bytes = cursor.read_text_bytes()?;
                out.push('"');
                write_text(out, &bytes, self.config.invalid_text, offset)?;
                out.push('"');
            }
            Item::Array(len) | Item::Map(len) => {
                let (open, close) = if matches!(item, Item::Array(_)) {
                    ('[', ']')
                } else {
                    ('{', '}')
                };
                out.push(open);
                if !len.is_known() {
                    out.push_str("_ ");
                }
                let mut child = cursor.enter_container()?;
                self.render_children(&mut child, out, level + 1)?;
                cursor.leave_container(child)?;
                out.push(close);
            }
            Item::Tag(_) => {
                let tag = cursor.unwrap_tag()?;
                let _ = write!(out, "{tag}(");
                self.render_item(cursor, out, level + 1)?;
                out.push(')');
            }
        }
        Ok(())
    }
}

/// Render `bytes` with the default configuration.
///
/// # Errors
///
/// See [`DiagRenderer::render`].
pub fn diagnostic(bytes: &[u8]) -> Result<String, DiagFailure> {
    DiagRenderer::default().render(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvalidTextPolicy;
    use cbor_decoder::{DecoderConfig, ErrorKind};

    fn diag(bytes: &[u8]) -> String {
        diagnostic(bytes).unwrap()
    }

    #[test]
    fn integers() {
        assert_eq!(diag(&[0x00]), "0");
        assert_eq!(diag(&[0x18, 0x18]), "24");
        assert_eq!(diag(&[0x20]), "-1");
        assert_eq!(diag(&[0x38, 0xFF]), "-256");
        assert_eq!(
            diag(&[0x3B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
            "-18446744073709551616"
        );
    }

    #[test]
    fn strings() {
        assert_eq!(diag(&[0x40]), "h''");
        assert_eq!(diag(&[0x5F, 0xFF]), "h''");
        assert_eq!(diag(&[0x43, 0x01, 0xAB, 0xFF]), "h'01abff'");
        assert_eq!(diag(&[0x60]), "\"\"");
        assert_eq!(diag(b"\x7F\x63Hel\x62lo\xFF"), "\"Hello\"");
        assert_eq!(diag(b"\x62\"\n"), "\"\\\"\\n\"");
    }

    #[test]
    fn containers() {
        assert_eq!(diag(&[0x80]), "[]");
        assert_eq!(diag(&[0x9F, 0xFF]), "[_ ]");
        assert_eq!(diag(&[0x82, 0x00, 0xA0]), "[0, {}]");
        assert_eq!(diag(&[0xBF, 0x01, 0x02, 0x03, 0x04, 0xFF]), "{_ 1, 2, 3, 4}");
        assert_eq!(diag(&[0xA1, 0x9F, 0xFF, 0x80]), "{[_ ], []}");
    }

    #[test]
    fn tags_wrap_one_item() {
        assert_eq!(diag(&[0xC1, 0x00]), "1(0)");
        assert_eq!(diag(&[0xD8, 0x20, 0xC0, 0x82, 0x01, 0x02]), "32(0([1, 2]))");
        assert_eq!(diag(&[0x82, 0xC1, 0x00, 0x02]), "[1(0), 2]");
    }

    #[test]
    fn top_level_sequence_is_comma_joined() {
        assert_eq!(diag(&[0x01, 0x02, 0x03]), "1, 2, 3");
        assert_eq!(diag(&[0x80, 0xF6]), "[], null");
    }

    #[test]
    fn failure_keeps_partial_output() {
        let err = diagnostic(&[0x01, 0x82, 0x02, 0xFF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.partial, "1, [2");
    }

    #[test]
    fn empty_input_fails() {
        let err = diagnostic(&[]).unwrap_err();
        assert_eq!(err.error, DecodeError::EndOfInput { offset: 0 });
        assert!(err.partial.is_empty());
    }

    #[test]
    fn invalid_text_policy() {
        let bytes = [0x82, 0x62, 0xC3, 0x28, 0x00];
        let err = diagnostic(&bytes).unwrap_err();
        assert_eq!(err.error, DecodeError::InvalidCharacterData { offset: 1 });

        let renderer = DiagRenderer::new(DiagConfig {
            invalid_text: InvalidTextPolicy::Escape,
            ..DiagConfig::default()
        });
        assert_eq!(renderer.render(&bytes).unwrap(), "[\"\\xC3(\", 0]");
    }

    #[test]
    fn tag_chain_counts_toward_depth() {
        let renderer = DiagRenderer::new(DiagConfig {
            decoder: DecoderConfig { max_depth: 2 },
            ..DiagConfig::default()
        });
        assert_eq!(renderer.render(&[0xC1, 0xC1, 0x00]).unwrap(), "1(1(0))");
        let err = renderer.render(&[0xC1, 0xC1, 0xC1, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingLimit);
        assert_eq!(err.partial, "1(1(1(");
    }

    #[test]
    fn render_one_steps_through_stream() {
        let renderer = DiagRenderer::default();
        let mut cursor = ItemCursor::new(&[0x01, 0x81, 0x02]).unwrap();
        let mut out = String::new();
        renderer.render_one(&mut cursor, &mut out).unwrap();
        assert_eq!(out, "1");
        renderer.render_one(&mut cursor, &mut out).unwrap();
        assert_eq!(out, "1[2]");
        let err = renderer.render_one(&mut cursor, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
