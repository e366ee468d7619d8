use cbor_decoder::DecoderConfig;

/// Configuration for the diagnostic renderer.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────┐
/// │ Field        │ Purpose                                          │
/// ├──────────────┼──────────────────────────────────────────────────┤
/// │ decoder      │ Nesting limit for containers and tag chains      │
/// │ invalid_text │ What to do with text strings that are not UTF-8 │
/// └──────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagConfig {
    pub decoder: DecoderConfig,
    pub invalid_text: InvalidTextPolicy,
}

/// Handling of text strings whose bytes are not valid UTF-8.
///
/// Neither policy repairs the data: `Reject` stops, `Escape` shows the
/// offending bytes verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidTextPolicy {
    /// Fail with `InvalidCharacterData`.
    #[default]
    Reject,
    /// Render valid runs normally and each invalid byte as `\xNN`.
    Escape,
}
