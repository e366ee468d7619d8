use cbor_wire::WireError;

/// Errors raised while turning a raw [`Header`](cbor_wire::Header) into a
/// typed [`Item`](crate::Item).
///
/// These sit one level above [`WireError`]: the header bytes were all
/// present and well-framed, but the value they describe is not a legal
/// item on its own.
///
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                              │
/// │   ├── IllegalSimpleValue  one-byte simple < 32      │
/// │   ├── UnexpectedBreak     0xFF where an item sits   │
/// │   └── Wire(WireError)     header framing failure    │
/// └─────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
  /// Simple values 0–31 must use the immediate form; `0xF8 0x00`
  /// through `0xF8 0x1F` are not well-formed.
  #[error("simple value {value} at offset {offset} must use the one-byte form")]
  IllegalSimpleValue { offset: usize, value: u8 },

  /// The break code is a terminator, never an item.
  #[error("break code at offset {offset} is not an item")]
  UnexpectedBreak { offset: usize },

  #[error(transparent)]
  Wire(#[from] WireError),
}
