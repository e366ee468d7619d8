use crate::header::MajorType;

/// Errors raised while reading raw bytes and item headers.
///
/// Every variant carries the byte offset (from the start of the input)
/// where the problem was detected. The decoder maps these onto its own
/// error taxonomy, so this enum stays small and purely structural.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Input ended before `needed` more bytes could be read.
    #[error("unexpected end of input at offset {offset} ({needed} more bytes needed)")]
    UnexpectedEof { offset: usize, needed: u64 },

    /// Additional info 28, 29 or 30, which have no assigned meaning.
    #[error("reserved additional info {info} at offset {offset}")]
    ReservedAdditionalInfo { offset: usize, info: u8 },

    /// The indefinite-length marker (additional info 31) on a major type
    /// that has no indefinite form.
    #[error("indefinite length not allowed for {major:?} at offset {offset}")]
    IllegalIndefinite { offset: usize, major: MajorType },
}

// NOTE
// `needed` is a u64 rather than a usize because lengths come straight off
// the wire: a string header may claim 2^64 - 1 bytes, and we still want to
// report that faithfully on a 32-bit target.
