use cbor_types::{MajorType, TypeError};
use cbor_wire::WireError;

/// Errors that can occur while pulling items out of an encoded buffer.
///
/// The decoder is a pure function of its input: the same bytes always
/// produce the same error at the same offset. Nothing is retried or
/// recovered locally; every error propagates to the immediate caller.
///
/// ```text
///   DecodeError
///   ├── EndOfInput             ← buffer exhausted mid-item or mid-container
///   ├── MalformedStructure     ← break misuse, bad chunk, odd indefinite map
///   ├── UnsupportedType        ← reserved additional info 28–30
///   ├── InvalidCharacterData   ← text string is not UTF-8
///   ├── NestingTooDeep         ← configured depth limit exceeded
///   └── UnexpectedType         ← accessor called on the wrong kind of item
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the current item needs.
    #[error("unexpected end of input at offset {offset}")]
    EndOfInput { offset: usize },

    /// The bytes are present but do not form a well-formed item.
    #[error("malformed input at offset {offset}: {reason}")]
    MalformedStructure { offset: usize, reason: Malformed },

    /// The initial byte uses a reserved additional-info value.
    #[error("unsupported item type (additional info {info}) at offset {offset}")]
    UnsupportedType { offset: usize, info: u8 },

    /// A text string's bytes are not valid UTF-8. `offset` points at the
    /// first byte of the string item.
    #[error("invalid UTF-8 in text string at offset {offset}")]
    InvalidCharacterData { offset: usize },

    /// Containers or tags nest deeper than [`DecoderConfig::max_depth`].
    ///
    /// [`DecoderConfig::max_depth`]: crate::DecoderConfig::max_depth
    #[error("nesting exceeds {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    /// A typed accessor was called on an item of another kind, or on a
    /// cursor that is already at its end.
    #[error("expected {expected} at offset {offset}, found {found}")]
    UnexpectedType {
        offset: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Why a structure was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    /// Break code outside an indefinite-length container or string, or
    /// in place of a tagged item.
    #[error("unexpected break code")]
    UnexpectedBreak,

    /// A streamed string contained an item that is not a chunk of the
    /// same string kind.
    #[error("chunk of the wrong type inside an indefinite-length string")]
    WrongChunkKind,

    /// A streamed string contained an indefinite-length chunk.
    #[error("nested indefinite-length chunk")]
    IndefiniteChunk,

    /// An indefinite-length map ended after a key.
    #[error("map key without a value")]
    MissingMapValue,

    /// Additional info 31 on an integer or tag.
    #[error("indefinite length on a type that has none")]
    IllegalIndefinite,

    /// `0xF8` followed by a value below 32.
    #[error("two-byte simple value {0} below 32")]
    IllegalSimpleValue(u8),
}

/// The error taxonomy callers (test harnesses, the CLI) report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EndOfInput,
    MalformedStructure,
    UnsupportedType,
    InvalidCharacterData,
    NestingLimit,
    Usage,
}

impl DecodeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EndOfInput { .. } => ErrorKind::EndOfInput,
            Self::MalformedStructure { .. } => ErrorKind::MalformedStructure,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::InvalidCharacterData { .. } => ErrorKind::InvalidCharacterData,
            Self::NestingTooDeep { .. } => ErrorKind::NestingLimit,
            Self::UnexpectedType { .. } => ErrorKind::Usage,
        }
    }

    /// Byte offset the error refers to.
    #[must_use]
    pub fn offset(&self) -> usize {
        match *self {
            Self::EndOfInput { offset }
            | Self::MalformedStructure { offset, .. }
            | Self::UnsupportedType { offset, .. }
            | Self::InvalidCharacterData { offset }
            | Self::NestingTooDeep { offset, .. }
            | Self::UnexpectedType { offset, .. } => offset,
        }
    }

    pub(crate) fn malformed(offset: usize, reason: Malformed) -> Self {
        Self::MalformedStructure { offset, reason }
    }

    pub(crate) fn unexpected(
        offset: usize,
        expected: &'static str,
        found: Option<MajorType>,
    ) -> Self {
        Self::UnexpectedType {
            offset,
            expected,
            found: found.map_or("end of items", MajorType::name),
        }
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnexpectedEof { offset, .. } => Self::EndOfInput { offset },
            WireError::ReservedAdditionalInfo { offset, info } => {
                Self::UnsupportedType { offset, info }
            }
            WireError::IllegalIndefinite { offset, .. } => {
                Self::malformed(offset, Malformed::IllegalIndefinite)
            }
        }
    }
}

impl From<TypeError> for DecodeError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::IllegalSimpleValue { offset, value } => {
                Self::malformed(offset, Malformed::IllegalSimpleValue(value))
            }
            TypeError::UnexpectedBreak { offset } => {
                Self::malformed(offset, Malformed::UnexpectedBreak)
            }
            TypeError::Wire(wire) => wire.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_errors_map_onto_taxonomy() {
        let eof: DecodeError = WireError::UnexpectedEof {
            offset: 3,
            needed: 2,
        }
        .into();
        assert_eq!(eof, DecodeError::EndOfInput { offset: 3 });
        assert_eq!(eof.kind(), ErrorKind::EndOfInput);

        let reserved: DecodeError =
            WireError::ReservedAdditionalInfo { offset: 0, info: 29 }.into();
        assert_eq!(reserved.kind(), ErrorKind::UnsupportedType);

        let indefinite: DecodeError = WireError::IllegalIndefinite {
            offset: 1,
            major: MajorType::Tag,
        }
        .into();
        assert_eq!(
            indefinite,
            DecodeError::malformed(1, Malformed::IllegalIndefinite)
        );
    }

    #[test]
    fn type_errors_map_onto_taxonomy() {
        let err: DecodeError = TypeError::UnexpectedBreak { offset: 4 }.into();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn display_includes_reason() {
        let err = DecodeError::malformed(7, Malformed::WrongChunkKind);
        assert_eq!(
            err.to_string(),
            "malformed input at offset 7: chunk of the wrong type inside an indefinite-length string"
        );
    }
}
