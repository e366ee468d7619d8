use crate::cursor::ByteCursor;
use crate::error::WireError;

/// Additional-info value that marks an indefinite length (or, under
/// major type 7, the break code).
pub const INDEFINITE: u8 = 31;

/// The single byte that terminates an indefinite-length item.
pub const BREAK: u8 = 0xFF;

/// Top-level kind tag of an encoded item: the high 3 bits of the
/// initial byte.
///
/// ```text
/// ┌───────┬─────────────────┬──────────────────────────────────┐
/// │ Bits  │ Major type      │ Argument means                   │
/// ├───────┼─────────────────┼──────────────────────────────────┤
/// │ 0     │ UnsignedInteger │ the value                        │
/// │ 1     │ NegativeInteger │ v, logical value is -1 - v       │
/// │ 2     │ ByteString      │ byte length (or indefinite)      │
/// │ 3     │ TextString      │ byte length (or indefinite)      │
/// │ 4     │ Array           │ item count (or indefinite)       │
/// │ 5     │ Map             │ pair count (or indefinite)       │
/// │ 6     │ Tag             │ tag number                       │
/// │ 7     │ SimpleOrFloat   │ simple code or float bit pattern │
/// └───────┴─────────────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MajorType {
    UnsignedInteger = 0,
    NegativeInteger = 1,
    ByteString = 2,
    TextString = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    SimpleOrFloat = 7,
}

impl MajorType {
    /// Decode the major type from the top 3 bits of an initial byte.
    #[must_use]
    pub fn from_initial_byte(byte: u8) -> Self {
        match byte >> 5 {
            0 => Self::UnsignedInteger,
            1 => Self::NegativeInteger,
            2 => Self::ByteString,
            3 => Self::TextString,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::SimpleOrFloat,
        }
    }

    /// Whether additional info 31 has a meaning for this major type.
    #[must_use]
    pub fn allows_indefinite(self) -> bool {
        matches!(
            self,
            Self::ByteString | Self::TextString | Self::Array | Self::Map | Self::SimpleOrFloat
        )
    }

    /// Human-readable name, used by inspection output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnsignedInteger => "unsigned",
            Self::NegativeInteger => "negative",
            Self::ByteString => "bytes",
            Self::TextString => "text",
            Self::Array => "array",
            Self::Map => "map",
            Self::Tag => "tag",
            Self::SimpleOrFloat => "simple",
        }
    }
}

/// How many bytes followed the initial byte to carry the argument.
///
/// Overlong encodings (e.g. `0` written with the 8-byte form) are legal
/// and decode to the same value; the width is kept only so tools can
/// show how an item was actually encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentWidth {
    /// Value 0–23 packed into the initial byte.
    Immediate,
    One,
    Two,
    Four,
    Eight,
}

impl ArgumentWidth {
    /// Number of bytes following the initial byte.
    #[must_use]
    pub fn extra_bytes(self) -> usize {
        match self {
            Self::Immediate => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// The decoded argument of a header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Argument {
    /// A definite value and the width it was encoded with.
    Value(u64, ArgumentWidth),
    /// Additional info 31: indefinite length, or break under major type 7.
    Indefinite,
}

/// A fully decoded item header: initial byte plus any extended argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub major: MajorType,
    /// Low 5 bits of the initial byte.
    pub info: u8,
    pub argument: Argument,
    /// Offset of the initial byte in the input.
    pub offset: usize,
}

impl Header {
    /// Read one header, consuming the initial byte and 0/1/2/4/8 argument
    /// bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the input ends inside the header.
    /// - [`WireError::ReservedAdditionalInfo`] for additional info 28–30.
    /// - [`WireError::IllegalIndefinite`] for additional info 31 on an
    ///   integer or tag.
    ///
    /// On error the cursor may have consumed the initial byte; callers
    /// treat any header error as fatal for the whole decode.
    pub fn read_from(cursor: &mut ByteCursor<'_>) -> Result<Self, WireError> {
        let offset = cursor.offset();
        let initial = cursor.read_u8()?;
        let major = MajorType::from_initial_byte(initial);
        let info = initial & 0x1F;

        let argument = match info {
            0..=23 => Argument::Value(u64::from(info), ArgumentWidth::Immediate),
            24 => Argument::Value(u64::from(cursor.read_u8()?), ArgumentWidth::One),
            25 => Argument::Value(u64::from(cursor.read_u16_be()?), ArgumentWidth::Two),
            26 => Argument::Value(u64::from(cursor.read_u32_be()?), ArgumentWidth::Four),
            27 => Argument::Value(cursor.read_u64_be()?, ArgumentWidth::Eight),
            28..=30 => return Err(WireError::ReservedAdditionalInfo { offset, info }),
            _ => {
                if !major.allows_indefinite() {
                    return Err(WireError::IllegalIndefinite { offset, major });
                }
                Argument::Indefinite
            }
        };

        Ok(Self {
            major,
            info,
            argument,
            offset,
        })
    }

    /// Decode the header at the cursor without moving it.
    ///
    /// # Errors
    ///
    /// Same as [`read_from`](Self::read_from).
    pub fn peek(cursor: &ByteCursor<'_>) -> Result<Self, WireError> {
        let mut probe = *cursor;
        Self::read_from(&mut probe)
    }

    /// `true` for the break code `0xFF`.
    #[must_use]
    pub fn is_break(&self) -> bool {
        self.major == MajorType::SimpleOrFloat && self.argument == Argument::Indefinite
    }

    /// The definite argument value, or `None` for indefinite/break.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        match self.argument {
            Argument::Value(v, _) => Some(v),
            Argument::Indefinite => None,
        }
    }

    /// Encoded size of this header in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self.argument {
            Argument::Value(_, width) => 1 + width.extra_bytes(),
            Argument::Indefinite => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(bytes: &[u8]) -> Result<Header, WireError> {
        Header::read_from(&mut ByteCursor::new(bytes))
    }

    #[test]
    fn immediate_values() {
        let h = read(&[0x17]).unwrap();
        assert_eq!(h.major, MajorType::UnsignedInteger);
        assert_eq!(h.argument, Argument::Value(23, ArgumentWidth::Immediate));
        assert_eq!(h.encoded_len(), 1);

        let h = read(&[0x20]).unwrap();
        assert_eq!(h.major, MajorType::NegativeInteger);
        assert_eq!(h.value(), Some(0));
    }

    #[test]
    fn extended_widths() {
        assert_eq!(read(&[0x18, 0xFF]).unwrap().value(), Some(255));
        assert_eq!(read(&[0x19, 0x01, 0x00]).unwrap().value(), Some(256));
        assert_eq!(
            read(&[0x1A, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap().value(),
            Some(u64::from(u32::MAX))
        );
        let h = read(&[0x1B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
        assert_eq!(h.value(), Some(u64::MAX));
        assert_eq!(h.encoded_len(), 9);
    }

    #[test]
    fn overlong_zero_is_accepted() {
        for bytes in [
            &[0x18, 0x00][..],
            &[0x19, 0x00, 0x00],
            &[0x1A, 0, 0, 0, 0],
            &[0x1B, 0, 0, 0, 0, 0, 0, 0, 0],
        ] {
            assert_eq!(read(bytes).unwrap().value(), Some(0), "bytes {bytes:02X?}");
        }
    }

    #[test]
    fn truncated_argument_is_eof() {
        assert!(matches!(
            read(&[0x19, 0x01]),
            Err(WireError::UnexpectedEof { offset: 1, needed: 2 })
        ));
        assert!(matches!(
            read(&[0x5B, 0, 0, 0]),
            Err(WireError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn reserved_info_rejected() {
        for byte in [0x1C, 0x3D, 0x5E, 0xFC] {
            assert!(
                matches!(read(&[byte]), Err(WireError::ReservedAdditionalInfo { offset: 0, .. })),
                "byte {byte:#04X}"
            );
        }
    }

    #[test]
    fn indefinite_only_where_allowed() {
        assert_eq!(read(&[0x5F]).unwrap().argument, Argument::Indefinite);
        assert_eq!(read(&[0x9F]).unwrap().major, MajorType::Array);
        assert!(read(&[0xFF]).unwrap().is_break());
        for byte in [0x1F, 0x3F, 0xDF] {
            assert!(
                matches!(read(&[byte]), Err(WireError::IllegalIndefinite { .. })),
                "byte {byte:#04X}"
            );
        }
    }

    #[test]
    fn peek_leaves_cursor_in_place() {
        let cursor = ByteCursor::new(&[0x19, 0x01, 0x00]);
        let h = Header::peek(&cursor).unwrap();
        assert_eq!(h.value(), Some(256));
        assert_eq!(cursor.offset(), 0);
    }
}
