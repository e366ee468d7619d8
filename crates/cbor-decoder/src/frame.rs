use cbor_types::{Length, MajorType};
use cbor_wire::{ByteCursor, Header};

use crate::error::{DecodeError, Malformed};

/// What a frame is iterating over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// The concatenated stream of top-level items.
    TopLevel,
    Array,
    /// Items are consumed as key, value, key, value, ...
    Map,
    /// The chunks of an indefinite-length byte or text string.
    Chunks(MajorType),
}

/// How a frame knows it is finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Remaining {
    /// Declared count of items still to read. Closed at zero.
    Known(u64),
    /// Closed by a break code read at this level.
    Indefinite,
    /// Closed when the buffer runs out (top level only).
    Unbounded,
    /// The terminating break (or end of buffer) has been consumed.
    Closed,
}

/// Per-nesting-level bookkeeping for one container, streamed string or
/// the top level.
///
/// [`next_header`](Self::next_header) is the one routine that decides
/// "is there another item here, and if so what is it". Arrays, maps,
/// streamed strings and container skipping all go through it, so the two
/// length disciplines are enforced in exactly one place:
///
/// ```text
/// ┌────────────┬────────────────┬──────────────────────────────────┐
/// │ Remaining  │ Next byte 0xFF │ Otherwise                        │
/// ├────────────┼────────────────┼──────────────────────────────────┤
/// │ Known(0)   │ (not read)     │ (not read) → end                 │
/// │ Known(n)   │ malformed      │ item, n - 1 left                 │
/// │ Indefinite │ end, consumed  │ item                             │
/// │ Unbounded  │ malformed      │ item, or end if buffer is empty  │
/// │ Closed     │ (not read)     │ (not read) → end                 │
/// └────────────┴────────────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    kind: FrameKind,
    remaining: Remaining,
    /// Items produced so far; only the parity matters, for maps.
    produced: u64,
}

impl Frame {
    #[must_use]
    pub fn top_level() -> Self {
        Self::new(FrameKind::TopLevel, Remaining::Unbounded)
    }

    #[must_use]
    pub fn array(len: Length) -> Self {
        Self::new(FrameKind::Array, remaining_for(len.definite()))
    }

    /// A map of `len` pairs, i.e. `2 * len` items.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfInput`] if `2 * len` overflows: no buffer can
    /// hold that many items, so the map is necessarily truncated.
    pub fn map(len: Length, offset: usize) -> Result<Self, DecodeError> {
        let items = match len {
            Length::Definite(pairs) => Some(
                pairs
                    .checked_mul(2)
                    .ok_or(DecodeError::EndOfInput { offset })?,
            ),
            Length::Indefinite => None,
        };
        Ok(Self::new(FrameKind::Map, remaining_for(items)))
    }

    /// The chunk sequence of an indefinite-length string of `kind`.
    #[must_use]
    pub fn chunks(kind: MajorType) -> Self {
        Self::new(FrameKind::Chunks(kind), Remaining::Indefinite)
    }

    fn new(kind: FrameKind, remaining: Remaining) -> Self {
        Self {
            kind,
            remaining,
            produced: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    #[must_use]
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    #[must_use]
    pub fn is_length_known(&self) -> bool {
        matches!(self.remaining, Remaining::Known(_))
    }

    /// Read the header of the next item in this frame, or `None` once the
    /// frame is finished. A terminating break code is consumed.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EndOfInput`] if the buffer ends before the frame
    ///   is finished.
    /// - [`DecodeError::MalformedStructure`] for a break code in a
    ///   known-length or top-level frame, or an indefinite map closed
    ///   after a key.
    /// - Header errors from [`Header::read_from`].
    pub fn next_header(
        &mut self,
        bytes: &mut ByteCursor<'_>,
    ) -> Result<Option<Header>, DecodeError> {
        match self.remaining {
            Remaining::Closed | Remaining::Known(0) => Ok(None),
            Remaining::Known(n) => {
                let header = Header::read_from(bytes)?;
                if header.is_break() {
                    return Err(DecodeError::malformed(
                        header.offset,
                        Malformed::UnexpectedBreak,
                    ));
                }
                self.remaining = Remaining::Known(n - 1);
                self.produced += 1;
                Ok(Some(header))
            }
            Remaining::Indefinite => {
                let header = Header::read_from(bytes)?;
                if header.is_break() {
                    if self.kind == FrameKind::Map && self.produced % 2 == 1 {
                        return Err(DecodeError::malformed(
                            header.offset,
                            Malformed::MissingMapValue,
                        ));
                    }
                    self.remaining = Remaining::Closed;
                    return Ok(None);
                }
                self.produced += 1;
                Ok(Some(header))
            }
            Remaining::Unbounded => {
                if bytes.is_empty() {
                    self.remaining = Remaining::Closed;
                    return Ok(None);
                }
                let header = Header::read_from(bytes)?;
                if header.is_break() {
                    return Err(DecodeError::malformed(
                        header.offset,
                        Malformed::UnexpectedBreak,
                    ));
                }
                self.produced += 1;
                Ok(Some(header))
            }
        }
    }
}

fn remaining_for(count: Option<u64>) -> Remaining {
    count.map_or(Remaining::Indefinite, Remaining::Known)
}

/// Explicit stack of open frames, bounded by a depth limit.
///
/// Used to walk past whole containers without recursing, so skipping a
/// deeply nested value costs heap, not call stack, and still stops at
/// the configured limit.
#[derive(Debug)]
pub struct FrameStack {
    frames: Vec<Frame>,
    limit: usize,
}

impl FrameStack {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit,
        }
    }

    /// Open a new nesting level.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NestingTooDeep`] if `limit` frames are already open.
    pub fn push(&mut self, frame: Frame, offset: usize) -> Result<(), DecodeError> {
        if self.frames.len() >= self.limit {
            return Err(DecodeError::NestingTooDeep {
                offset,
                limit: self.limit,
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn drain(frame: &mut Frame, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        let mut seen = Vec::new();
        while let Some(header) = frame.next_header(&mut cursor)? {
            seen.push(u8::try_from(header.value().unwrap_or(0xFF)).unwrap_or(0xFF));
        }
        Ok(seen)
    }

    #[test]
    fn known_length_stops_at_count() {
        let mut frame = Frame::array(Length::Definite(2));
        assert_eq!(drain(&mut frame, &[0x01, 0x02, 0x03]).unwrap(), vec![1, 2]);
        assert_eq!(frame.remaining(), Remaining::Known(0));
    }

    #[test]
    fn length_discipline_follows_constructor() {
        assert!(Frame::array(Length::Definite(3)).is_length_known());
        assert!(Frame::map(Length::Definite(1), 0).unwrap().is_length_known());
        assert!(!Frame::array(Length::Indefinite).is_length_known());
        assert!(!Frame::chunks(MajorType::TextString).is_length_known());
        assert!(!Frame::top_level().is_length_known());
    }

    #[test]
    fn known_length_rejects_break() {
        let mut frame = Frame::array(Length::Definite(2));
        let err = drain(&mut frame, &[0x01, 0xFF]).unwrap_err();
        assert_eq!(err, DecodeError::malformed(1, Malformed::UnexpectedBreak));
    }

    #[test]
    fn indefinite_consumes_break() {
        let mut frame = Frame::array(Length::Indefinite);
        let mut cursor = ByteCursor::new(&[0x01, 0xFF, 0x05]);
        assert!(frame.next_header(&mut cursor).unwrap().is_some());
        assert!(frame.next_header(&mut cursor).unwrap().is_none());
        assert_eq!(cursor.offset(), 2);
        // stays closed
        assert!(frame.next_header(&mut cursor).unwrap().is_none());
        assert_eq!(frame.remaining(), Remaining::Closed);
    }

    #[test]
    fn indefinite_without_break_is_eof() {
        let mut frame = Frame::array(Length::Indefinite);
        let err = drain(&mut frame, &[0x01, 0x02]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndOfInput);
    }

    #[test]
    fn map_counts_pairs() {
        let mut frame = Frame::map(Length::Definite(1), 0).unwrap();
        assert_eq!(drain(&mut frame, &[0x01, 0x02, 0x03]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn map_pair_overflow_is_eof() {
        let err = Frame::map(Length::Definite(u64::MAX), 9).unwrap_err();
        assert_eq!(err, DecodeError::EndOfInput { offset: 9 });
    }

    #[test]
    fn indefinite_map_needs_even_items() {
        let mut frame = Frame::map(Length::Indefinite, 0).unwrap();
        let err = drain(&mut frame, &[0x01, 0xFF]).unwrap_err();
        assert_eq!(err, DecodeError::malformed(1, Malformed::MissingMapValue));
    }

    #[test]
    fn top_level_ends_with_buffer() {
        let mut frame = Frame::top_level();
        assert_eq!(drain(&mut frame, &[0x01, 0x02]).unwrap(), vec![1, 2]);
        let mut frame = Frame::top_level();
        let err = drain(&mut frame, &[0x01, 0xFF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
    }

    #[test]
    fn stack_enforces_limit() {
        let mut stack = FrameStack::new(2);
        stack.push(Frame::array(Length::Definite(1)), 0).unwrap();
        stack.push(Frame::array(Length::Definite(1)), 1).unwrap();
        assert_eq!(stack.depth(), 2);
        let err = stack.push(Frame::array(Length::Definite(1)), 2).unwrap_err();
        assert_eq!(err, DecodeError::NestingTooDeep { offset: 2, limit: 2 });
        stack.pop();
        assert!(!stack.is_empty());
        assert!(stack.top_mut().is_some());
    }
}
