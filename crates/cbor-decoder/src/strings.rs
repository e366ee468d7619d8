use cbor_types::{Length, MajorType};
use cbor_wire::{Argument, ByteCursor};

use crate::error::{DecodeError, Malformed};
use crate::frame::Frame;

/// Iterator over the byte runs that make up one string item.
///
/// A definite-length string is a single run. An indefinite-length
/// string is a sequence of definite-length chunks of the same string
/// kind, closed by a break code:
///
/// ```text
///   7F  63 "Hel"  62 "lo"  FF     →  "Hel", "lo"
///   65 "Hello"                    →  "Hello"
/// ```
///
/// Chunks borrow from the input buffer. The iterator advances the
/// underlying cursor as it goes and stops after the first error.
/// Text chunks are not checked for UTF-8 here.
pub struct Chunks<'c, 'a> {
    bytes: &'c mut ByteCursor<'a>,
    kind: MajorType,
    state: ChunkState,
}

enum ChunkState {
    Single(u64),
    Streamed(Frame),
    Done,
}

impl<'c, 'a> Chunks<'c, 'a> {
    /// `bytes` must sit just past the string's header; `kind` is
    /// [`MajorType::ByteString`] or [`MajorType::TextString`].
    pub fn new(bytes: &'c mut ByteCursor<'a>, kind: MajorType, len: Length) -> Self {
        let state = match len {
            Length::Definite(n) => ChunkState::Single(n),
            Length::Indefinite => ChunkState::Streamed(Frame::chunks(kind)),
        };
        Self { bytes, kind, state }
    }

    /// Concatenate every chunk into one owned buffer.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EndOfInput`] if a chunk or the break is missing.
    /// - [`DecodeError::MalformedStructure`] for a chunk of the wrong kind
    ///   or a nested indefinite chunk.
    pub fn assemble(self) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        for chunk in self {
            out.extend_from_slice(chunk?);
        }
        Ok(out)
    }

    /// Total byte length across all chunks, without copying.
    ///
    /// # Errors
    ///
    /// Same as [`assemble`](Self::assemble).
    pub fn total_len(self) -> Result<u64, DecodeError> {
        let mut total = 0u64;
        for chunk in self {
            // A slice length always fits u64 and the sum never exceeds the
            // buffer length, so this cannot overflow.
            total += chunk?.len() as u64;
        }
        Ok(total)
    }

    /// Walk past the whole string.
    ///
    /// # Errors
    ///
    /// Same as [`assemble`](Self::assemble).
    pub fn skip_all(self) -> Result<(), DecodeError> {
        for chunk in self {
            chunk?;
        }
        Ok(())
    }

    fn next_chunk(&mut self) -> Result<Option<&'a [u8]>, DecodeError> {
        match &mut self.state {
            ChunkState::Done => Ok(None),
            ChunkState::Single(len) => {
                let len = *len;
                self.state = ChunkState::Done;
                Ok(Some(self.bytes.take(len)?))
            }
            ChunkState::Streamed(frame) => {
                let Some(header) = frame.next_header(self.bytes)? else {
                    self.state = ChunkState::Done;
                    return Ok(None);
                };
                if header.major != self.kind {
                    return Err(DecodeError::malformed(
                        header.offset,
                        Malformed::WrongChunkKind,
                    ));
                }
                match header.argument {
                    Argument::Value(len, _) => Ok(Some(self.bytes.take(len)?)),
                    Argument::Indefinite => Err(DecodeError::malformed(
                        header.offset,
                        Malformed::IndefiniteChunk,
                    )),
                }
            }
        }
    }
}

impl<'a> Iterator for Chunks<'_, 'a> {
    type Item = Result<&'a [u8], DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(chunk) => chunk.map(Ok),
            Err(err) => {
                self.state = ChunkState::Done;
                Some(Err(err))
            }
        }
    }
}
