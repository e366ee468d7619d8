use crate::error::WireError;

/// Bounds-checked, read-only view over an externally owned byte buffer.
///
/// The cursor is the single source of truth for "how many bytes remain".
/// It never copies the input: [`take`](Self::take) hands back sub-slices
/// that borrow from the original buffer for the full lifetime `'a`.
///
/// ```text
///   buf:    [ .. consumed .. | .. remaining .. ]
///           ^0               ^offset           ^buf.len()
/// ```
///
/// Invariant: `offset <= buf.len()` at all times. A read that would
/// cross the end fails with [`WireError::UnexpectedEof`] and leaves the
/// offset where it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the first byte of `buf`.
    ///
    /// Embedded zero bytes are ordinary data; the length of the slice is
    /// the only end marker.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Byte offset of the next read, measured from the start of the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying buffer, independent of the current offset.
    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Look at the next byte without consuming it.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if no bytes remain.
    pub fn peek_u8(&self) -> Result<u8, WireError> {
        self.buf
            .get(self.offset)
            .copied()
            .ok_or(WireError::UnexpectedEof {
                offset: self.offset,
                needed: 1,
            })
    }

    /// Consume one byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if no bytes remain.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let byte = self.peek_u8()?;
        self.offset += 1;
        Ok(byte)
    }

    /// Consume a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16_be(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Consume a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32_be(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Consume a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_u64_be(&mut self) -> Result<u64, WireError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Borrow the next `len` bytes and move past them.
    ///
    /// `len` is a wire length, so it is taken as `u64`. A length that does
    /// not even fit in `usize` can never be satisfied by an in-memory
    /// buffer and is reported as end-of-input.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn take(&mut self, len: u64) -> Result<&'a [u8], WireError> {
        let eof = WireError::UnexpectedEof {
            offset: self.offset,
            needed: len,
        };
        let len = usize::try_from(len).map_err(|_| eof.clone())?;
        if len > self.remaining() {
            return Err(eof);
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.buf[start..self.offset])
    }

    /// Move past the next `len` bytes without looking at them.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn skip(&mut self, len: u64) -> Result<(), WireError> {
        self.take(len).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let bytes = self.take(N as u64)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

// `take(N)` returns exactly N bytes or an error, so `copy_from_slice` in
// `read_array` never sees a length mismatch.
