use cbor_types::{Item, Length, MajorType, NegativeInt, Special};
use cbor_wire::{ByteCursor, Header};
use log::{debug, trace};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::frame::{Frame, FrameStack};
use crate::strings::Chunks;

/// Pull cursor over a sequence of encoded items.
///
/// The cursor exposes "the item here" without building a tree. Scalar
/// accessors are pure reads; moving on is always explicit:
///
/// ```text
///   ItemCursor::new(buf)
///     │
///     ├── item() / current_type() / as_u64() ...   inspect, no movement
///     ├── advance()                                skip item, next sibling
///     ├── read_byte_string() / read_text()         assemble, next sibling
///     ├── unwrap_tag()                             step onto tagged item
///     └── enter_container() ──► child cursor
///                                  │ ... iterate children ...
///         leave_container(child) ◄─┘  parent moves past the container
/// ```
///
/// Each cursor owns the [`Frame`] of its nesting level, so a chain of
/// parent/child cursors *is* the frame stack of a recursive walk. The
/// input buffer is only ever borrowed, so independent cursors over the
/// same bytes can be used from different threads.
///
/// # Example
///
/// ```rust
/// use cbor_decoder::ItemCursor;
///
/// // [1, [2, 3]]
/// let bytes = [0x82, 0x01, 0x82, 0x02, 0x03];
/// let mut top = ItemCursor::new(&bytes).unwrap();
/// let mut outer = top.enter_container().unwrap();
/// assert_eq!(outer.as_u64(), Some(1));
/// outer.advance().unwrap();
/// assert!(outer.is_container());
/// outer.advance().unwrap();
/// assert!(outer.at_end());
/// top.leave_container(outer).unwrap();
/// assert!(top.at_end());
/// ```
#[derive(Clone, Debug)]
pub struct ItemCursor<'a> {
    /// Positioned just past the current item's header, or past the
    /// frame's terminator once at end.
    bytes: ByteCursor<'a>,
    frame: Frame,
    current: Option<Current>,
    depth: usize,
    config: DecoderConfig,
}

#[derive(Clone, Copy, Debug)]
struct Current {
    header: Header,
    item: Item,
}

impl<'a> ItemCursor<'a> {
    /// Start a decode session over `buf` with default limits.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfInput`] for an empty buffer, plus any error
    /// decoding the first item's header.
    pub fn new(buf: &'a [u8]) -> Result<Self, DecodeError> {
        Self::with_config(buf, DecoderConfig::default())
    }

    /// Start a decode session over `buf`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_config(buf: &'a [u8], config: DecoderConfig) -> Result<Self, DecodeError> {
        if buf.is_empty() {
            return Err(DecodeError::EndOfInput { offset: 0 });
        }
        let mut cursor = Self {
            bytes: ByteCursor::new(buf),
            frame: Frame::top_level(),
            current: None,
            depth: 0,
            config,
        };
        cursor.load()?;
        Ok(cursor)
    }

    // ── Inspection ──────────────────────────────────────────────────────

    /// The current item, or `None` at the end of this level.
    #[must_use]
    pub fn item(&self) -> Option<Item> {
        self.current.map(|c| c.item)
    }

    /// The raw header of the current item, including its encoded width.
    #[must_use]
    pub fn header(&self) -> Option<Header> {
        self.current.map(|c| c.header)
    }

    #[must_use]
    pub fn current_type(&self) -> Option<MajorType> {
        self.current.map(|c| c.item.major_type())
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.item().is_some_and(|item| item.is_container())
    }

    /// `false` for indefinite-length strings and containers.
    #[must_use]
    pub fn is_length_known(&self) -> bool {
        self.item().is_some_and(|item| item.is_length_known())
    }

    /// Offset of the current item's first byte, or of the end position.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.current.map_or(self.bytes.offset(), |c| c.header.offset)
    }

    /// Number of containers enclosing this cursor's items.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self.item()? {
            Item::Unsigned(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_negative(&self) -> Option<NegativeInt> {
        match self.item()? {
            Item::Negative(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tag(&self) -> Option<u64> {
        match self.item()? {
            Item::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_special(&self) -> Option<Special> {
        match self.item()? {
            Item::Special(special) => Some(special),
            _ => None,
        }
    }

    /// Total length of the current string across all its chunks. Does
    /// not move the cursor.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] if the current item is not a
    /// string, otherwise any error found while walking the chunks.
    pub fn string_length(&self) -> Result<u64, DecodeError> {
        let (kind, len) = self.expect_string(None)?;
        let mut probe = self.bytes;
        Chunks::new(&mut probe, kind, len).total_len()
    }

    // ── Movement ────────────────────────────────────────────────────────

    /// Skip the current item, including everything nested in it, and
    /// move to the next sibling. A no-op at the end of the level.
    ///
    /// # Errors
    ///
    /// Any structural error inside the skipped item, or while decoding
    /// the next sibling's header.
    pub fn advance(&mut self) -> Result<(), DecodeError> {
        let Some(current) = self.current else {
            return Ok(());
        };
        self.skip_value(current)?;
        self.load()
    }

    /// Assemble the current byte string and move to the next sibling.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] if the current item is not a byte
    /// string; otherwise see [`Chunks::assemble`].
    pub fn read_byte_string(&mut self) -> Result<Vec<u8>, DecodeError> {
        self.read_string(MajorType::ByteString)
    }

    /// Assemble the current text string without validating it, and move
    /// to the next sibling.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] if the current item is not a text
    /// string; otherwise see [`Chunks::assemble`].
    pub fn read_text_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        self.read_string(MajorType::TextString)
    }

    /// Assemble the current text string as UTF-8 and move to the next
    /// sibling.
    ///
    /// # Errors
    ///
    /// As [`read_text_bytes`](Self::read_text_bytes), plus
    /// [`DecodeError::InvalidCharacterData`] if the bytes are not UTF-8.
    pub fn read_text(&mut self) -> Result<String, DecodeError> {
        let offset = self.offset();
        let bytes = self.read_text_bytes()?;
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidCharacterData { offset })
    }

    /// Consume the current tag's header and make the tagged item current.
    ///
    /// Tag and content count as one item of the enclosing level, so the
    /// frame is not charged again. Returns the tag number.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] if the current item is not a tag;
    /// [`DecodeError::EndOfInput`] if nothing follows the tag;
    /// [`DecodeError::MalformedStructure`] if a break follows it.
    pub fn unwrap_tag(&mut self) -> Result<u64, DecodeError> {
        let Some(tag) = self.as_tag() else {
            return Err(DecodeError::unexpected(self.offset(), "tag", self.current_type()));
        };
        let header = Header::read_from(&mut self.bytes)?;
        let item = Item::from_header(&header)?;
        trace!("tag {tag} wraps {item:?} at offset {}", header.offset);
        self.current = Some(Current { header, item });
        Ok(tag)
    }

    /// Open the current array or map and return a cursor over its
    /// children, positioned on the first child (or already at end).
    ///
    /// The parent is not moved; hand the child back to
    /// [`leave_container`](Self::leave_container) to continue.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnexpectedType`] if the current item is not a
    ///   container.
    /// - [`DecodeError::NestingTooDeep`] past the configured depth.
    /// - Any error decoding the first child's header.
    pub fn enter_container(&self) -> Result<ItemCursor<'a>, DecodeError> {
        let offset = self.offset();
        let frame = match self.item() {
            Some(Item::Array(len)) => Frame::array(len),
            Some(Item::Map(len)) => Frame::map(len, offset)?,
            _ => return Err(DecodeError::unexpected(offset, "container", self.current_type())),
        };
        let depth = self.depth + 1;
        if depth > self.config.max_depth {
            debug!("nesting limit {} hit at offset {offset}", self.config.max_depth);
            return Err(DecodeError::NestingTooDeep {
                offset,
                limit: self.config.max_depth,
            });
        }
        debug!("enter {:?} at offset {offset} (depth {depth})", frame.kind());

        let mut child = ItemCursor {
            bytes: self.bytes,
            frame,
            current: None,
            depth,
            config: self.config,
        };
        child.load()?;
        Ok(child)
    }

    /// Close a child cursor obtained from
    /// [`enter_container`](Self::enter_container) and move this cursor to
    /// the container's next sibling.
    ///
    /// Children the caller did not visit are skipped, and the break code
    /// of an indefinite-length container is consumed.
    ///
    /// # Errors
    ///
    /// Any structural error in the remaining children, or while decoding
    /// the next sibling's header.
    pub fn leave_container(&mut self, mut child: ItemCursor<'a>) -> Result<(), DecodeError> {
        debug_assert_eq!(child.depth, self.depth + 1, "child from a different level");
        while !child.at_end() {
            child.advance()?;
        }
        debug!("leave container at offset {} (depth {})", child.bytes.offset(), child.depth);
        self.bytes = child.bytes;
        self.load()
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Decode the next header of this level into `current`.
    fn load(&mut self) -> Result<(), DecodeError> {
        self.current = match self.frame.next_header(&mut self.bytes)? {
            Some(header) => {
                let item = Item::from_header(&header)?;
                trace!("item {item:?} at offset {} (depth {})", header.offset, self.depth);
                Some(Current { header, item })
            }
            None => None,
        };
        Ok(())
    }

    fn expect_string(&self, want: Option<MajorType>) -> Result<(MajorType, Length), DecodeError> {
        let found = match self.item() {
            Some(Item::ByteString(len)) => Some((MajorType::ByteString, len)),
            Some(Item::TextString(len)) => Some((MajorType::TextString, len)),
            _ => None,
        };
        match found {
            Some((kind, len)) if want.is_none_or(|w| w == kind) => Ok((kind, len)),
            _ => Err(DecodeError::unexpected(
                self.offset(),
                want.map_or("string", MajorType::name),
                self.current_type(),
            )),
        }
    }

    fn read_string(&mut self, kind: MajorType) -> Result<Vec<u8>, DecodeError> {
        let (kind, len) = self.expect_string(Some(kind))?;
        let out = Chunks::new(&mut self.bytes, kind, len).assemble()?;
        self.load()?;
        Ok(out)
    }

    /// Move `bytes` past the payload of `first`, whose header has already
    /// been consumed. Containers are walked with an explicit frame stack
    /// and tag chains with a loop, so nothing here recurses.
    fn skip_value(&mut self, first: Current) -> Result<(), DecodeError> {
        let mut stack = FrameStack::new(self.config.max_depth.saturating_sub(self.depth));
        let mut item = first.item;
        let mut offset = first.header.offset;

        loop {
            match item {
                Item::ByteString(len) => {
                    Chunks::new(&mut self.bytes, MajorType::ByteString, len).skip_all()?;
                }
                Item::TextString(len) => {
                    Chunks::new(&mut self.bytes, MajorType::TextString, len).skip_all()?;
                }
                Item::Array(len) => stack.push(Frame::array(len), offset)?,
                Item::Map(len) => stack.push(Frame::map(len, offset)?, offset)?,
                Item::Tag(_) => {
                    let header = Header::read_from(&mut self.bytes)?;
                    item = Item::from_header(&header)?;
                    offset = header.offset;
                    continue;
                }
                Item::Unsigned(_) | Item::Negative(_) | Item::Special(_) => {}
            }

            // Find the next pending item in the innermost open frame.
            loop {
                let Some(frame) = stack.top_mut() else {
                    return Ok(());
                };
                if let Some(header) = frame.next_header(&mut self.bytes)? {
                    item = Item::from_header(&header)?;
                    offset = header.offset;
                    break;
                }
                stack.pop();
            }
        }
    }
}
