/// Default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Resource limits for a decode session.
///
/// The decoder itself has no other knobs: which buffer, and how deep it
/// may nest. The depth limit turns adversarial input such as a few
/// thousand `0x81` bytes into a [`DecodeError::NestingTooDeep`]
/// instead of a stack overflow.
///
/// [`DecodeError::NestingTooDeep`]: crate::DecodeError::NestingTooDeep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of simultaneously open arrays/maps. Top-level items
    /// sit at depth 0; the children of a top-level array at depth 1.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
