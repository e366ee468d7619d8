#![warn(clippy::pedantic)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod strings;

pub use config::DecoderConfig;
pub use cursor::ItemCursor;
pub use error::{DecodeError, ErrorKind, Malformed};
pub use frame::{Frame, FrameKind, FrameStack, Remaining};
pub use strings::Chunks;
