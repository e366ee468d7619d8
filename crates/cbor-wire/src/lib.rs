#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod header;

pub use cursor::ByteCursor;
pub use error::WireError;
pub use header::{Argument, ArgumentWidth, Header, MajorType};
