#![warn(clippy::pedantic)]

pub mod error;
pub mod item;
pub mod length;
pub mod negative;
pub mod special;

pub use cbor_wire::MajorType;
pub use error::TypeError;
pub use item::Item;
pub use length::Length;
pub use negative::NegativeInt;
pub use special::Special;
