#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod escape;
pub mod render;
pub mod special;

pub use config::{DiagConfig, InvalidTextPolicy};
pub use error::DiagFailure;
pub use render::{DiagRenderer, diagnostic};
