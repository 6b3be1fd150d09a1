//! Shared building blocks for the device API crates.

pub mod types;
pub mod utils;
