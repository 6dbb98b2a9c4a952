// src/config/mod.rs

//! Command source.
//!
//! Turns the JSON command stream into a [`CommandList`](crate::types::CommandList).
//! Parsing the stream is the only fallible step before launching starts.

pub mod loader;

pub use loader::{load_from_path, load_from_reader, STDIN_PATH};
