//! Storage layer for holiday-export
//!
//! Filesystem primitives used by the write stage: recursive directory
//! creation and atomic whole-file writes.

pub mod file_io;

pub use file_io::{ensure_dir, write_atomic};
