//! Core types and utilities for the goprint generated-file printer.
//!
//! This crate provides the generation flag set and the file persistence
//! helpers shared by the assembler, the formatter and the CLI.

mod file;
mod mode;

// File operations
pub use file::{File, test_file_path, write_file};
// Generation flags
pub use mode::{Mode, ParseModeError};
