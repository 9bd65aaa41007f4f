//! Generated-file assembly and formatting for the goprint code generator.
//!
//! This crate takes an already-parsed Go source file and writes the
//! generated implementation file (and optionally its `_test.go` companion):
//! deterministic headers, deduplicated imports, the generated body, then
//! import normalization and grouping.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented text building (CodeBuilder, Indent)
//! - [`generation`] - Headers, import specs and topics
//! - [`printer`] - Boundary with the body generator (SourceFile, Printer)
//! - [`assemble`] - Buffer assembly for both output files
//! - [`format`] - Formatting pipeline (Formatter, normalizers, groupers)
//! - [`print`] - Top-level orchestration (FilePrinter, FormatTask)
//! - [`testing`] - Test utilities (feature-gated)

pub mod assemble;
pub mod builder;
mod error;
pub mod format;
pub mod generation;
pub mod print;
pub mod printer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use assemble::{Assembled, generate};
pub use error::{Error, Result};
pub use format::Formatter;
pub use print::{FilePrinter, FormatTask, LogFn, print_file, tracing_log};
pub use printer::{Printer, SourceFile};
