//! Boundary with the body generator.

use goprint_core::Mode;

use crate::{
    Result,
    generation::{ImportSpec, Topics},
};

/// A parsed Go source file that knows how to print its generated code.
///
/// Implemented by the front end that parsed the input file; the printer only
/// needs the package name, the declared imports and the ability to fill the
/// output sinks.
pub trait SourceFile {
    /// Package clause of the input file.
    fn package(&self) -> &str;

    /// Imports declared by the input file, in source order.
    fn imports(&self) -> &[ImportSpec];

    /// Write generated code into the printer's sinks.
    ///
    /// An error aborts the whole print; nothing reaches storage.
    fn print_to(&self, printer: &mut Printer<'_>) -> Result<()>;
}

/// Output sinks handed to [`SourceFile::print_to`].
pub struct Printer<'a> {
    mode: Mode,
    topics: &'a mut Topics,
    body: &'a mut Vec<u8>,
    tests: Option<&'a mut Vec<u8>>,
}

impl<'a> Printer<'a> {
    pub fn new(
        mode: Mode,
        topics: &'a mut Topics,
        body: &'a mut Vec<u8>,
        tests: Option<&'a mut Vec<u8>>,
    ) -> Self {
        Self {
            mode,
            topics,
            body,
            tests,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Declarations shared by several bodies.
    pub fn topics(&mut self) -> &mut Topics {
        self.topics
    }

    /// Sink for the implementation file body.
    pub fn body(&mut self) -> &mut Vec<u8> {
        self.body
    }

    /// Sink for the test file body; `None` unless tests were requested.
    pub fn tests(&mut self) -> Option<&mut Vec<u8>> {
        self.tests.as_deref_mut()
    }

    /// Append `code` to the body.
    pub fn write_body(&mut self, code: &str) {
        self.body.extend_from_slice(code.as_bytes());
    }

    /// Append `code` to the test body. Dropped when there is no test file.
    pub fn write_tests(&mut self, code: &str) {
        if let Some(tests) = self.tests.as_deref_mut() {
            tests.extend_from_slice(code.as_bytes());
        }
    }
}
