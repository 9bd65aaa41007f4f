//! Test utilities for the printer.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::{Path, PathBuf};

use crate::{
    Error, Result,
    format::{ImportGrouper, ImportNormalizer, SectionPolicy},
    generation::ImportSpec,
    printer::{Printer, SourceFile},
};

/// A [`SourceFile`] whose generated code is fixed up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    package: String,
    imports: Vec<ImportSpec>,
    topics: Vec<String>,
    body: String,
    tests: String,
    failure: Option<String>,
}

impl StaticSource {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn import(mut self, import: ImportSpec) -> Self {
        self.imports.push(import);
        self
    }

    pub fn topic(mut self, decl: impl Into<String>) -> Self {
        self.topics.push(decl.into());
        self
    }

    pub fn body(mut self, code: impl Into<String>) -> Self {
        self.body.push_str(&code.into());
        self
    }

    pub fn tests(mut self, code: impl Into<String>) -> Self {
        self.tests.push_str(&code.into());
        self
    }

    /// Make [`SourceFile::print_to`] fail with `message`.
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl SourceFile for StaticSource {
    fn package(&self) -> &str {
        &self.package
    }

    fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    fn print_to(&self, printer: &mut Printer<'_>) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(Error::generate(message.clone()));
        }
        for topic in &self.topics {
            printer.topics().add(topic.clone());
        }
        printer.write_body(&self.body);
        printer.write_tests(&self.tests);
        Ok(())
    }
}

/// Normalizer that strips trailing whitespace from every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimNormalizer;

impl ImportNormalizer for TrimNormalizer {
    fn name(&self) -> &str {
        "trim"
    }

    fn normalize(&self, _path: &Path, src: &[u8]) -> Result<Vec<u8>> {
        let text = String::from_utf8_lossy(src);
        let mut out = text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
        if text.ends_with('\n') {
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

/// Normalizer that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNormalizer;

impl ImportNormalizer for FailingNormalizer {
    fn name(&self) -> &str {
        "failing-normalizer"
    }

    fn normalize(&self, path: &Path, _src: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Syntax {
            path: path.to_path_buf(),
            message: "normalizer rejected the file".to_string(),
        })
    }
}

/// Normalizer that fails for paths ending in the given suffix and passes
/// everything else through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct FailOnSuffix(pub &'static str);

impl ImportNormalizer for FailOnSuffix {
    fn name(&self) -> &str {
        "fail-on-suffix"
    }

    fn normalize(&self, path: &Path, src: &[u8]) -> Result<Vec<u8>> {
        if path.to_string_lossy().ends_with(self.0) {
            return Err(Error::Syntax {
                path: path.to_path_buf(),
                message: format!("refusing to format *{}", self.0),
            });
        }
        Ok(src.to_vec())
    }
}

/// Grouper that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingGrouper;

impl ImportGrouper for FailingGrouper {
    fn name(&self) -> &str {
        "failing-grouper"
    }

    fn reorder(&self, paths: &[PathBuf], _policy: &SectionPolicy) -> Result<()> {
        Err(Error::Syntax {
            path: paths.first().cloned().unwrap_or_default(),
            message: "grouper rejected the file".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_normalizer() {
        let out = TrimNormalizer
            .normalize(Path::new("x.go"), b"a  \nb\t\n")
            .unwrap();
        assert_eq!(out, b"a\nb\n");
    }

    #[test]
    fn test_fail_on_suffix() {
        let normalizer = FailOnSuffix("_test.go");
        assert!(normalizer.normalize(Path::new("a_test.go"), b"x").is_err());
        assert_eq!(normalizer.normalize(Path::new("a.go"), b"x").unwrap(), b"x");
    }
}
