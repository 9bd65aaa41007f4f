//! Formatting pipeline for generated files.
//!
//! A file is either written verbatim or passed through two stages:
//!
//! 1. [`ImportNormalizer`] - drops unused imports and applies gofmt layout,
//!    the result is written to disk
//! 2. [`ImportGrouper`] - rewrites the file so imports follow a [`SectionPolicy`]
//!
//! The stages are not transactional: when grouping fails the normalized file
//! is already on disk.

mod group;
mod normalize;
mod sections;
mod stdlib;
mod tool;

use std::{path::Path, sync::Arc};

use goprint_core::File;
use tracing::debug;

pub use group::{GciCommand, ImportGrouper, SectionGrouper, regroup};
pub use normalize::{GoImports, ImportNormalizer};
pub use sections::{ORG_MODULE_PREFIX, ORG_PREFIX, Section, SectionPolicy};

use crate::{Error, Result};

/// Writes generated files, formatting them unless disabled.
///
/// Cheap to clone; the tools are shared behind `Arc`s so a clone can be moved
/// onto a worker thread.
#[derive(Clone)]
pub struct Formatter {
    skip_format: bool,
    normalizer: Arc<dyn ImportNormalizer>,
    grouper: Arc<dyn ImportGrouper>,
    policy: SectionPolicy,
}

impl Formatter {
    /// Formatter using the given tools and the fixed Algorand section policy.
    pub fn new(
        normalizer: impl ImportNormalizer + 'static,
        grouper: impl ImportGrouper + 'static,
    ) -> Self {
        Self {
            skip_format: false,
            normalizer: Arc::new(normalizer),
            grouper: Arc::new(grouper),
            policy: SectionPolicy::algorand(),
        }
    }

    /// Formatter that writes bytes exactly as assembled.
    pub fn verbatim() -> Self {
        Self::default().skip_format(true)
    }

    /// Disable (or re-enable) the normalization and grouping stages.
    pub fn skip_format(mut self, skip: bool) -> Self {
        self.skip_format = skip;
        self
    }

    pub fn skips_format(&self) -> bool {
        self.skip_format
    }

    /// Format `data` and write it to `path`.
    pub fn format(&self, path: &Path, data: &[u8]) -> Result<()> {
        if self.skip_format {
            debug!(path = %path.display(), "writing without formatting");
            return write(path, data);
        }

        debug!(path = %path.display(), tool = self.normalizer.name(), "normalizing imports");
        let normalized = self.normalizer.normalize(path, data)?;
        write(path, &normalized)?;

        debug!(path = %path.display(), tool = self.grouper.name(), "grouping imports");
        self.grouper.reorder(&[path.to_path_buf()], &self.policy)
    }
}

impl Default for Formatter {
    /// `goimports` followed by the in-process [`SectionGrouper`].
    fn default() -> Self {
        Self::new(GoImports::new(), SectionGrouper)
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("skip_format", &self.skip_format)
            .field("normalizer", &self.normalizer.name())
            .field("grouper", &self.grouper.name())
            .field("policy", &self.policy)
            .finish()
    }
}

fn write(path: &Path, data: &[u8]) -> Result<()> {
    File::new(path, data).write().map_err(|e| Error::write(path, e))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::testing::{FailingGrouper, FailingNormalizer, TrimNormalizer};

    const SRC: &[u8] = b"package p\n\nimport (\n\t\"zzz.io/b\"   \n\t\"fmt\"\n)\n";

    #[test]
    fn test_skip_format_writes_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen.go");

        Formatter::verbatim().format(&path, SRC).unwrap();

        assert_eq!(fs::read(&path).unwrap(), SRC);
    }

    #[test]
    fn test_skip_format_never_runs_tools() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen.go");

        Formatter::new(FailingNormalizer, FailingGrouper)
            .skip_format(true)
            .format(&path, SRC)
            .unwrap();

        assert_eq!(fs::read(&path).unwrap(), SRC);
    }

    #[test]
    fn test_format_normalizes_then_groups() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen.go");

        Formatter::new(TrimNormalizer, SectionGrouper)
            .format(&path, SRC)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "package p\n\nimport (\n\t\"fmt\"\n\n\t\"zzz.io/b\"\n)\n"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen.go");
        let formatter = Formatter::new(TrimNormalizer, SectionGrouper);

        formatter.format(&path, SRC).unwrap();
        let first = fs::read(&path).unwrap();
        formatter.format(&path, &first).unwrap();

        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_normalizer_failure_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen.go");

        let err = Formatter::new(FailingNormalizer, SectionGrouper)
            .format(&path, SRC)
            .unwrap_err();

        assert!(matches!(err, Error::Syntax { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_grouper_failure_leaves_normalized_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen.go");

        let err = Formatter::new(TrimNormalizer, FailingGrouper)
            .format(&path, SRC)
            .unwrap_err();

        assert!(matches!(err, Error::Syntax { .. }));
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("\t\"zzz.io/b\"\n\t\"fmt\"\n"));
    }

    #[test]
    fn test_debug_names_tools() {
        let dbg = format!("{:?}", Formatter::default());
        assert!(dbg.contains("goimports"));
        assert!(dbg.contains("section-grouper"));
    }
}
