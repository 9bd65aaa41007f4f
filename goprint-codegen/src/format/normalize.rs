//! Import normalization (unused import removal plus gofmt layout).

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use super::tool;
use crate::Result;

/// Cleans up the imports of a Go source file and applies standard layout.
pub trait ImportNormalizer: Send + Sync {
    /// Tool name for logs and errors.
    fn name(&self) -> &str;

    /// Return the normalized form of `src`, which will be written to `path`.
    fn normalize(&self, path: &Path, src: &[u8]) -> Result<Vec<u8>>;
}

/// Normalizer backed by the `goimports` binary.
#[derive(Debug, Clone)]
pub struct GoImports {
    program: PathBuf,
}

impl GoImports {
    pub fn new() -> Self {
        Self::with_program("goimports")
    }

    /// Use a specific `goimports` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for GoImports {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportNormalizer for GoImports {
    fn name(&self) -> &str {
        "goimports"
    }

    fn normalize(&self, path: &Path, src: &[u8]) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.program);
        // -srcdir lets goimports resolve sibling packages of the target file.
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.arg("-srcdir").arg(dir);
        }
        tool::run(command, self.name(), path, Some(src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_missing_program_is_spawn_error() {
        let normalizer = GoImports::with_program("/nonexistent/bin/goimports");
        let err = normalizer
            .normalize(Path::new("out/gen.go"), b"package p\n")
            .unwrap_err();

        assert!(matches!(err, Error::ToolSpawn { ref tool, .. } if tool == "goimports"));
    }

    #[test]
    fn test_default_program() {
        assert_eq!(GoImports::default().program(), Path::new("goimports"));
    }
}
