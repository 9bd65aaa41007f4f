use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Write `content` to `path`, creating missing parent directories.
///
/// New files are created with owner read/write permissions only. Existing
/// files are truncated and keep their permissions.
pub fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    Ok(())
}

/// Path of the companion test file for a generated file.
///
/// `dir/foo_gen.go` becomes `dir/foo_gen_test.go`. A path without an
/// extension gets `_test.go` appended.
pub fn test_file_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_test.{}", stem, ext.to_string_lossy()),
        None => format!("{}_test.go", stem),
    };
    path.with_file_name(name)
}

/// A generated file ready to be persisted.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: Vec<u8>,
}

impl File {
    /// Create a new file with the given path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, replacing whatever is on disk.
    pub fn write(&self) -> io::Result<()> {
        write_file(&self.path, &self.content)
    }
}
