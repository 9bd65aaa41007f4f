//! Check command report data structures.

use std::path::PathBuf;

use goprint_core::Mode;

use super::output::{Output, Report};

/// What printing a description would produce.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the description.
    pub input: PathBuf,
    pub package: String,
    /// Resolved generation flags.
    pub mode: Mode,
    pub main_path: PathBuf,
    /// Assembled size of the main file, before formatting.
    pub main_size: usize,
    pub test_path: Option<PathBuf>,
    pub test_size: Option<usize>,
    /// Import lines of the main file, in emission order.
    pub imports: Vec<String>,
    /// Number of topic declarations.
    pub topics: usize,
    pub warnings: Vec<String>,
    /// Assembled main file, when requested.
    pub preview: Option<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        out.newline();

        out.key_value("package", &self.package);
        out.key_value("mode", &self.mode.to_string());
        out.key_value("topics", &self.topics.to_string());
        out.newline();

        out.section("Imports");
        for import in &self.imports {
            out.list_item(import);
        }
        out.newline();

        out.section("Files");
        out.added_item(&format!(
            "{} ({} bytes)",
            self.main_path.display(),
            self.main_size
        ));
        if let (Some(path), Some(size)) = (&self.test_path, self.test_size) {
            out.added_item(&format!("{} ({} bytes)", path.display(), size));
        }

        if let Some(preview) = &self.preview {
            out.newline();
            out.divider(&self.main_path.display().to_string());
            out.preformatted(preview.trim_end());
        }
    }
}
