//! Print command report data structures.

use std::path::PathBuf;

use goprint_core::Mode;

use super::output::{Output, Report};

/// Files written by a print.
#[derive(Debug)]
pub struct PrintReport {
    pub main_path: PathBuf,
    pub test_path: Option<PathBuf>,
    pub mode: Mode,
    /// Whether the files went through the formatting stages.
    pub formatted: bool,
}

impl Report for PrintReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Wrote");
        out.added_item(&self.main_path.display().to_string());
        if let Some(path) = &self.test_path {
            out.added_item(&path.display().to_string());
        }
        out.key_value("mode", &self.mode.to_string());
        if !self.formatted {
            out.warning("formatting skipped, files contain the assembled bytes");
        }
    }
}
