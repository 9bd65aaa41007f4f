use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use goprint_codegen::{SourceFile, generate};
use goprint_core::test_file_path;

use super::{ModeArgs, UnwrapOrExit};
use crate::{
    description::FileDescription,
    reports::{CheckReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the file description
    pub input: PathBuf,

    /// Output file the description would be printed to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Also show the assembled, unformatted main file
    #[arg(long)]
    pub show: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let report = self.report()?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn report(&self) -> Result<CheckReport> {
        let desc = FileDescription::open(&self.input).unwrap_or_exit();
        let mode = self.mode.resolve(&desc);
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| FileDescription::default_output(&self.input));

        let assembled = generate(&desc, mode).wrap_err("Assembly failed")?;

        let mut warnings = Vec::new();
        if !mode.wants_tests() && !desc.tests().is_empty() {
            warnings.push("test code is ignored because tests are disabled".to_string());
        }
        if desc.body().is_empty() {
            warnings.push("description has no body".to_string());
        }

        Ok(CheckReport {
            input: self.input.clone(),
            package: desc.package().to_string(),
            mode,
            main_path: output.clone(),
            main_size: assembled.main.len(),
            test_path: assembled.tests.as_ref().map(|_| test_file_path(&output)),
            test_size: assembled.tests.as_ref().map(Vec::len),
            imports: assembled_imports(&assembled.main),
            topics: desc.topics().len(),
            warnings,
            preview: self
                .show
                .then(|| String::from_utf8_lossy(&assembled.main).into_owned()),
        })
    }
}

/// Import lines of an assembled file's import block.
fn assembled_imports(main: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(main)
        .lines()
        .skip_while(|line| *line != "import (")
        .skip(1)
        .take_while(|line| *line != ")")
        .map(|line| line.trim().to_string())
        .collect()
}
