use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use goprint_codegen::{
    FilePrinter, Formatter,
    format::{GciCommand, GoImports, SectionGrouper},
};
use goprint_core::test_file_path;
use tracing::debug;

use super::{ModeArgs, UnwrapOrExit};
use crate::{
    description::FileDescription,
    reports::{PrintReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct PrintCommand {
    /// Path to the file description
    pub input: PathBuf,

    /// Output file (defaults to <input>_gen.go next to the description)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Write the assembled bytes without running goimports or grouping imports
    #[arg(long)]
    pub skip_format: bool,

    /// goimports executable used to normalize imports
    #[arg(long, default_value = "goimports")]
    pub goimports: PathBuf,

    /// Group imports with this gci executable instead of the built-in grouper
    #[arg(long)]
    pub gci: Option<PathBuf>,
}

impl PrintCommand {
    pub fn run(&self) -> Result<()> {
        let desc = FileDescription::open(&self.input).unwrap_or_exit();
        let mode = self.mode.resolve(&desc);
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| FileDescription::default_output(&self.input));

        debug!(
            input = %self.input.display(),
            output = %output.display(),
            %mode,
            "printing description"
        );

        let printer = FilePrinter::new(self.formatter());
        printer
            .print_file(&output, &desc, mode)
            .wrap_err_with(|| format!("Failed to print {}", output.display()))?;

        let report = PrintReport {
            main_path: output.clone(),
            test_path: mode.wants_tests().then(|| test_file_path(&output)),
            mode,
            formatted: !self.skip_format,
        };
        report.render(&mut TerminalOutput::new());

        Ok(())
    }

    fn formatter(&self) -> Formatter {
        let normalizer = GoImports::with_program(&self.goimports);
        let formatter = match &self.gci {
            Some(gci) => Formatter::new(normalizer, GciCommand::with_program(gci)),
            None => Formatter::new(normalizer, SectionGrouper),
        };
        formatter.skip_format(self.skip_format)
    }
}
