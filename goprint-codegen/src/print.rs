//! Top-level entry point: assemble, format both files, join the results.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Arc, mpsc},
    thread,
};

use goprint_core::{Mode, test_file_path};
use tracing::{info, warn};

use crate::{
    Error, Result,
    assemble::{Assembled, generate},
    format::Formatter,
    printer::SourceFile,
};

/// Logging capability used to report written files.
pub type LogFn = Arc<dyn Fn(fmt::Arguments<'_>) + Send + Sync>;

/// Default log sink: an `info` event through `tracing`.
pub fn tracing_log() -> LogFn {
    Arc::new(|args: fmt::Arguments<'_>| info!("{}", args))
}

fn log_written(log: &LogFn, path: &Path) {
    log(format_args!("wrote and formatted \"{}\"", path.display()));
}

/// Handle to a formatting job running on a background thread.
///
/// The worker reports through a one-slot buffered channel, so it finishes
/// even if the handle is dropped without being waited on.
#[derive(Debug)]
pub struct FormatTask {
    path: PathBuf,
    result: mpsc::Receiver<Result<()>>,
}

impl FormatTask {
    /// Start formatting `data` into `path`.
    ///
    /// If the worker thread cannot be started, [`FormatTask::wait`] reports
    /// [`Error::TaskLost`].
    pub fn spawn(formatter: Formatter, path: PathBuf, data: Vec<u8>, log: LogFn) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        let task_path = path.clone();
        let job = move || {
            let result = formatter.format(&task_path, &data);
            if result.is_ok() {
                log_written(&log, &task_path);
            }
            // The receiver may already be gone; the slot is buffered either way.
            let _ = tx.send(result);
        };

        if let Err(err) = thread::Builder::new()
            .name("goprint-format".to_string())
            .spawn(job)
        {
            warn!(error = %err, path = %path.display(), "could not start formatter thread");
        }

        Self { path, result: rx }
    }

    /// Path the task is writing.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the task finishes and return its result.
    pub fn wait(self) -> Result<()> {
        self.result
            .recv()
            .unwrap_or(Err(Error::TaskLost { path: self.path }))
    }
}

/// Assembles generated files and writes them through a [`Formatter`].
#[derive(Clone)]
pub struct FilePrinter {
    formatter: Formatter,
    log: LogFn,
}

impl FilePrinter {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            log: tracing_log(),
        }
    }

    /// Replace the sink that receives "wrote and formatted" lines.
    pub fn with_log(mut self, log: impl Fn(fmt::Arguments<'_>) + Send + Sync + 'static) -> Self {
        self.log = Arc::new(log);
        self
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Generate code for `file` and write it to `path`.
    ///
    /// With [`Mode::TEST`] a companion `<stem>_test.<ext>` file is written as
    /// well. The implementation file is formatted on a background thread
    /// while the test file is formatted here. A test file error is returned
    /// in preference to an implementation file error.
    pub fn print_file(&self, path: &Path, file: &impl SourceFile, mode: Mode) -> Result<()> {
        let Assembled { main, tests } = generate(file, mode)?;

        let task = FormatTask::spawn(
            self.formatter.clone(),
            path.to_path_buf(),
            main,
            Arc::clone(&self.log),
        );

        if let Some(tests) = tests {
            let test_path = test_file_path(path);
            if let Err(err) = self.formatter.format(&test_path, &tests) {
                if let Err(main_err) = task.wait() {
                    warn!(error = %main_err, "implementation file also failed");
                }
                return Err(err);
            }
            log_written(&self.log, &test_path);
        }

        task.wait()
    }
}

impl Default for FilePrinter {
    fn default() -> Self {
        Self::new(Formatter::default())
    }
}

impl fmt::Debug for FilePrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePrinter")
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

/// Print `file` to `path` with the default toolchain (`goimports` plus the
/// in-process import grouper), or verbatim when `skip_format` is set.
pub fn print_file(
    path: &Path,
    file: &impl SourceFile,
    mode: Mode,
    skip_format: bool,
) -> Result<()> {
    FilePrinter::new(Formatter::default().skip_format(skip_format)).print_file(path, file, mode)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::{Arc, Mutex},
    };

    use tempfile::TempDir;

    use super::*;
    use crate::{
        format::SectionGrouper,
        generation::{GENERATED_MARKER, ImportSpec},
        testing::{FailOnSuffix, StaticSource, TrimNormalizer},
    };

    fn sample() -> StaticSource {
        StaticSource::new("sample")
            .import(ImportSpec::new("fmt"))
            .body("func Foo() {}\n")
            .tests("func TestFoo(t *testing.T) {}\n")
    }

    fn capture() -> (Arc<Mutex<Vec<String>>>, impl Fn(fmt::Arguments<'_>) + Send + Sync) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        (lines, move |args: fmt::Arguments<'_>| {
            sink.lock().unwrap().push(args.to_string())
        })
    }

    #[test]
    fn test_print_file_writes_both_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");

        print_file(&path, &sample(), Mode::ENCODE | Mode::TEST, true).unwrap();

        let main = fs::read_to_string(&path).unwrap();
        let tests = fs::read_to_string(temp.path().join("sample_gen_test.go")).unwrap();
        assert!(main.starts_with(&format!("package sample\n{}\n", GENERATED_MARKER)));
        assert!(main.ends_with("func Foo() {}\n"));
        assert!(tests.starts_with("//go:build !skip_msgp_testing\n"));
        assert!(!main.contains("//go:build"));
    }

    #[test]
    fn test_no_test_file_without_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");

        print_file(&path, &sample(), Mode::ENCODE, true).unwrap();

        assert!(path.exists());
        assert!(!temp.path().join("sample_gen_test.go").exists());
    }

    #[test]
    fn test_generator_error_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");

        let err = print_file(&path, &sample().fail("boom"), Mode::TEST, true).unwrap_err();

        assert!(matches!(err, Error::Generate { .. }));
        assert!(!path.exists());
        assert!(!temp.path().join("sample_gen_test.go").exists());
    }

    #[test]
    fn test_logs_each_written_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");
        let (lines, sink) = capture();

        FilePrinter::new(Formatter::verbatim())
            .with_log(sink)
            .print_file(&path, &sample(), Mode::TEST)
            .unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        let test_path = temp.path().join("sample_gen_test.go");
        assert!(lines.contains(&format!("wrote and formatted \"{}\"", path.display())));
        assert!(lines.contains(&format!("wrote and formatted \"{}\"", test_path.display())));
    }

    #[test]
    fn test_test_file_error_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");
        let (lines, sink) = capture();

        let err = FilePrinter::new(Formatter::new(FailOnSuffix("_test.go"), SectionGrouper))
            .with_log(sink)
            .print_file(&path, &sample(), Mode::TEST)
            .unwrap_err();

        assert!(err.path().unwrap().ends_with("sample_gen_test.go"));
        // The background task is joined before returning.
        assert!(path.exists());
        assert_eq!(lines.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_test_file_error_wins_over_main_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");

        let err = FilePrinter::new(Formatter::new(FailOnSuffix(".go"), SectionGrouper))
            .print_file(&path, &sample(), Mode::TEST)
            .unwrap_err();

        assert!(err.path().unwrap().ends_with("sample_gen_test.go"));
    }

    #[test]
    fn test_main_file_error_returned() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");

        let err = FilePrinter::new(Formatter::new(FailOnSuffix("_gen.go"), SectionGrouper))
            .print_file(&path, &sample(), Mode::TEST)
            .unwrap_err();

        assert_eq!(err.path(), Some(path.as_path()));
        assert!(temp.path().join("sample_gen_test.go").exists());
    }

    #[test]
    fn test_formatted_output_groups_imports() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");
        let source = StaticSource::new("sample")
            .import(ImportSpec::new("fmt"))
            .import(ImportSpec::new("github.com/algorand/go-algorand/protocol"))
            .body("func Foo() {}\n");

        FilePrinter::new(Formatter::new(TrimNormalizer, SectionGrouper))
            .print_file(&path, &source, Mode::ENCODE)
            .unwrap();

        let main = fs::read_to_string(&path).unwrap();
        assert!(main.contains(
            "import (\n\t\"fmt\"\n\n\t\"github.com/algorand/msgp/msgp\"\n\n\t\"github.com/algorand/go-algorand/protocol\"\n)\n"
        ));
    }

    #[test]
    fn test_format_task_reports_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("task.go");

        let task = FormatTask::spawn(
            Formatter::verbatim(),
            path.clone(),
            b"package p\n".to_vec(),
            Arc::new(|_: fmt::Arguments<'_>| {}),
        );
        assert_eq!(task.path(), path.as_path());
        task.wait().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"package p\n");
    }

    #[test]
    fn test_dropped_task_still_completes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dropped.go");
        let (lines, sink) = capture();

        drop(FormatTask::spawn(
            Formatter::verbatim(),
            path.clone(),
            b"package p\n".to_vec(),
            Arc::new(sink),
        ));

        for _ in 0..200 {
            if !lines.lock().unwrap().is_empty() {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(lines.lock().unwrap().len(), 1);
        assert!(path.exists());
    }
}
