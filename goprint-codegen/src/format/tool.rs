//! Running external formatting tools.

use std::{
    io::{self, ErrorKind, Write},
    path::Path,
    process::{Command, Stdio},
    thread,
};

use tracing::debug;

use crate::{Error, Result};

/// Run `command`, optionally feeding `stdin`, and return its stdout.
///
/// `tool` names the program in errors; `path` is the file being processed.
pub(crate) fn run(
    mut command: Command,
    tool: &str,
    path: &Path,
    stdin: Option<&[u8]>,
) -> Result<Vec<u8>> {
    debug!(tool, path = %path.display(), "running formatter");

    command
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| Error::ToolSpawn {
        tool: tool.to_string(),
        source,
    })?;

    // stdin is written from its own thread while the output pipes drain.
    // The child is waited on whatever happens to the write.
    let pipe = child.stdin.take();
    let (written, output) = thread::scope(|scope| {
        let writer = scope.spawn(move || match (stdin, pipe) {
            (Some(input), Some(mut pipe)) => pipe.write_all(input),
            _ => Ok(()),
        });
        let output = child.wait_with_output();
        (writer.join(), output)
    });

    let output = output.map_err(|source| Error::ToolSpawn {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            path: path.to_path_buf(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // A tool that bails out early closes its end; the exit status reports why.
    match written {
        Ok(Err(err)) if err.kind() != ErrorKind::BrokenPipe => Err(Error::write(path, err)),
        Err(_) => Err(Error::write(
            path,
            io::Error::other("stdin writer thread panicked"),
        )),
        _ => Ok(output.stdout),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_large_input_round_trips_through_pipe() {
        let input = "package p\n".repeat(64 * 1024).into_bytes();

        let out = run(Command::new("cat"), "cat", Path::new("big.go"), Some(&input)).unwrap();

        assert_eq!(out.len(), input.len());
        assert_eq!(out, input);
    }

    #[test]
    fn test_early_exit_reports_status() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo bad import >&2; exit 3"]);
        let input = vec![b'x'; 1 << 20];

        let err = run(command, "sh", Path::new("gen.go"), Some(&input)).unwrap_err();

        match err {
            Error::ToolFailed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "bad import");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_without_stdin() {
        let mut command = Command::new("sh");
        command.args(["-c", "printf ok"]);

        let out = run(command, "sh", Path::new("gen.go"), None).unwrap();
        assert_eq!(out, b"ok");
    }
}
