use std::{path::PathBuf, process::ExitStatus};

use miette::Diagnostic;
use thiserror::Error;

/// Result type for assembly and formatting operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The body generator rejected the file description.
    #[error("code generation failed: {message}")]
    #[diagnostic(code(goprint::generate))]
    Generate { message: String },

    #[error("failed to write '{}'", path.display())]
    #[diagnostic(code(goprint::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(goprint::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not run `{tool}`")]
    #[diagnostic(
        code(goprint::tool_spawn),
        help("make sure `{tool}` is installed and on PATH, or pass --skip-format")
    )]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` failed on '{}' ({status}): {stderr}", path.display())]
    #[diagnostic(code(goprint::tool_failed))]
    ToolFailed {
        tool: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("malformed import block in '{}': {message}", path.display())]
    #[diagnostic(code(goprint::syntax))]
    Syntax { path: PathBuf, message: String },

    #[error("formatting of '{}' stopped without reporting a result", path.display())]
    #[diagnostic(code(goprint::task_lost))]
    TaskLost { path: PathBuf },
}

impl Error {
    /// Create a generation error from any displayable cause.
    pub fn generate(message: impl Into<String>) -> Self {
        Error::Generate {
            message: message.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::Generate { .. } | Error::ToolSpawn { .. } => None,
            Error::Write { path, .. }
            | Error::Read { path, .. }
            | Error::ToolFailed { path, .. }
            | Error::Syntax { path, .. }
            | Error::TaskLost { path } => Some(path),
        }
    }
}
