use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for description loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the path of a file description, e.g. 'goprint print types.toml'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse file description")]
    #[diagnostic(code(goprint::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(goprint::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a Go keyword")]
    #[diagnostic(
        code(goprint::reserved_keyword),
        help("Go does not allow keywords as {context} names")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },
}

/// Source context for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Span of the first quoted occurrence of `value`, if any.
    pub fn find_value(&self, value: &str) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", value);
        self.src
            .find(&needle)
            .map(|offset| SourceSpan::from((offset, needle.len())))
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Validation error pointing at the quoted `value`, when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, value: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_value(value),
            message: message.into(),
        })
    }

    pub fn reserved_keyword_error(&self, name: &str, context: impl Into<String>) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span: self.find_value(name),
            name: name.to_string(),
            context: context.into(),
        })
    }
}
