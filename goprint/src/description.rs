//! TOML file descriptions.
//!
//! A description carries everything the printer needs from the front end:
//! the package name, the imports of the parsed file and the already
//! generated topics, body and test code.
//!
//! ```toml
//! package = "sample"
//! mode = "encode,decode,test"
//! topics = ["type zSampleHelper struct{}"]
//! body = "func (z *Sample) Size() int { return 0 }"
//!
//! [[imports]]
//! path = "fmt"
//!
//! [[imports]]
//! path = "github.com/algorand/go-algorand/crypto"
//! alias = "crypto"
//! ```

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use goprint_codegen::{Printer, SourceFile, generation::ImportSpec};
use goprint_core::Mode;
use serde::Deserialize;

use crate::error::{Error, Result, SourceContext};

const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescription {
    package: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    imports: Vec<RawImport>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    tests: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawImport {
    path: String,
    #[serde(default)]
    alias: Option<String>,
}

/// A validated file description.
#[derive(Debug, Clone)]
pub struct FileDescription {
    package: String,
    mode: Option<Mode>,
    imports: Vec<ImportSpec>,
    topics: Vec<String>,
    body: String,
    tests: String,
}

impl FileDescription {
    /// Open and parse a description file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse description content, naming `filename` in diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let raw: RawDescription = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

        check_identifier(&ctx, &raw.package, "package")?;

        let mode = raw
            .mode
            .as_deref()
            .map(|m| {
                m.parse::<Mode>()
                    .map_err(|e| ctx.validation_error(e.to_string(), m))
            })
            .transpose()?;

        let mut imports = Vec::with_capacity(raw.imports.len());
        for import in raw.imports {
            if import.path.is_empty() || import.path.chars().any(is_forbidden_in_import_path) {
                return Err(ctx.validation_error(
                    format!("invalid import path '{}'", import.path),
                    &import.path,
                ));
            }
            imports.push(match import.alias {
                Some(alias) if alias == "_" || alias == "." => {
                    ImportSpec::aliased(alias, import.path)
                }
                Some(alias) => {
                    check_identifier(&ctx, &alias, "import alias")?;
                    ImportSpec::aliased(alias, import.path)
                }
                None => ImportSpec::new(import.path),
            });
        }

        Ok(Self {
            package: raw.package,
            mode,
            imports,
            topics: raw.topics,
            body: raw.body,
            tests: raw.tests,
        })
    }

    /// Generation flags requested by the description itself.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn tests(&self) -> &str {
        &self.tests
    }

    /// Default output path for a description at `input`: `<stem>_gen.go`.
    pub fn default_output(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        input.with_file_name(format!("{}_gen.go", stem))
    }
}

/// Go restricts import paths to graphic characters without spaces, minus a
/// fixed set of ASCII punctuation and the replacement character.
fn is_forbidden_in_import_path(c: char) -> bool {
    const PUNCTUATION: &str = "!\"#$%&'()*,:;<=>?[\\]^`{|}";
    c.is_control()
        || c.is_whitespace()
        || PUNCTUATION.contains(c)
        || c == '\u{FFFD}'
        || (!c.is_ascii() && !c.is_alphanumeric())
}

fn check_identifier(ctx: &SourceContext, name: &str, context: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if !valid {
        return Err(ctx.validation_error(format!("invalid {} name '{}'", context, name), name));
    }
    if GO_KEYWORDS.contains(&name) {
        return Err(ctx.reserved_keyword_error(name, context));
    }
    Ok(())
}

impl FromStr for FileDescription {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "description.toml")
    }
}

impl SourceFile for FileDescription {
    fn package(&self) -> &str {
        &self.package
    }

    fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    fn print_to(&self, printer: &mut Printer<'_>) -> goprint_codegen::Result<()> {
        for topic in &self.topics {
            printer.topics().add(topic.clone());
        }
        printer.write_body(&with_newline(&self.body));
        printer.write_tests(&with_newline(&self.tests));
        Ok(())
    }
}

fn with_newline(code: &str) -> String {
    if code.is_empty() || code.ends_with('\n') {
        code.to_string()
    } else {
        format!("{}\n", code)
    }
}
