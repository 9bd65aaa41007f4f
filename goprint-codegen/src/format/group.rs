//! Import group reordering.

use std::{path::PathBuf, process::Command};

use tracing::debug;

use super::{SectionPolicy, tool};
use crate::{Error, Result, builder::CodeBuilder};

/// Rewrites files on disk so their import blocks follow a section policy.
pub trait ImportGrouper: Send + Sync {
    /// Tool name for logs and errors.
    fn name(&self) -> &str;

    /// Reorder the imports of every file in `paths` in place.
    fn reorder(&self, paths: &[PathBuf], policy: &SectionPolicy) -> Result<()>;
}

/// In-process grouper.
///
/// Each parenthesized import block is split into the policy's sections,
/// entries are sorted by import path inside a section, and comment lines
/// directly above an import move with it. Running it twice is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionGrouper;

impl ImportGrouper for SectionGrouper {
    fn name(&self) -> &str {
        "section-grouper"
    }

    fn reorder(&self, paths: &[PathBuf], policy: &SectionPolicy) -> Result<()> {
        for path in paths {
            let src = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
            let out = regroup(&src, policy).map_err(|message| Error::Syntax {
                path: path.clone(),
                message,
            })?;
            if out != src {
                goprint_core::write_file(path, out.as_bytes()).map_err(|e| Error::write(path, e))?;
            } else {
                debug!(path = %path.display(), "imports already grouped");
            }
        }
        Ok(())
    }
}

/// Grouper backed by the `gci` binary (`gci write`).
#[derive(Debug, Clone)]
pub struct GciCommand {
    program: PathBuf,
}

impl GciCommand {
    pub fn new() -> Self {
        Self::with_program("gci")
    }

    /// Use a specific `gci` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to `gci` for `paths`.
    pub fn args(&self, paths: &[PathBuf], policy: &SectionPolicy) -> Vec<String> {
        let mut args = vec!["write".to_string()];
        for section in policy.sections() {
            args.push("--section".to_string());
            args.push(section.to_string());
        }
        args.extend(paths.iter().map(|p| p.display().to_string()));
        args
    }
}

impl Default for GciCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportGrouper for GciCommand {
    fn name(&self) -> &str {
        "gci"
    }

    fn reorder(&self, paths: &[PathBuf], policy: &SectionPolicy) -> Result<()> {
        let Some(first) = paths.first() else {
            return Ok(());
        };
        let mut command = Command::new(&self.program);
        command.args(self.args(paths, policy));
        tool::run(command, self.name(), first, None)?;
        Ok(())
    }
}

/// One import line plus the comment lines directly above it.
#[derive(Debug, Clone)]
struct Entry {
    comments: Vec<String>,
    spec: String,
    path: String,
}

/// Regroup every parenthesized import block in `src`.
///
/// Scanning stops at the first top-level declaration, since Go requires
/// imports to come before it.
pub fn regroup(src: &str, policy: &SectionPolicy) -> std::result::Result<String, String> {
    let lines: Vec<&str> = src.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    let mut in_preamble = true;

    while i < lines.len() {
        let line = lines[i];
        if in_preamble && is_declaration(line) {
            in_preamble = false;
        }
        if !in_preamble || line.trim_end() != "import (" {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let open = i;
        let close = lines[open + 1..]
            .iter()
            .position(|l| l.trim() == ")")
            .map(|offset| open + 1 + offset)
            .ok_or_else(|| format!("import block opened on line {} is never closed", open + 1))?;

        let (entries, trailing) = parse_block(&lines[open + 1..close], open + 2)?;
        out.extend(render_block(entries, trailing, policy));
        i = close + 1;
    }

    let mut result = out.join("\n");
    if src.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

fn is_declaration(line: &str) -> bool {
    ["func ", "type ", "var ", "const "]
        .iter()
        .any(|kw| line.starts_with(kw))
}

/// Parse the lines between `import (` and `)`. `first_line` is 1-based.
fn parse_block(
    lines: &[&str],
    first_line: usize,
) -> std::result::Result<(Vec<Entry>, Vec<String>), String> {
    let mut entries = Vec::new();
    let mut pending = Vec::new();

    for (offset, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("//") {
            pending.push(line.to_string());
            continue;
        }
        let path = quoted_path(line).ok_or_else(|| {
            format!(
                "line {}: expected an import path, found `{}`",
                first_line + offset,
                line
            )
        })?;
        entries.push(Entry {
            comments: std::mem::take(&mut pending),
            spec: line.to_string(),
            path: path.to_string(),
        });
    }
    Ok((entries, pending))
}

/// The text between the first pair of double quotes.
fn quoted_path(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

fn render_block(entries: Vec<Entry>, trailing: Vec<String>, policy: &SectionPolicy) -> Vec<String> {
    let mut sections: Vec<Vec<Entry>> = vec![Vec::new(); policy.sections().len() + 1];
    for entry in entries {
        sections[policy.classify(&entry.path)].push(entry);
    }

    let mut builder = CodeBuilder::go().line("import (").indent();
    for (n, section) in sections.iter_mut().filter(|s| !s.is_empty()).enumerate() {
        section.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.spec.cmp(&b.spec)));
        builder = builder.when(n > 0 && policy.blank_line_between(), CodeBuilder::blank);
        for entry in section.iter() {
            builder = builder
                .each(&entry.comments, |b, c| b.line(c))
                .line(&entry.spec);
        }
    }

    builder
        .each(&trailing, |b, c| b.line(c))
        .dedent()
        .line(")")
        .build()
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Section;

    const UNGROUPED: &str = "package sample

// Code generated by github.com/algorand/msgp DO NOT EDIT.

import (
\t\"github.com/algorand/go-algorand/protocol\"
\t\"testing\"
\t\"github.com/algorand/msgp/msgp\"
\t// errgroup is only used by the tests
\t\"golang.org/x/sync/errgroup\"
\t\"fmt\"
\tpt \"github.com/algorand/go-algorand/test/partitiontest\"
)

func Foo() {}
";

    const GROUPED: &str = "package sample

// Code generated by github.com/algorand/msgp DO NOT EDIT.

import (
\t\"fmt\"
\t\"testing\"

\t// errgroup is only used by the tests
\t\"golang.org/x/sync/errgroup\"

\t\"github.com/algorand/msgp/msgp\"

\t\"github.com/algorand/go-algorand/protocol\"
\tpt \"github.com/algorand/go-algorand/test/partitiontest\"
)

func Foo() {}
";

    #[test]
    fn test_regroup_into_sections() {
        let out = regroup(UNGROUPED, &SectionPolicy::algorand()).unwrap();
        assert_eq!(out, GROUPED);
    }

    #[test]
    fn test_regroup_is_idempotent() {
        let once = regroup(UNGROUPED, &SectionPolicy::algorand()).unwrap();
        let twice = regroup(&once, &SectionPolicy::algorand()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_regroup_without_separators() {
        let src = "package p\n\nimport (\n\t\"b.io/x\"\n\n\t\"os\"\n)\n";
        let policy =
            SectionPolicy::new(vec![Section::Standard, Section::Default]).without_separators();

        let out = regroup(src, &policy).unwrap();
        assert_eq!(out, "package p\n\nimport (\n\t\"os\"\n\t\"b.io/x\"\n)\n");
    }

    #[test]
    fn test_regroup_ignores_imports_after_declarations() {
        let src = "package p\n\nfunc f() string {\n\treturn `\nimport (\n\t\"zzz\"\n\t\"aaa\"\n)\n`\n}\n";
        assert_eq!(regroup(src, &SectionPolicy::algorand()).unwrap(), src);
    }

    #[test]
    fn test_regroup_leaves_single_imports() {
        let src = "package p\n\nimport \"fmt\"\n";
        assert_eq!(regroup(src, &SectionPolicy::algorand()).unwrap(), src);
    }

    #[test]
    fn test_regroup_unterminated_block() {
        let src = "package p\nimport (\n\t\"fmt\"\n";
        let err = regroup(src, &SectionPolicy::algorand()).unwrap_err();
        assert!(err.contains("never closed"));
    }

    #[test]
    fn test_regroup_rejects_garbage() {
        let src = "package p\nimport (\n\tfmt\n)\n";
        let err = regroup(src, &SectionPolicy::algorand()).unwrap_err();
        assert!(err.contains("line 3"));
    }

    #[test]
    fn test_section_grouper_rewrites_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("sample_gen.go");
        std::fs::write(&path, UNGROUPED).unwrap();

        SectionGrouper
            .reorder(std::slice::from_ref(&path), &SectionPolicy::algorand())
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), GROUPED);
    }

    #[test]
    fn test_section_grouper_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing.go");

        let err = SectionGrouper
            .reorder(&[path], &SectionPolicy::algorand())
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_gci_args() {
        let args = GciCommand::new().args(&[PathBuf::from("a.go")], &SectionPolicy::algorand());
        assert_eq!(
            args,
            [
                "write",
                "--section",
                "standard",
                "--section",
                "default",
                "--section",
                "prefix(github.com/algorand)",
                "--section",
                "prefix(github.com/algorand/go-algorand)",
                "a.go"
            ]
        );
    }

    #[test]
    fn test_gci_no_paths_is_noop() {
        let gci = GciCommand::with_program("/nonexistent/gci");
        assert!(gci.reorder(&[], &SectionPolicy::algorand()).is_ok());
    }
}
