//! Import specifications and deduplication.

use indexmap::IndexSet;

/// Runtime support package every generated file imports.
pub const RUNTIME_IMPORT: &str = "github.com/algorand/msgp/msgp";

/// Build tag that lets users skip the generated tests.
pub const TEST_BUILD_TAG: &str = "!skip_msgp_testing";

/// Fixed import list of the generated test file.
pub const TEST_IMPORTS: [&str; 4] = [
    RUNTIME_IMPORT,
    "github.com/algorand/go-algorand/protocol",
    "github.com/algorand/go-algorand/test/partitiontest",
    "testing",
];

/// A single Go import, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportSpec {
    path: String,
    alias: Option<String>,
}

impl ImportSpec {
    /// Create an unaliased import of `path` (unquoted).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    /// Create an import of `path` bound to `alias` (`alias "path"`).
    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }

    /// Render as it appears inside an import block: `"path"` or `alias "path"`.
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} {}", alias, quote(&self.path)),
            None => quote(&self.path),
        }
    }
}

/// Quote `s` as a Go interpreted string literal, escaping like `%q`.
///
/// Letters and digits outside ASCII are kept; every other non-printable or
/// non-ASCII character becomes a `\u` or `\U` escape, which Go reads back
/// as the same rune.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            ' '..='~' => out.push(c),
            c if c.is_ascii() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_alphanumeric() => out.push(c),
            c if (c as u32) <= 0xFFFF => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// Remove duplicate imports.
///
/// Entries are compared by their rendered text. Callers must not rely on the
/// order of the result; the import grouper puts the block in canonical order
/// afterwards.
pub fn dedup_imports<I, S>(imports: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    imports
        .into_iter()
        .map(Into::into)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_render_plain_and_aliased() {
        assert_eq!(ImportSpec::new("fmt").render(), "\"fmt\"");
        assert_eq!(
            ImportSpec::aliased("cfg", "github.com/x/config").render(),
            "cfg \"github.com/x/config\""
        );
    }

    #[test]
    fn test_quote_uses_go_escapes() {
        assert_eq!(quote("fmt"), "\"fmt\"");
        assert_eq!(quote("ex.com/a\u{200b}b"), "\"ex.com/a\\u200bb\"");
        assert_eq!(quote("a\tb\u{7f}"), "\"a\\tb\\x7f\"");
        assert_eq!(quote("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
        assert_eq!(quote("例/pkg"), "\"例/pkg\"");
        assert_eq!(quote("x\u{1F600}"), "\"x\\U0001f600\"");
    }

    #[test]
    fn test_dedup_removes_repeats() {
        let input = vec!["a", "b", "a", "c", "b", "a"];
        let out = dedup_imports(input.clone());

        assert_eq!(out.len(), 3);
        let expected: HashSet<&str> = input.into_iter().collect();
        let actual: HashSet<&str> = out.iter().map(String::as_str).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_dedup_distinguishes_aliases() {
        let out = dedup_imports([
            ImportSpec::new("fmt").render(),
            ImportSpec::aliased("f", "fmt").render(),
            ImportSpec::new("fmt").render(),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_dedup_empty() {
        assert!(dedup_imports(Vec::<String>::new()).is_empty());
    }
}
