//! Fixed file headers: package clause, import block and build constraints.

use super::imports::quote;
use crate::builder::CodeBuilder;

/// Marker that identifies the file as generated.
///
/// Matches the `^// Code generated .* DO NOT EDIT\.$` convention so linters
/// and editors can recognize the output.
pub const GENERATED_MARKER: &str = "// Code generated by github.com/algorand/msgp DO NOT EDIT.";

/// Write `package <name>` followed by the generated-code marker and a blank line.
pub fn write_package_header(buf: &mut Vec<u8>, name: &str) {
    let text = CodeBuilder::go()
        .line(&format!("package {}", name))
        .line(GENERATED_MARKER)
        .blank()
        .build();
    buf.extend_from_slice(text.as_bytes());
}

/// Write a parenthesized import block.
///
/// Entries that already end in a quote (`"fmt"`, `alias "pkg/path"`) are
/// written as given; anything else is treated as a bare path and quoted.
pub fn write_import_header<S: AsRef<str>>(buf: &mut Vec<u8>, imports: &[S]) {
    let text = CodeBuilder::go()
        .block_with_close("import (", ")", |b| {
            b.each(imports, |b, import| {
                let import: &str = import.as_ref();
                if import.ends_with('"') {
                    b.line(import)
                } else {
                    b.line(&quote(import))
                }
            })
        })
        .blank()
        .build();
    buf.extend_from_slice(text.as_bytes());
}

/// Write `//go:build` and `// +build` lines for `tags`, then a blank line.
pub fn write_build_header<S: AsRef<str>>(buf: &mut Vec<u8>, tags: &[S]) {
    let expr = tags
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    let text = CodeBuilder::go()
        .line(&format!("//go:build {}", expr))
        .line(&format!("// +build {}", expr))
        .blank()
        .build();
    buf.extend_from_slice(text.as_bytes());
}
