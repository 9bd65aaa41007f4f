//! Import section policy.

use std::fmt;

use super::stdlib::is_standard_library;

/// First organizational prefix; matches every Algorand module.
pub const ORG_PREFIX: &str = "github.com/algorand";

/// More specific prefix for the go-algorand module itself.
pub const ORG_MODULE_PREFIX: &str = "github.com/algorand/go-algorand";

/// One group in a sectioned import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Standard library packages.
    Standard,
    /// Anything no other section claims.
    Default,
    /// Packages whose path starts with the given prefix.
    Prefix(String),
}

impl Section {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// How strongly this section claims `path`; `None` when it does not match.
    ///
    /// The most specific match wins: a prefix beats the standard library,
    /// which beats the default section, and longer prefixes beat shorter ones.
    pub fn specificity(&self, path: &str) -> Option<usize> {
        match self {
            Section::Default => Some(1),
            Section::Standard => is_standard_library(path).then_some(2),
            Section::Prefix(prefix) => path.starts_with(prefix.as_str()).then(|| 3 + prefix.len()),
        }
    }
}

impl fmt::Display for Section {
    /// Render as a gci `--section` argument.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Standard => f.write_str("standard"),
            Section::Default => f.write_str("default"),
            Section::Prefix(prefix) => write!(f, "prefix({})", prefix),
        }
    }
}

/// Ordered import sections plus separator handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPolicy {
    sections: Vec<Section>,
    blank_line_between: bool,
}

impl SectionPolicy {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            blank_line_between: true,
        }
    }

    /// Standard library, then third party, then the Algorand organization,
    /// then go-algorand, each separated by a blank line.
    pub fn algorand() -> Self {
        Self::new(vec![
            Section::Standard,
            Section::Default,
            Section::prefix(ORG_PREFIX),
            Section::prefix(ORG_MODULE_PREFIX),
        ])
    }

    /// Keep sections adjacent instead of separating them with blank lines.
    pub fn without_separators(mut self) -> Self {
        self.blank_line_between = false;
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn blank_line_between(&self) -> bool {
        self.blank_line_between
    }

    /// Index of the section `path` belongs to.
    ///
    /// Ties go to the earlier section. Without a matching section the import
    /// is placed after all configured ones.
    pub fn classify(&self, path: &str) -> usize {
        let mut best: Option<(usize, usize)> = None;
        for (index, section) in self.sections.iter().enumerate() {
            if let Some(score) = section.specificity(path) {
                if best.is_none_or(|(_, current)| score > current) {
                    best = Some((index, score));
                }
            }
        }
        best.map_or(self.sections.len(), |(index, _)| index)
    }
}

impl Default for SectionPolicy {
    fn default() -> Self {
        Self::algorand()
    }
}
