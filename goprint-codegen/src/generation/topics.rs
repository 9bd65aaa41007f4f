//! Shared declarations written ahead of generated bodies.

use indexmap::IndexSet;

/// Ordered, deduplicated set of top-level declarations.
///
/// Body code may reference helper types and variables declared here, so the
/// assembler always writes topics before bodies.
#[derive(Debug, Clone, Default)]
pub struct Topics {
    decls: IndexSet<String>,
}

impl Topics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. Returns `false` if an identical one was already added.
    pub fn add(&mut self, decl: impl Into<String>) -> bool {
        self.decls.insert(decl.into())
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Render all declarations in insertion order, each newline-terminated.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for decl in &self.decls {
            out.extend_from_slice(decl.as_bytes());
            if !decl.ends_with('\n') {
                out.push(b'\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_dedup_keeps_first_position() {
        let mut topics = Topics::new();
        assert!(topics.add("type a struct{}"));
        assert!(topics.add("var _ = 1\n"));
        assert!(!topics.add("type a struct{}"));

        assert_eq!(topics.len(), 2);
        assert_eq!(topics.to_bytes(), b"type a struct{}\nvar _ = 1\n");
    }

    #[test]
    fn test_empty_topics_render_nothing() {
        let topics = Topics::new();
        assert!(topics.is_empty());
        assert!(topics.to_bytes().is_empty());
    }
}
