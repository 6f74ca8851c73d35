//! Ingested source material

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Link,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::File => write!(f, "file"),
            SourceKind::Link => write!(f, "link"),
        }
    }
}

/// Plain-text content extracted from a document or a web page.
///
/// Only feeds the prompt digest; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub source_id: String,
    pub source_kind: SourceKind,
    pub content: String,
}

impl Source {
    pub fn new(source_id: impl Into<String>, source_kind: SourceKind, content: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            source_kind,
            content: content.into(),
        }
    }

    /// Copy of this source keeping at most `max_chars` characters of content
    pub fn truncated(&self, max_chars: usize) -> Self {
        Self {
            source_id: self.source_id.clone(),
            source_kind: self.source_kind,
            content: take_chars(&self.content, max_chars).to_string(),
        }
    }
}

/// Prefix of `s` holding at most `max_chars` characters, cut on a char boundary
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_counts_characters() {
        let source = Source::new("notes.md", SourceKind::File, "héllo wörld");
        assert_eq!(source.truncated(5).content, "héllo");
        assert_eq!(source.truncated(100).content, "héllo wörld");
        assert_eq!(source.truncated(0).content, "");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SourceKind::File.to_string(), "file");
        assert_eq!(SourceKind::Link.to_string(), "link");
    }
}
