//! Core data models used throughout Text Toolbox.
//!
//! These types represent the text sources, options, and results that flow
//! between the calling application and the deduplication and search
//! engines. All of them are plain values: the engines keep no state between
//! calls.

use serde::{Deserialize, Serialize};

/// Label given to the single source built from a pasted buffer.
pub const PASTED_SOURCE_NAME: &str = "粘贴的文本";

/// A single named unit of text: one file, or one paste buffer.
#[derive(Debug, Clone, Serialize)]
pub struct TextSource {
    pub name: String,
    pub content: String,
    pub size_bytes: Option<u64>,
    /// Set when the provider could not decode the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_error: Option<String>,
}

impl TextSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size_bytes: Some(content.len() as u64),
            content,
            read_error: None,
        }
    }

    /// A source built from pasted text.
    pub fn pasted(content: impl Into<String>) -> Self {
        Self::new(PASTED_SOURCE_NAME, content)
    }

    /// A source whose content could not be read.
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
            size_bytes: None,
            read_error: Some(error.into()),
        }
    }

    /// True when the search engine should look at this source at all.
    pub fn is_searchable(&self) -> bool {
        self.read_error.is_none() && !self.content.is_empty()
    }
}

/// Line normalization options for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    pub trim_whitespace: bool,
    pub case_sensitive: bool,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: false,
            case_sensitive: true,
        }
    }
}

/// Output of [`deduplicate`](crate::dedup::deduplicate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupResult {
    pub original_line_count: usize,
    pub unique_line_count: usize,
    /// Unique lines joined with `'\n'`, in first-occurrence order.
    pub content: String,
}

impl DedupResult {
    pub fn removed_line_count(&self) -> usize {
        self.original_line_count - self.unique_line_count
    }
}

/// What to look for and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSpec {
    pub pattern: String,
    pub is_regex: bool,
    pub case_sensitive: bool,
    /// Whole-document matching. Only honored together with `is_regex`.
    pub full_text: bool,
}

impl SearchSpec {
    /// A case-sensitive, line-scoped literal search.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            is_regex: false,
            case_sensitive: true,
            full_text: false,
        }
    }

    /// A case-sensitive, line-scoped regex search.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            is_regex: true,
            ..Self::literal(pattern)
        }
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn full_text(mut self, yes: bool) -> Self {
        self.full_text = yes;
        self
    }

    /// Literal searches are always line-scoped.
    pub fn is_full_text(&self) -> bool {
        self.is_regex && self.full_text
    }
}

/// A highlighted region of a [`MatchRecord`]'s display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub text: String,
    /// Byte offset into `display_text`, always on a char boundary.
    pub offset: usize,
}

/// One reported hit: a line (line-scoped) or a single match (full-text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// 1-based number of the line where the match starts.
    pub line_number: usize,
    pub display_text: String,
    pub spans: Vec<MatchSpan>,
    pub is_full_text_match: bool,
    pub is_multi_line: bool,
}

/// All matches found in one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSearchResult {
    pub source_name: String,
    pub matches: Vec<MatchRecord>,
    pub total_matches: usize,
    /// The full-text time budget ran out before the scan finished.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub timed_out: bool,
}

impl SourceSearchResult {
    pub fn new(source_name: impl Into<String>, matches: Vec<MatchRecord>) -> Self {
        Self {
            source_name: source_name.into(),
            total_matches: matches.len(),
            matches,
            timed_out: false,
        }
    }
}

/// Aggregate result of a search over several sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Only sources with at least one match, in input order.
    pub sources: Vec<SourceSearchResult>,
    pub total_match_count: usize,
}

impl SearchResult {
    pub fn push(&mut self, source: SourceSearchResult) {
        self.total_match_count += source.total_matches;
        self.sources.push(source);
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
