//! Exact duplicate-line removal.
//!
//! Lines are compared by a normalized *comparison key* while the emitted
//! text keeps its original case:
//!
//! 1. Split the input on `'\n'`. A trailing newline produces a trailing
//!    empty line, which is counted like any other line.
//! 2. Key = line, trimmed if `trim_whitespace`, lowercased if
//!    `!case_sensitive`.
//! 3. Output value = line, trimmed if `trim_whitespace`. Never case-folded.
//! 4. The first line carrying a key is kept; later ones are dropped.
//!
//! # Example
//!
//! ```rust
//! use text_toolbox_core::dedup::deduplicate;
//! use text_toolbox_core::models::DedupOptions;
//!
//! let result = deduplicate("b\na\nb\nc\na", &DedupOptions::default());
//! assert_eq!(result.content, "b\na\nc");
//! assert_eq!(result.removed_line_count(), 2);
//! ```

use std::borrow::Cow;
use std::collections::HashSet;

use crate::models::{DedupOptions, DedupResult, TextSource};

/// Remove repeated lines from `content`, keeping first occurrences in order.
///
/// Total over any input: `deduplicate("")` reports one (empty) line.
pub fn deduplicate(content: &str, options: &DedupOptions) -> DedupResult {
    let mut seen: HashSet<Cow<'_, str>> = HashSet::new();
    let mut kept: Vec<&str> = Vec::new();
    let mut original_line_count = 0;

    for line in content.split('\n') {
        original_line_count += 1;

        let value = if options.trim_whitespace {
            trim_text(line)
        } else {
            line
        };
        let key = if options.case_sensitive {
            Cow::Borrowed(value)
        } else {
            Cow::Owned(value.to_lowercase())
        };

        if seen.insert(key) {
            kept.push(value);
        }
    }

    DedupResult {
        original_line_count,
        unique_line_count: kept.len(),
        content: kept.join("\n"),
    }
}

/// Strip leading and trailing whitespace, including the byte-order mark
/// `U+FEFF` that `str::trim` keeps.
pub fn trim_text(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Concatenate readable sources for multi-file deduplication.
///
/// Each source's content is followed by a newline. Sources with a read
/// error are skipped; returns `None` when nothing is left.
pub fn merge_sources(sources: &[TextSource]) -> Option<String> {
    let mut merged = String::new();
    let mut any = false;
    for source in sources.iter().filter(|s| s.read_error.is_none()) {
        merged.push_str(&source.content);
        merged.push('\n');
        any = true;
    }
    any.then_some(merged)
}
