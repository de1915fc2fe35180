//! Literal and regex search over named text sources.
//!
//! The engine is a pure function of its inputs plus a caller-provided
//! [`Scheduler`]: it compiles the pattern once, walks the sources in order,
//! and yields between bounded chunks of work so a single-threaded host stays
//! responsive.
//!
//! # Matching modes
//!
//! - **Line-scoped** (literal search, or regex without `full_text`): each
//!   line is searched on its own and every line with at least one match
//!   becomes one [`MatchRecord`] whose display text is the raw line.
//! - **Full-text** (regex with `full_text`): the whole document is one
//!   haystack and `.` also matches `'\n'`. Every match becomes its own
//!   record, displayed with the text leading up to it on its first line and
//!   truncated to [`SearchLimits::display_chars`] characters.
//!
//! Both modes drive an explicit cursor over [`Regex::find_at`]; a zero-width
//! match moves the cursor one character forward so the scan always ends.
//!
//! # Limits
//!
//! | Limit | Default | Effect |
//! |-------|---------|--------|
//! | `time_budget` | 10 s | Per-source wall clock for full-text mode; partial results are kept |
//! | `display_chars` | 2000 | Full-text display truncation, followed by [`ELLIPSIS`] |
//! | `yield_interval_chars` | 5000 | Matched characters between full-text yields |
//!
//! Line-scoped mode yields every [`LINE_YIELD_INTERVAL`] lines so a long
//! source can still be cancelled.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use regex::{Match, Regex, RegexBuilder};

use crate::dedup::trim_text;
use crate::error::SearchError;
use crate::models::{
    MatchRecord, MatchSpan, SearchResult, SearchSpec, SourceSearchResult, TextSource,
};
use crate::scheduler::{Scheduler, YieldPoint};

pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(10);
pub const DEFAULT_DISPLAY_CHARS: usize = 2000;
pub const DEFAULT_YIELD_INTERVAL_CHARS: usize = 5000;
/// Lines scanned between two yields in line-scoped mode.
pub const LINE_YIELD_INTERVAL: usize = 10_000;

/// Appended to a full-text display string that was cut short.
pub const ELLIPSIS: &str = "…";

/// Tuning knobs for full-text matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget per source in full-text mode.
    pub time_budget: Duration,
    /// Maximum characters of a full-text display string before [`ELLIPSIS`].
    pub display_chars: usize,
    /// Characters of matched text between two full-text yields.
    pub yield_interval_chars: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            display_chars: DEFAULT_DISPLAY_CHARS,
            yield_interval_chars: DEFAULT_YIELD_INTERVAL_CHARS,
        }
    }
}

/// Bundles all inputs for a single search invocation.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub sources: &'a [TextSource],
    pub spec: &'a SearchSpec,
    pub limits: SearchLimits,
}

impl<'a> SearchRequest<'a> {
    /// A request with default [`SearchLimits`].
    pub fn new(sources: &'a [TextSource], spec: &'a SearchSpec) -> Self {
        Self {
            sources,
            spec,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Run a search over every source in `req`.
///
/// Fails only with [`SearchError::Pattern`] (before any source is touched)
/// or [`SearchError::Cancelled`] (at a yield point). Unreadable and empty
/// sources are skipped; sources without matches are left out of the result.
pub async fn search<S: Scheduler + ?Sized>(
    scheduler: &S,
    req: &SearchRequest<'_>,
) -> Result<SearchResult, SearchError> {
    if req.spec.pattern.is_empty() {
        return Ok(SearchResult::default());
    }

    let regex = compile_pattern(req.spec)?;
    let total = req.sources.len();
    let mut result = SearchResult::default();

    for (index, source) in req.sources.iter().enumerate() {
        if !source.is_searchable() {
            tracing::debug!(source = %source.name, "skipping unreadable or empty source");
            continue;
        }

        scheduler
            .yield_now(YieldPoint::SourceStart {
                source: &source.name,
                index,
                total,
            })
            .await;
        if scheduler.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let found = if req.spec.is_full_text() {
            full_text_matches(scheduler, &regex, source, &req.limits).await?
        } else {
            let records = line_matches(scheduler, &regex, source).await?;
            SourceSearchResult::new(&source.name, records)
        };

        tracing::debug!(
            source = %source.name,
            matches = found.total_matches,
            "searched source"
        );
        if found.total_matches > 0 {
            result.push(found);
        }
    }

    Ok(result)
}

/// Compile the pattern described by `spec`.
///
/// Literal patterns are escaped first. Case folding follows
/// `case_sensitive`; `.` matches newlines only in full-text mode.
pub fn compile_pattern(spec: &SearchSpec) -> Result<Regex, SearchError> {
    let source: Cow<'_, str> = if spec.is_regex {
        Cow::Borrowed(&spec.pattern)
    } else {
        Cow::Owned(regex::escape(&spec.pattern))
    };

    RegexBuilder::new(&source)
        .case_insensitive(!spec.case_sensitive)
        .dot_matches_new_line(spec.is_full_text())
        .build()
        .map_err(|e| SearchError::Pattern {
            pattern: spec.pattern.clone(),
            message: e.to_string(),
        })
}

/// Successive non-overlapping matches, found one `find_at` call at a time.
struct MatchCursor<'r, 'h> {
    regex: &'r Regex,
    haystack: &'h str,
    next: usize,
}

impl<'r, 'h> MatchCursor<'r, 'h> {
    fn new(regex: &'r Regex, haystack: &'h str) -> Self {
        Self {
            regex,
            haystack,
            next: 0,
        }
    }
}

impl<'h> Iterator for MatchCursor<'_, 'h> {
    type Item = Match<'h>;

    fn next(&mut self) -> Option<Match<'h>> {
        if self.next > self.haystack.len() {
            return None;
        }
        let Some(m) = self.regex.find_at(self.haystack, self.next) else {
            self.next = self.haystack.len() + 1;
            return None;
        };
        self.next = if m.start() == m.end() {
            step_past(self.haystack, m.end())
        } else {
            m.end()
        };
        Some(m)
    }
}

/// Byte offset one character past `at`, or one past the end.
fn step_past(s: &str, at: usize) -> usize {
    s[at..].chars().next().map_or(at + 1, |c| at + c.len_utf8())
}

async fn line_matches<S: Scheduler + ?Sized>(
    scheduler: &S,
    regex: &Regex,
    source: &TextSource,
) -> Result<Vec<MatchRecord>, SearchError> {
    let mut records = Vec::new();
    for (index, line) in source.content.split('\n').enumerate() {
        if index > 0 && index % LINE_YIELD_INTERVAL == 0 {
            scheduler
                .yield_now(YieldPoint::LineProgress {
                    source: &source.name,
                    lines: index,
                })
                .await;
            if scheduler.is_cancelled() {
                return Err(SearchError::Cancelled);
            }
        }

        let spans: Vec<MatchSpan> = MatchCursor::new(regex, line)
            .map(|m| MatchSpan {
                text: m.as_str().to_string(),
                offset: m.start(),
            })
            .collect();
        if spans.is_empty() {
            continue;
        }
        records.push(MatchRecord {
            line_number: index + 1,
            display_text: line.to_string(),
            spans,
            is_full_text_match: false,
            is_multi_line: false,
        });
    }
    Ok(records)
}

async fn full_text_matches<S: Scheduler + ?Sized>(
    scheduler: &S,
    regex: &Regex,
    source: &TextSource,
    limits: &SearchLimits,
) -> Result<SourceSearchResult, SearchError> {
    let content = source.content.as_str();
    let started = Instant::now();
    let mut cursor = MatchCursor::new(regex, content);
    let mut lines = LineTracker::new();
    let mut records = Vec::new();
    let mut since_yield = 0;
    let mut timed_out = false;

    loop {
        if started.elapsed() >= limits.time_budget {
            tracing::warn!(
                source = %source.name,
                matches = records.len(),
                budget_ms = limits.time_budget.as_millis() as u64,
                "full-text search ran out of time, keeping partial matches"
            );
            timed_out = true;
            break;
        }
        let Some(m) = cursor.next() else {
            break;
        };

        lines.advance_to(content, m.start());
        let leading = &content[lines.line_start..m.start()];
        records.push(window_match(
            leading,
            m.as_str(),
            lines.line_number,
            limits.display_chars,
        ));

        since_yield += m.as_str().chars().count();
        if since_yield >= limits.yield_interval_chars {
            since_yield = 0;
            scheduler
                .yield_now(YieldPoint::FullTextProgress {
                    source: &source.name,
                    matches: records.len(),
                })
                .await;
            if scheduler.is_cancelled() {
                return Err(SearchError::Cancelled);
            }
        }
    }

    let mut found = SourceSearchResult::new(&source.name, records);
    found.timed_out = timed_out;
    Ok(found)
}

/// Line number and line start of the last offset seen.
///
/// Offsets must be non-decreasing; each byte is scanned once.
struct LineTracker {
    scanned: usize,
    line_number: usize,
    line_start: usize,
}

impl LineTracker {
    fn new() -> Self {
        Self {
            scanned: 0,
            line_number: 1,
            line_start: 0,
        }
    }

    fn advance_to(&mut self, content: &str, offset: usize) {
        for (i, b) in content.as_bytes()[self.scanned..offset].iter().enumerate() {
            if *b == b'\n' {
                self.line_number += 1;
                self.line_start = self.scanned + i + 1;
            }
        }
        self.scanned = offset;
    }
}

/// Build the record for one full-text match.
///
/// Display = leading context + match, cut to `limit` characters plus
/// [`ELLIPSIS`]. A whitespace-only leading context is dropped. When cut, the
/// span start is clamped to `limit - 1` and its end to `limit`.
fn window_match(leading: &str, matched: &str, line_number: usize, limit: usize) -> MatchRecord {
    let leading = if trim_text(leading).is_empty() { "" } else { leading };

    // Counts are capped just past the limit; that is all the clamping needs.
    let leading_chars = leading.chars().take(limit + 1).count();
    let matched_chars = matched.chars().take(limit + 1).count();

    let (display_text, span) = if leading_chars + matched_chars <= limit {
        let mut display = String::with_capacity(leading.len() + matched.len());
        display.push_str(leading);
        display.push_str(matched);
        let span = MatchSpan {
            text: matched.to_string(),
            offset: leading.len(),
        };
        (display, span)
    } else {
        let mut display: String = leading.chars().chain(matched.chars()).take(limit).collect();
        let start = byte_index(&display, leading_chars.min(limit.saturating_sub(1)));
        let end = byte_index(&display, (leading_chars + matched_chars).min(limit));
        let span = MatchSpan {
            text: display[start..end].to_string(),
            offset: start,
        };
        display.push_str(ELLIPSIS);
        (display, span)
    };

    MatchRecord {
        line_number,
        display_text,
        spans: vec![span],
        is_full_text_match: true,
        is_multi_line: matched.contains('\n'),
    }
}

/// Byte offset of the `n`-th character, or the string length past the end.
fn byte_index(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}
