//! Splitting a record's display text into plain and highlighted pieces.

use serde::Serialize;

use crate::models::MatchRecord;

/// A contiguous piece of a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

impl MatchRecord {
    /// Cover `display_text` with segments, highlighting every span.
    ///
    /// Spans are taken in offset order. A span that overlaps an earlier one
    /// or does not slice `display_text` cleanly is ignored.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let text = self.display_text.as_str();
        let mut spans: Vec<(usize, usize)> = self
            .spans
            .iter()
            .map(|s| (s.offset, s.offset + s.text.len()))
            .collect();
        spans.sort_unstable();

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut pos = 0;
        for (start, end) in spans {
            if start < pos || start == end || text.get(start..end).is_none() {
                continue;
            }
            if start > pos {
                segments.push(Segment {
                    text: &text[pos..start],
                    highlighted: false,
                });
            }
            segments.push(Segment {
                text: &text[start..end],
                highlighted: true,
            });
            pos = end;
        }
        if pos < text.len() {
            segments.push(Segment {
                text: &text[pos..],
                highlighted: false,
            });
        }
        segments
    }
}
