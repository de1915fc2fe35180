//! Plain-text exports of search and dedup results.
//!
//! [`search_report`] renders the downloadable report, [`flatten`] the text
//! placed on the clipboard. Both list each record's display text on its own
//! line, in result order.
//!
//! Report layout:
//!
//! ```text
//! 搜索结果报告
//! ==============
//! 搜索关键词: <pattern>
//! 区分大小写: <是|否>
//! 搜索时间: <timestamp>
//! 匹配总数: <total>
//!
//! 文件: <source>
//! 匹配数: <count>
//! --------------------------------------------------
//! <display text>
//! ```

use std::fmt::Write;

use chrono::{DateTime, TimeZone};

use crate::models::{SearchResult, SearchSpec};

const TIMESTAMP_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

/// Render the downloadable search report.
pub fn search_report<Tz>(
    result: &SearchResult,
    spec: &SearchSpec,
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "搜索结果报告\n==============\n搜索关键词: {}\n区分大小写: {}\n搜索时间: {}\n匹配总数: {}\n\n",
        spec.pattern,
        if spec.case_sensitive { "是" } else { "否" },
        generated_at.format(TIMESTAMP_FORMAT),
        result.total_match_count,
    );

    for source in &result.sources {
        let _ = writeln!(out, "文件: {}", source.source_name);
        let _ = writeln!(out, "匹配数: {}", source.total_matches);
        out.push_str(&"-".repeat(50));
        out.push('\n');
        for record in &source.matches {
            out.push_str(&record.display_text);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Render the clipboard text: one display string per line.
pub fn flatten(result: &SearchResult) -> String {
    let mut out = String::new();
    for record in result.sources.iter().flat_map(|s| &s.matches) {
        out.push_str(&record.display_text);
        out.push('\n');
    }
    out
}

/// Download file name for a search report.
pub fn default_report_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("search_results_{}.txt", now.timestamp_millis())
}

/// Download file name for deduplicated content.
pub fn default_dedup_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("unique_lines_{}.txt", now.timestamp_millis())
}
