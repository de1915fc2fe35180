//! `ttb search`: run the search engine over files or stdin and render the
//! result.

use anyhow::{bail, Result};
use chrono::Local;
use std::path::PathBuf;

use text_toolbox_core::dedup::trim_text;
use text_toolbox_core::models::{MatchRecord, SearchResult, SearchSpec, TextSource};
use text_toolbox_core::report::{default_report_name, flatten, search_report};
use text_toolbox_core::search::{search, SearchRequest};

use crate::config::Config;
use crate::export::write_output;
use crate::progress::ProgressMode;
use crate::provider;
use crate::scheduler::TokioScheduler;

const HIGHLIGHT_ON: &str = "\x1b[1;33m";
const HIGHLIGHT_OFF: &str = "\x1b[0m";

/// How search results are written.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum SearchFormat {
    /// Per-source match listing with line numbers.
    Human,
    /// The full result as JSON.
    Json,
    /// One matched line per output line (clipboard text).
    Flat,
    /// The downloadable plain-text report.
    Report,
}

#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub pattern: String,
    pub paths: Vec<PathBuf>,
    pub regex: bool,
    pub ignore_case: bool,
    pub full_text: bool,
    pub format: SearchFormat,
    pub output: Option<PathBuf>,
}

impl SearchArgs {
    /// The engine spec. `None` when the trimmed pattern is empty.
    pub fn spec(&self) -> Option<SearchSpec> {
        let pattern = trim_text(&self.pattern);
        if pattern.is_empty() {
            return None;
        }
        Some(SearchSpec {
            pattern: pattern.to_string(),
            is_regex: self.regex,
            case_sensitive: !self.ignore_case,
            full_text: self.regex && self.full_text,
        })
    }
}

pub async fn run_search(config: &Config, args: &SearchArgs, progress: ProgressMode) -> Result<()> {
    let Some(spec) = args.spec() else {
        println!("No results.");
        return Ok(());
    };
    if args.full_text && !args.regex {
        eprintln!("warning: --full-text only applies to --regex searches, searching line by line");
    }

    let sources = collect_sources(config, &args.paths)?;

    let scheduler = TokioScheduler::new(progress.reporter());
    let ctrl_c = scheduler.cancel_on_ctrl_c();
    let req = SearchRequest::new(&sources, &spec).with_limits(config.search.limits());
    let outcome = search(&scheduler, &req).await;
    ctrl_c.abort();
    let result = outcome?;

    for source in result.sources.iter().filter(|s| s.timed_out) {
        eprintln!(
            "warning: search of {} stopped after {} ms, showing {} matches found so far",
            source.source_name, config.search.time_budget_ms, source.total_matches
        );
    }

    let now = Local::now();
    let rendered = match args.format {
        SearchFormat::Human => {
            let color = args.output.is_none() && atty::is(atty::Stream::Stdout);
            render_human(&result, config.search.preview_matches, color)
        }
        SearchFormat::Json => serde_json::to_string_pretty(&result)? + "\n",
        SearchFormat::Flat => {
            if result.is_empty() {
                bail!("No search results to copy");
            }
            flatten(&result)
        }
        SearchFormat::Report => {
            if result.is_empty() {
                bail!("No search results to export");
            }
            search_report(&result, &spec, &now)
        }
    };

    write_output(&rendered, args.output.as_deref(), || default_report_name(&now))?;
    Ok(())
}

/// Sources for a search: readable files, or stdin when no paths are given.
fn collect_sources(config: &Config, paths: &[PathBuf]) -> Result<Vec<TextSource>> {
    if paths.is_empty() {
        let pasted = provider::read_stdin()?;
        if trim_text(&pasted).is_empty() {
            bail!("No text to search: stdin was empty");
        }
        return Ok(vec![TextSource::pasted(pasted)]);
    }

    let loaded = provider::load_sources(paths, &config.files)?;
    let (readable, failed) = provider::partition_readable(loaded);
    for source in &failed {
        eprintln!(
            "warning: skipping {}: {}",
            source.name,
            source.read_error.as_deref().unwrap_or("read failed")
        );
    }
    if readable.is_empty() {
        bail!("No readable files to search");
    }
    Ok(readable)
}

/// Render results for a terminal or plain file.
pub fn render_human(result: &SearchResult, preview: usize, color: bool) -> String {
    if result.is_empty() {
        return "No results.\n".to_string();
    }

    let mut out = String::new();
    for source in &result.sources {
        out.push_str(&format!(
            "{} ({} match{})\n",
            source.source_name,
            source.total_matches,
            if source.total_matches == 1 { "" } else { "es" }
        ));
        for record in source.matches.iter().take(preview) {
            out.push_str(&format!(
                "{:>6}: {}\n",
                record.line_number,
                render_record(record, color)
            ));
        }
        let hidden = source.matches.len().saturating_sub(preview);
        if hidden > 0 {
            out.push_str(&format!("        … {} more matches\n", hidden));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "Found {} match{} in {} source{}.\n",
        result.total_match_count,
        if result.total_match_count == 1 { "" } else { "es" },
        result.sources.len(),
        if result.sources.len() == 1 { "" } else { "s" }
    ));
    out
}

fn render_record(record: &MatchRecord, color: bool) -> String {
    let mut line = String::with_capacity(record.display_text.len());
    for segment in record.segments() {
        let text = segment.text.replace('\n', "\n        ");
        if segment.highlighted && color {
            line.push_str(HIGHLIGHT_ON);
            line.push_str(&text);
            line.push_str(HIGHLIGHT_OFF);
        } else {
            line.push_str(&text);
        }
    }
    line
}
