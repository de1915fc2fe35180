//! Search progress reporting.
//!
//! The engine's yield points double as progress ticks: the CLI scheduler
//! forwards each one to a [`SearchProgressReporter`]. Progress is emitted on
//! **stderr** so stdout stays parseable for scripts.

use std::io::Write;

use text_toolbox_core::scheduler::YieldPoint;

/// A single progress event for a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchProgressEvent {
    /// About to search the `n`-th (1-based) of `total` sources.
    Source { source: String, n: u64, total: u64 },
    /// Full-text scan of a source has `matches` matches so far.
    Scanning { source: String, matches: u64 },
    /// Line-scoped scan of a source has passed `lines` lines.
    Lines { source: String, lines: u64 },
}

impl From<YieldPoint<'_>> for SearchProgressEvent {
    fn from(point: YieldPoint<'_>) -> Self {
        match point {
            YieldPoint::SourceStart {
                source,
                index,
                total,
            } => SearchProgressEvent::Source {
                source: source.to_string(),
                n: index as u64 + 1,
                total: total as u64,
            },
            YieldPoint::FullTextProgress { source, matches } => SearchProgressEvent::Scanning {
                source: source.to_string(),
                matches: matches as u64,
            },
            YieldPoint::LineProgress { source, lines } => SearchProgressEvent::Lines {
                source: source.to_string(),
                lines: lines as u64,
            },
        }
    }
}

/// Reports search progress. Implementations write to stderr (human or JSON).
pub trait SearchProgressReporter: Send + Sync {
    fn report(&self, event: SearchProgressEvent);
}

/// Human-friendly progress on stderr: "search notes.txt  [2/5]".
pub struct StderrProgress;

impl SearchProgressReporter for StderrProgress {
    fn report(&self, event: SearchProgressEvent) {
        let line = match &event {
            SearchProgressEvent::Source { source, n, total } => {
                format!(
                    "search {}  [{} / {}]\n",
                    source,
                    format_number(*n),
                    format_number(*total)
                )
            }
            SearchProgressEvent::Scanning { source, matches } => {
                format!(
                    "search {}  scanning  {} matches\n",
                    source,
                    format_number(*matches)
                )
            }
            SearchProgressEvent::Lines { source, lines } => {
                format!(
                    "search {}  scanning  {} lines\n",
                    source,
                    format_number(*lines)
                )
            }
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl SearchProgressReporter for JsonProgress {
    fn report(&self, event: SearchProgressEvent) {
        let obj = match &event {
            SearchProgressEvent::Source { source, n, total } => serde_json::json!({
                "event": "progress",
                "source": source,
                "phase": "source",
                "n": n,
                "total": total
            }),
            SearchProgressEvent::Scanning { source, matches } => serde_json::json!({
                "event": "progress",
                "source": source,
                "phase": "scanning",
                "matches": matches
            }),
            SearchProgressEvent::Lines { source, lines } => serde_json::json!({
                "event": "progress",
                "source": source,
                "phase": "lines",
                "lines": lines
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl SearchProgressReporter for NoProgress {
    fn report(&self, _event: SearchProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    /// Human progress when stderr is a terminal, otherwise off.
    Auto,
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Resolve `Auto` against the terminal.
    pub fn resolve(self) -> Self {
        match self {
            ProgressMode::Auto if atty::is(atty::Stream::Stderr) => ProgressMode::Human,
            ProgressMode::Auto => ProgressMode::Off,
            other => other,
        }
    }

    /// Build a reporter for this mode.
    pub fn reporter(&self) -> Box<dyn SearchProgressReporter> {
        match self.resolve() {
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
            ProgressMode::Auto | ProgressMode::Off => Box::new(NoProgress),
        }
    }
}
