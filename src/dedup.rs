//! `ttb dedup`: remove duplicate lines from files or stdin.

use anyhow::{bail, Result};
use chrono::Local;
use std::path::PathBuf;

use text_toolbox_core::dedup::{deduplicate, merge_sources, trim_text};
use text_toolbox_core::models::{DedupOptions, DedupResult};
use text_toolbox_core::report::default_dedup_name;

use crate::config::Config;
use crate::export::write_output;
use crate::provider;

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum DedupFormat {
    /// The unique lines only.
    Text,
    /// Counts, options and content as JSON.
    Json,
}

#[derive(Debug, Clone)]
pub struct DedupArgs {
    pub paths: Vec<PathBuf>,
    pub trim: bool,
    pub ignore_case: bool,
    pub format: DedupFormat,
    pub output: Option<PathBuf>,
}

impl DedupArgs {
    /// Config defaults with command-line flags applied on top.
    pub fn options(&self, defaults: DedupOptions) -> DedupOptions {
        DedupOptions {
            trim_whitespace: defaults.trim_whitespace || self.trim,
            case_sensitive: defaults.case_sensitive && !self.ignore_case,
        }
    }
}

pub fn run_dedup(config: &Config, args: &DedupArgs) -> Result<()> {
    let options = args.options(config.dedup);

    let input = if args.paths.is_empty() {
        let pasted = provider::read_stdin()?;
        if trim_text(&pasted).is_empty() {
            println!("No input.");
            return Ok(());
        }
        pasted
    } else {
        let sources = provider::load_sources(&args.paths, &config.files)?;
        for source in sources.iter().filter(|s| s.read_error.is_some()) {
            eprintln!(
                "warning: skipping {}: {}",
                source.name,
                source.read_error.as_deref().unwrap_or("read failed")
            );
        }
        match merge_sources(&sources) {
            Some(merged) => merged,
            None => bail!("No readable files to deduplicate"),
        }
    };

    let result = deduplicate(&input, &options);
    tracing::debug!(
        original = result.original_line_count,
        unique = result.unique_line_count,
        "deduplicated"
    );
    eprintln!("{}", summary(&result));

    let rendered = match args.format {
        DedupFormat::Text if args.output.is_none() => format!("{}\n", result.content),
        DedupFormat::Text => result.content.clone(),
        DedupFormat::Json => {
            let obj = serde_json::json!({
                "options": options,
                "original_line_count": result.original_line_count,
                "unique_line_count": result.unique_line_count,
                "removed_line_count": result.removed_line_count(),
                "content": result.content,
            });
            serde_json::to_string_pretty(&obj)? + "\n"
        }
    };

    let now = Local::now();
    write_output(&rendered, args.output.as_deref(), || default_dedup_name(&now))?;
    Ok(())
}

fn summary(result: &DedupResult) -> String {
    format!(
        "Lines: {} original, {} unique, {} removed",
        result.original_line_count,
        result.unique_line_count,
        result.removed_line_count()
    )
}
