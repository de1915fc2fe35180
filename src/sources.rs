//! `ttb files`: show which sources a set of paths resolves to.
//!
//! Useful for checking include/exclude globs before searching a directory.

use anyhow::Result;
use std::path::PathBuf;

use text_toolbox_core::models::TextSource;

use crate::config::Config;
use crate::provider;

pub fn list_files(config: &Config, paths: &[PathBuf]) -> Result<()> {
    let cwd = [PathBuf::from(".")];
    let paths = if paths.is_empty() { &cwd[..] } else { paths };
    let sources = provider::load_sources(paths, &config.files)?;
    print!("{}", render_listing(&sources));
    Ok(())
}

fn render_listing(sources: &[TextSource]) -> String {
    let mut out = String::new();
    for source in sources {
        let line = match (&source.read_error, source.size_bytes) {
            (Some(err), _) => format!("{:<10} {}  ({})", "FAILED", source.name, err),
            (None, Some(size)) => format!("{:<10} {}", format_bytes(size), source.name),
            (None, None) => format!(
                "{:<10} {}",
                format_bytes(source.content.len() as u64),
                source.name
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    let failed = sources.iter().filter(|s| s.read_error.is_some()).count();
    out.push_str(&format!(
        "Loaded {} files ({} failed)\n",
        sources.len() - failed,
        failed
    ));
    out
}

/// Human-readable byte count: `B`, `KB`, `MB` or `GB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
