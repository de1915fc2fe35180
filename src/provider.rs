//! Text provider: turns command-line paths and stdin into [`TextSource`]s.
//!
//! Files named explicitly are always read. Directories are walked
//! recursively and filtered with the `[files]` include/exclude globs, in
//! sorted order. A file that cannot be decoded as UTF-8 (or read at all)
//! becomes a source carrying a `read_error` instead of failing the command.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use text_toolbox_core::models::TextSource;

use crate::config::FilesConfig;

pub fn load_sources(paths: &[PathBuf], files: &FilesConfig) -> Result<Vec<TextSource>> {
    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            sources.extend(scan_directory(path, files)?);
        } else if path.exists() {
            sources.push(read_source(path, &path.display().to_string()));
        } else {
            bail!("Path does not exist: {}", path.display());
        }
    }
    tracing::debug!(count = sources.len(), "loaded sources");
    Ok(sources)
}

fn scan_directory(root: &Path, files: &FilesConfig) -> Result<Vec<TextSource>> {
    let include_set = build_globset(&files.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(files.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut sources = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(files.follow_symlinks)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        sources.push(read_source(path, &path.display().to_string()));
    }

    Ok(sources)
}

fn read_source(path: &Path, name: &str) -> TextSource {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "failed to read file");
            return TextSource::failed(name, e.to_string());
        }
    };
    let size = bytes.len() as u64;
    match String::from_utf8(bytes) {
        Ok(content) => TextSource {
            size_bytes: Some(size),
            ..TextSource::new(name, content)
        },
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "file is not valid UTF-8");
            TextSource {
                size_bytes: Some(size),
                ..TextSource::failed(name, e.to_string())
            }
        }
    }
}

/// Split sources into readable ones and ones with a read error.
pub fn partition_readable(sources: Vec<TextSource>) -> (Vec<TextSource>, Vec<TextSource>) {
    sources.into_iter().partition(|s| s.read_error.is_none())
}

/// Read the whole of stdin as the pasted buffer.
pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
