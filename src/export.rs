//! Writing command output to stdout or a file.
//!
//! `--output` may name a file or an existing directory; in the latter case
//! the file gets the default download name for its kind (for example
//! `search_results_<millis>.txt`).

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `content` to `output`, or to stdout when `output` is `None`.
///
/// Returns the path written, if any.
pub fn write_output(
    content: &str,
    output: Option<&Path>,
    default_name: impl FnOnce() -> String,
) -> Result<Option<PathBuf>> {
    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(default_name())
            } else {
                path.to_path_buf()
            };
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
            Ok(Some(path))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(None)
        }
    }
}
