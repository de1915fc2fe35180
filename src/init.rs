//! `ttb init`: scaffold a commented config file.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config::EXAMPLE_CONFIG;

pub fn scaffold_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created config: {}", path.display());
    Ok(())
}
