//! TOML configuration for the `ttb` CLI.
//!
//! Every field has a default, so an absent config file is equivalent to an
//! empty one. See [`EXAMPLE_CONFIG`] for the full set of keys.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use text_toolbox_core::models::DedupOptions;
use text_toolbox_core::search::{
    SearchLimits, DEFAULT_DISPLAY_CHARS, DEFAULT_TIME_BUDGET, DEFAULT_YIELD_INTERVAL_CHARS,
};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub dedup: DedupOptions,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-source wall-clock budget for full-text search.
    pub time_budget_ms: u64,
    pub display_chars: usize,
    pub yield_interval_chars: usize,
    /// Records shown per source in human output before "… N more".
    pub preview_matches: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET.as_millis() as u64,
            display_chars: DEFAULT_DISPLAY_CHARS,
            yield_interval_chars: DEFAULT_YIELD_INTERVAL_CHARS,
            preview_matches: 5,
        }
    }
}

impl SearchConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            time_budget: Duration::from_millis(self.time_budget_ms),
            display_chars: self.display_chars,
            yield_interval_chars: self.yield_interval_chars,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FilesConfig {
    /// Globs applied to files found while walking a directory argument.
    pub include_globs: Vec<String>,
    pub exclude_globs: Vec<String>,
    pub follow_symlinks: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    ["txt", "log", "md", "csv", "json"]
        .iter()
        .map(|ext| format!("**/*.{}", ext))
        .collect()
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Commented config written by `ttb init`.
pub const EXAMPLE_CONFIG: &str = r#"# Text Toolbox configuration

[search]
# Wall-clock budget per source for --full-text searches.
time_budget_ms = 10000
# Full-text matches longer than this many characters are cut with "…".
display_chars = 2000
# Yield to the runtime after this many matched characters.
yield_interval_chars = 5000
# Matches listed per source before "… N more matches".
preview_matches = 5

[dedup]
trim_whitespace = false
case_sensitive = true

[files]
include_globs = ["**/*.txt", "**/*.log", "**/*.md", "**/*.csv", "**/*.json"]
exclude_globs = []
follow_symlinks = false

[logging]
# error | warn | info | debug | trace (RUST_LOG takes precedence)
level = "warn"
"#;

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to defaults.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.search.time_budget_ms == 0 {
        anyhow::bail!("search.time_budget_ms must be > 0");
    }
    if config.search.display_chars == 0 {
        anyhow::bail!("search.display_chars must be > 0");
    }
    if config.search.yield_interval_chars == 0 {
        anyhow::bail!("search.yield_interval_chars must be > 0");
    }
    if config.search.preview_matches == 0 {
        anyhow::bail!("search.preview_matches must be > 0");
    }

    match config.logging.level.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" | "off" => {}
        other => anyhow::bail!(
            "Unknown logging level: '{}'. Must be error, warn, info, debug, trace, or off.",
            other
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_parses_to_defaults() {
        let config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        validate(&config).unwrap();
        assert_eq!(config.search.limits(), SearchLimits::default());
        assert_eq!(config.dedup, DedupOptions::default());
        assert_eq!(config.files.include_globs, default_include_globs());
        assert_eq!(config.search.preview_matches, 5);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str("[dedup]\ntrim_whitespace = true\n").unwrap();
        assert!(config.dedup.trim_whitespace);
        assert!(config.dedup.case_sensitive);
        assert_eq!(config.search.display_chars, 2000);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn rejects_zero_limits() {
        let config: Config = toml::from_str("[search]\ndisplay_chars = 0\n").unwrap();
        assert!(validate(&config).is_err());
        let config: Config = toml::from_str("[search]\ntime_budget_ms = 0\n").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config: Config = toml::from_str("[logging]\nlevel = \"loud\"\n").unwrap();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.search.time_budget_ms, 10_000);
    }
}
