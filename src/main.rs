//! # Text Toolbox CLI (`ttb`)
//!
//! Search text sources for a literal or regular-expression pattern, and
//! remove duplicate lines.
//!
//! ## Usage
//!
//! ```bash
//! ttb --config ./config/ttb.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ttb search <pattern> [paths]` | Search files, directories, or stdin |
//! | `ttb dedup [paths]` | Remove duplicate lines |
//! | `ttb files [paths]` | List the sources paths resolve to |
//! | `ttb init` | Write a commented example config |
//!
//! ## Examples
//!
//! ```bash
//! # Case-insensitive literal search across a directory
//! ttb search "timeout" ./logs --ignore-case
//!
//! # Regex across line breaks, saved as a report
//! ttb search 'start.*\n.*end' notes.txt --regex --full-text --format report --output out/
//!
//! # Deduplicate pasted text
//! pbpaste | ttb dedup --trim
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use text_toolbox::dedup::{DedupArgs, DedupFormat};
use text_toolbox::progress::ProgressMode;
use text_toolbox::search::{SearchArgs, SearchFormat};
use text_toolbox::{config, dedup, init, logging, search, sources};

/// Text Toolbox: duplicate-line removal and regex/literal text search.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file means built-in defaults; `ttb init` writes one.
#[derive(Parser)]
#[command(name = "ttb", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/ttb.toml")]
    config: PathBuf,

    /// Progress output on stderr: auto (human when stderr is a TTY), human, json, off.
    #[arg(long, global = true, value_enum, default_value = "auto")]
    progress: ProgressMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search text sources for a pattern.
    ///
    /// With no paths, stdin is searched as a single pasted source.
    /// Directories are walked using the `[files]` include/exclude globs.
    Search {
        /// Literal text or regular expression (surrounding whitespace is trimmed).
        pattern: String,

        /// Files or directories to search.
        paths: Vec<PathBuf>,

        /// Treat the pattern as a regular expression.
        #[arg(long)]
        regex: bool,

        /// Match regardless of case.
        #[arg(long, short = 'i')]
        ignore_case: bool,

        /// Match the regex against whole sources so matches may span lines.
        /// Ignored without `--regex`.
        #[arg(long)]
        full_text: bool,

        #[arg(long, value_enum, default_value = "human")]
        format: SearchFormat,

        /// Write to this file, or into this directory with the default name.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Remove duplicate lines, keeping the first occurrence.
    ///
    /// Multiple files are concatenated and deduplicated together.
    Dedup {
        /// Files or directories to read. Reads stdin when empty.
        paths: Vec<PathBuf>,

        /// Ignore leading and trailing whitespace when comparing lines.
        #[arg(long)]
        trim: bool,

        /// Compare lines case-insensitively.
        #[arg(long, short = 'i')]
        ignore_case: bool,

        #[arg(long, value_enum, default_value = "text")]
        format: DedupFormat,

        /// Write to this file, or into this directory with the default name.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the files paths resolve to, with sizes or read errors.
    Files {
        /// Files or directories. Defaults to the current directory.
        paths: Vec<PathBuf>,
    },

    /// Write a commented example config to the `--config` path.
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init::scaffold_config(&cli.config)?;
        return Ok(());
    }

    let cfg = config::load_config_or_default(&cli.config)?;
    logging::init(&cfg.logging);

    match cli.command {
        Commands::Search {
            pattern,
            paths,
            regex,
            ignore_case,
            full_text,
            format,
            output,
        } => {
            let args = SearchArgs {
                pattern,
                paths,
                regex,
                ignore_case,
                full_text,
                format,
                output,
            };
            search::run_search(&cfg, &args, cli.progress).await?;
        }
        Commands::Dedup {
            paths,
            trim,
            ignore_case,
            format,
            output,
        } => {
            let args = DedupArgs {
                paths,
                trim,
                ignore_case,
                format,
                output,
            };
            dedup::run_dedup(&cfg, &args)?;
        }
        Commands::Files { paths } => {
            sources::list_files(&cfg, &paths)?;
        }
        Commands::Init => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
