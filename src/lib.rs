//! # Text Toolbox
//!
//! Duplicate-line removal and regex/literal text search over files and
//! pasted text, as a command-line tool (`ttb`).
//!
//! The text-processing engine lives in [`text_toolbox_core`]; this crate is
//! the command-line collaborator around it: it turns paths and stdin into
//! named sources, drives the search on a tokio runtime with progress and
//! Ctrl-C cancellation, and renders or exports the results.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────────┐
//! │  Provider    │──▶│ text-toolbox-core  │──▶│  Rendering   │
//! │ files/stdin  │   │ dedup / search     │   │ human/json/  │
//! └──────────────┘   └─────────┬──────────┘   │ flat/report  │
//!                              │ yield points └──────────────┘
//!                              ▼
//!                    ┌────────────────────┐
//!                    │ TokioScheduler     │
//!                    │ progress + Ctrl-C  │
//!                    └────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! ttb init                                  # write ./config/ttb.toml
//! ttb search "error" logs/                  # literal search
//! ttb search 'BEGIN[\s\S]*?END' --regex --full-text notes.txt
//! ttb search "todo" --format report --output ./reports/
//! cat list.txt | ttb dedup --trim --ignore-case
//! ttb files docs/                           # what a directory resolves to
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`provider`] | Files, directories and stdin as text sources |
//! | [`progress`] | Search progress on stderr |
//! | [`scheduler`] | Tokio scheduler with cancellation |
//! | [`search`] | `ttb search` |
//! | [`dedup`] | `ttb dedup` |
//! | [`sources`] | `ttb files` |
//! | [`init`] | `ttb init` |
//! | [`export`] | Writing output to stdout or files |

pub mod config;
pub mod dedup;
pub mod export;
pub mod init;
pub mod logging;
pub mod progress;
pub mod provider;
pub mod scheduler;
pub mod search;
pub mod sources;
