//! # Text Toolbox Core
//!
//! Runtime-free text processing for Text Toolbox: line deduplication,
//! literal/regex search with cooperative yielding, highlighting, and the
//! plain-text exports of their results.
//!
//! This crate contains no filesystem I/O, no terminal handling, and no
//! async runtime. Hosts drive the search engine through the
//! [`scheduler::Scheduler`] trait.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Sources, options, and result types |
//! | [`dedup`] | First-occurrence line deduplication |
//! | [`search`] | Line-scoped and full-text search engine |
//! | [`scheduler`] | Yield points and cancellation |
//! | [`error`] | `SearchError` |
//! | [`highlight`] | Display text segmentation |
//! | [`report`] | Report and clipboard text |

pub mod dedup;
pub mod error;
pub mod highlight;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod search;

pub use error::SearchError;
