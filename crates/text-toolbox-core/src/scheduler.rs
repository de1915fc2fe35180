//! Cooperative scheduling seam for the search engine.
//!
//! The [`Scheduler`] trait is how the engine hands control back to its host
//! between bounded chunks of work. The engine itself never sleeps, spawns,
//! or touches a runtime; the calling application decides what a yield means
//! (a `tokio::task::yield_now`, a frame callback, nothing at all).
//!
//! Every yield point doubles as a cancellation checkpoint: after awaiting
//! [`Scheduler::yield_now`] the engine consults [`Scheduler::is_cancelled`].
//!
//! # Yield points
//!
//! | Point | When |
//! |-------|------|
//! | [`YieldPoint::SourceStart`] | Once per searchable source, before matching it |
//! | [`YieldPoint::FullTextProgress`] | Every `yield_interval_chars` matched characters (full-text) |
//! | [`YieldPoint::LineProgress`] | Every `LINE_YIELD_INTERVAL` lines in line-scoped mode |

use async_trait::async_trait;

/// Where the engine is when it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldPoint<'a> {
    /// About to search `source`, the `index`-th (0-based) of `total` inputs.
    SourceStart {
        source: &'a str,
        index: usize,
        total: usize,
    },
    /// Full-text scan of `source` is under way with `matches` collected.
    FullTextProgress { source: &'a str, matches: usize },
    /// Line-scoped scan of `source` has passed `lines` lines.
    LineProgress { source: &'a str, lines: usize },
}

/// Host-provided implementation of the engine's yield points.
///
/// Implementations must be `Send + Sync` so a search future can move
/// between worker threads.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Suspend until the host is ready to continue.
    async fn yield_now<'a>(&self, point: YieldPoint<'a>);

    /// Checked after every yield; `true` aborts the search.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Scheduler that never suspends and never cancels.
///
/// Suitable for tests, batch callers, and hosts without an event loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

#[async_trait]
impl Scheduler for Immediate {
    async fn yield_now<'a>(&self, _point: YieldPoint<'a>) {}
}
