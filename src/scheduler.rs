//! Tokio-backed [`Scheduler`] for the CLI.
//!
//! Each yield point reports progress, then gives the tokio runtime a chance
//! to run other tasks (notably the Ctrl-C listener). Cancellation is a
//! shared flag checked by the engine after every yield.
//!
//! The first Ctrl-C cancels the search at its next yield point; a second
//! one exits with status 130. Once installed, the listener stays active
//! until the process exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use text_toolbox_core::scheduler::{Scheduler, YieldPoint};

use crate::progress::SearchProgressReporter;

pub struct TokioScheduler {
    reporter: Box<dyn SearchProgressReporter>,
    cancelled: Arc<AtomicBool>,
}

impl TokioScheduler {
    pub fn new(reporter: Box<dyn SearchProgressReporter>) -> Self {
        Self {
            reporter,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for cancelling the search from another task.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Cancel the search at its next yield point when Ctrl-C is pressed.
    pub fn cancel_on_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        let cancelled = self.cancel_handle();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match on_interrupt(&cancelled) {
                    Interrupt::Cancel => {
                        tracing::info!("interrupt received, cancelling search");
                        eprintln!("Cancelling search (press Ctrl-C again to exit)");
                    }
                    Interrupt::Exit => std::process::exit(INTERRUPTED_EXIT_CODE),
                }
            }
        })
    }
}

/// Exit status after a second Ctrl-C (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    Cancel,
    Exit,
}

/// Cancel on the first interrupt, exit on any later one.
fn on_interrupt(cancelled: &AtomicBool) -> Interrupt {
    if cancelled.swap(true, Ordering::SeqCst) {
        Interrupt::Exit
    } else {
        Interrupt::Cancel
    }
}

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn yield_now<'a>(&self, point: YieldPoint<'a>) {
        self.reporter.report(point.into());
        tokio::task::yield_now().await;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
