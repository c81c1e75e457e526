//! Input smoothing: only the last value of a burst gets through.

use crate::types::Query;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep};

/// Holds the latest unsettled query and a single re-armable timer.
pub(crate) struct Debouncer {
    window: Duration,
    timer: Pin<Box<Sleep>>,
    pending: Option<Query>,
}

impl Debouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            timer: Box::pin(tokio::time::sleep(window)),
            pending: None,
        }
    }

    /// Replaces any pending query and restarts the window.
    pub(crate) fn push(&mut self, query: Query) {
        if let Some(superseded) = self.pending.replace(query) {
            log::trace!("Debounce dropped '{}'", superseded);
        }
        self.timer.as_mut().reset(Instant::now() + self.window);
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending query without waiting for the window.
    pub(crate) fn flush(&mut self) -> Option<Query> {
        self.pending.take()
    }

    /// Resolves with the pending query once the window elapses undisturbed.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future leaves the pending query in place.
    pub(crate) async fn settled(&mut self) -> Query {
        loop {
            if self.pending.is_none() {
                std::future::pending::<()>().await;
            }
            self.timer.as_mut().await;
            if let Some(query) = self.pending.take() {
                return query;
            }
        }
    }
}
