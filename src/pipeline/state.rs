//! Bookkeeping for distinct filtering and request supersession.

use crate::model::FetchKind;
use crate::types::Query;
use tokio::task::JoinHandle;

/// Token identifying one dispatch. Only the latest one may emit.
pub(crate) type Generation = u64;

/// A fetch the pipeline decided to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dispatch {
    pub generation: Generation,
    pub query: Query,
    pub kind: FetchKind,
}

/// The spawned fetch task of the current generation.
///
/// Dropping it aborts the task, so replacing or discarding the in-flight
/// slot is enough to cancel the request.
struct InFlight {
    generation: Generation,
    task: JoinHandle<()>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            log::debug!("Cancelling fetch #{}", self.generation);
            self.task.abort();
        }
    }
}

/// Everything the pipeline remembers between inputs.
pub(crate) struct PipelineState {
    min_query_chars: usize,
    last_surviving: Option<Query>,
    generation: Generation,
    in_flight: Option<InFlight>,
}

impl PipelineState {
    pub(crate) fn new(min_query_chars: usize) -> Self {
        Self {
            min_query_chars,
            last_surviving: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// Applies the distinct filter to a query that survived debounce and,
    /// if it passes, opens a new generation and cancels the previous fetch.
    pub(crate) fn admit(&mut self, query: Query) -> Option<Dispatch> {
        if self.last_surviving.as_ref() == Some(&query) {
            log::debug!("Ignoring repeated query '{}'", query);
            return None;
        }
        self.last_surviving = Some(query.clone());

        self.generation += 1;
        self.in_flight = None;

        let kind = if query.is_searchable(self.min_query_chars) {
            FetchKind::Search
        } else {
            FetchKind::Default
        };
        Some(Dispatch {
            generation: self.generation,
            query,
            kind,
        })
    }

    /// Records the task serving `generation`. Stale registrations are
    /// aborted immediately.
    pub(crate) fn track(&mut self, generation: Generation, task: JoinHandle<()>) {
        let in_flight = InFlight { generation, task };
        if generation == self.generation {
            self.in_flight = Some(in_flight);
        }
    }

    /// Called when a fetch reports back. Returns whether its result may be
    /// emitted; a stale generation is dropped on arrival.
    pub(crate) fn settle(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale result #{} (current #{})",
                generation,
                self.generation
            );
            return false;
        }
        self.in_flight = None;
        true
    }

    /// No fetch is outstanding.
    pub(crate) fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }
}
