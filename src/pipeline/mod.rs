// src/pipeline/mod.rs
//! The query pipeline. Turns a live sequence of typed text into a live
//! sequence of result batches.
//!
//! Each input goes through four stages:
//!
//! 1. **Debounce** — a value is only acted upon once input has been quiet for
//!    the debounce window. An empty query is injected on activation so a
//!    default batch appears before anything is typed.
//! 2. **Distinct** — a value equal to the previous surviving value is dropped.
//! 3. **Dispatch** — short queries load the default batch, longer ones search.
//! 4. **Switch to latest** — a new dispatch cancels the fetch in flight, and
//!    a generation token guarantees a superseded result is never emitted.
//!
//! Fetch failures are logged and replaced by an empty batch; they never end
//! the session.

mod debounce;
mod state;

use crate::api::QueryFetcher;
use crate::constants::{MIN_SEARCH_QUERY_CHARS, RESULT_CHANNEL_CAPACITY, SEARCH_DEBOUNCE};
use crate::error::FetchError;
use crate::model::{FetchKind, ResultBatch};
use crate::types::Query;
use debounce::Debouncer;
use futures::{FutureExt, Stream, StreamExt};
use state::{Dispatch, Generation, PipelineState};
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Tuning knobs of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Quiet period required before a query is acted upon.
    pub debounce: Duration,
    /// Queries with fewer chars than this load the default batch.
    pub min_query_chars: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            min_query_chars: MIN_SEARCH_QUERY_CHARS,
        }
    }
}

/// A configured, not yet running pipeline.
pub struct QueryPipeline<F: QueryFetcher> {
    fetcher: Arc<F>,
    settings: PipelineSettings,
}

impl<F: QueryFetcher> QueryPipeline<F> {
    pub fn new(fetcher: Arc<F>, settings: PipelineSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Starts observing `input` and returns the session carrying the output.
    ///
    /// Must be called within a tokio runtime. The session ends once `input`
    /// ends and the last fetch has reported back, or when it is deactivated.
    pub fn observe<S>(self, input: S) -> SearchSession<F::Item>
    where
        S: Stream + Send + Unpin + 'static,
        S::Item: Into<Query> + Send,
    {
        let (results_tx, results) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        log::debug!(
            "Activating query pipeline (debounce {:?}, min query {} chars)",
            self.settings.debounce,
            self.settings.min_query_chars
        );
        let driver = tokio::spawn(drive(self.fetcher, self.settings, input, results_tx));
        SearchSession { results, driver }
    }

    /// Starts the pipeline on a fresh channel and returns its input side.
    pub fn activate(self) -> (QueryInput, SearchSession<F::Item>) {
        let (sender, receiver) = futures::channel::mpsc::unbounded();
        let session = self.observe(receiver);
        (QueryInput { sender }, session)
    }
}

/// Pushes text into a pipeline started with [`QueryPipeline::activate`].
///
/// Dropping every clone ends the input sequence.
#[derive(Clone)]
pub struct QueryInput {
    sender: futures::channel::mpsc::UnboundedSender<Query>,
}

impl QueryInput {
    /// Submits the current text of the search box. Returns `false` once the
    /// pipeline is gone.
    pub fn submit(&self, text: impl Into<Query>) -> bool {
        self.sender.unbounded_send(text.into()).is_ok()
    }

    /// Ends the input sequence for every clone.
    pub fn close(&self) {
        self.sender.close_channel();
    }
}

/// The output side of a running pipeline.
///
/// Dropping the session deactivates the pipeline: the debounce timer and any
/// in-flight fetch are released and nothing more is emitted.
pub struct SearchSession<T> {
    results: mpsc::Receiver<ResultBatch<T>>,
    driver: JoinHandle<()>,
}

impl<T> SearchSession<T> {
    /// Waits for the next batch. `None` once the pipeline has finished.
    pub async fn next_batch(&mut self) -> Option<ResultBatch<T>> {
        self.results.recv().await
    }

    /// Whether the pipeline is still processing input.
    pub fn is_active(&self) -> bool {
        !self.driver.is_finished()
    }

    /// Stops the pipeline immediately.
    pub fn deactivate(self) {
        drop(self);
    }
}

impl<T> Stream for SearchSession<T> {
    type Item = ResultBatch<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().results.poll_recv(cx)
    }
}

impl<T> Drop for SearchSession<T> {
    fn drop(&mut self) {
        if !self.driver.is_finished() {
            log::debug!("Deactivating query pipeline");
            self.driver.abort();
        }
    }
}

/// What a fetch task reports back to the driver.
struct Completion<T> {
    generation: Generation,
    query: Query,
    kind: FetchKind,
    outcome: Result<Vec<T>, FetchError>,
}

impl<T> Completion<T> {
    /// Error containment: a failure becomes an empty batch.
    fn into_batch(self) -> ResultBatch<T> {
        match self.outcome {
            Ok(items) => {
                log::debug!(
                    "Fetch #{} ({} '{}') returned {} items",
                    self.generation,
                    self.kind,
                    self.query,
                    items.len()
                );
                ResultBatch::fetched(self.query, self.kind, items)
            }
            Err(err) => {
                log::error!(
                    "Fetch #{} ({} '{}') failed: {}",
                    self.generation,
                    self.kind,
                    self.query,
                    err
                );
                ResultBatch::recovered(self.query, self.kind, err.to_string())
            }
        }
    }
}

/// The driver loop: one task per session, owning all pipeline state.
async fn drive<F, S>(
    fetcher: Arc<F>,
    settings: PipelineSettings,
    mut input: S,
    results: mpsc::Sender<ResultBatch<F::Item>>,
) where
    F: QueryFetcher,
    S: Stream + Unpin,
    S::Item: Into<Query> + Send,
{
    let (completion_tx, mut completions) = mpsc::unbounded_channel::<Completion<F::Item>>();
    let mut debouncer = Debouncer::new(settings.debounce);
    let mut state = PipelineState::new(settings.min_query_chars);
    let mut input_open = true;

    debouncer.push(Query::empty());

    loop {
        tokio::select! {
            biased;

            Some(completion) = completions.recv() => {
                if !state.settle(completion.generation) {
                    continue;
                }
                if results.send(completion.into_batch()).await.is_err() {
                    log::debug!("Result consumer went away, stopping pipeline");
                    break;
                }
            }

            next = input.next(), if input_open => match next {
                Some(text) => debouncer.push(text.into()),
                None => {
                    log::debug!("Input ended");
                    input_open = false;
                    if let Some(query) = debouncer.flush() {
                        dispatch(&fetcher, &mut state, query, &completion_tx);
                    }
                }
            },

            query = debouncer.settled(), if debouncer.is_armed() => {
                dispatch(&fetcher, &mut state, query, &completion_tx);
            }

            else => break,
        }

        if !input_open && !debouncer.is_armed() && state.is_idle() {
            break;
        }
    }

    log::debug!("Query pipeline finished");
}

/// Runs a surviving query through the distinct filter and, if it passes,
/// spawns the fetch for it.
fn dispatch<F: QueryFetcher>(
    fetcher: &Arc<F>,
    state: &mut PipelineState,
    query: Query,
    completions: &mpsc::UnboundedSender<Completion<F::Item>>,
) {
    let Some(Dispatch {
        generation,
        query,
        kind,
    }) = state.admit(query)
    else {
        return;
    };

    log::debug!("Dispatching fetch #{} ({} '{}')", generation, kind, query);

    let fetcher = Arc::clone(fetcher);
    let completions = completions.clone();
    let task = tokio::spawn(async move {
        let request = async {
            match kind {
                FetchKind::Default => fetcher.fetch_default().await,
                FetchKind::Search => fetcher.fetch_by_query(&query).await,
            }
        };
        let outcome = AssertUnwindSafe(request)
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(FetchError::Unavailable("fetch task panicked".to_string())));
        let _ = completions.send(Completion {
            generation,
            query,
            kind,
            outcome,
        });
    });
    state.track(generation, task);
}
