//! Settle-delay scheduling of filter runs.
//!
//! Every keystroke submits the whole query again. A run waits for the settle delay
//! and then filters the page, unless a newer query was submitted in the meantime:
//! the pending run is cancelled, and a run that already woke up re-checks the
//! generation under the session lock before touching the page. A stale query
//! therefore never overwrites the result of a newer one.

use crate::catalog::Catalog;
use crate::filter::evaluate;
use crate::query::SearchQuery;
use crate::render::{PageView, apply};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What happened to a submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The filter ran and the page was updated.
    Applied { matched: usize, total: usize },
    /// A newer query replaced this one before it ran.
    Superseded,
}

/// A page and its index, owned by the scheduler for the page's lifetime.
#[derive(Debug)]
pub struct SearchSession<V> {
    pub catalog: Arc<Catalog>,
    pub view: V,
}

/// Runs filter queries against one page with a settle delay.
pub struct SearchScheduler<V> {
    session: Arc<Mutex<SearchSession<V>>>,
    generation: Arc<AtomicU64>,
    pending: std::sync::Mutex<CancellationToken>,
    settle_delay: Duration,
}

impl<V> std::fmt::Debug for SearchScheduler<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchScheduler")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("settle_delay", &self.settle_delay)
            .finish_non_exhaustive()
    }
}

impl<V: PageView + Send + 'static> SearchScheduler<V> {
    pub fn new(catalog: Arc<Catalog>, view: V, settle_delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(SearchSession { catalog, view })),
            generation: Arc::new(AtomicU64::new(0)),
            pending: std::sync::Mutex::new(CancellationToken::new()),
            settle_delay,
        }
    }

    /// Schedule a filter run for the current search bar contents.
    ///
    /// Cancels any run that has not yet applied. Must be called within a tokio runtime.
    pub fn submit(&self, raw: impl Into<String>) -> JoinHandle<RunStatus> {
        let raw = raw.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            let previous = std::mem::replace(&mut *pending, token.clone());
            previous.cancel();
        }

        let session = Arc::clone(&self.session);
        let latest = Arc::clone(&self.generation);
        let delay = self.settle_delay;

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::trace!("Query {:?} cancelled before settling", raw);
                    return RunStatus::Superseded;
                }
                () = tokio::time::sleep(delay) => {}
            }

            let mut session = session.lock().await;
            if latest.load(Ordering::SeqCst) != generation {
                tracing::trace!("Query {:?} superseded after settling", raw);
                return RunStatus::Superseded;
            }

            let query = SearchQuery::parse(&raw);
            let outcome = evaluate(&session.catalog, &query);
            apply(&mut session.view, &outcome);

            RunStatus::Applied {
                matched: outcome.matched(),
                total: outcome.verdicts.len(),
            }
        })
    }

    /// Read the page under the session lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&SearchSession<V>) -> R) -> R {
        let session = self.session.lock().await;
        f(&session)
    }

    /// Number of queries submitted so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
