//! Cache slot for a deferred view.
//!
//! # State Machine
//! ```text
//! Unloaded ──activate──▶ Loading ──Ok──▶ Loaded (terminal)
//!     ▲                     │
//!     └────────Err──────────┘
//! ```
//!
//! # Design Decisions
//! - The loader runs on its own tokio task; callers only wait on a watch
//!   channel, so a dropped or timed-out caller never cancels the load
//! - At most one load is in flight per slot; later callers join it
//! - The state lock is never held across an await point
//! - Failures are not cached: the slot returns to Unloaded

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::watch;

use crate::observability::metrics::{self, ActivationSource};
use crate::routing::types::LoadError;

/// Future produced by a deferred loader.
pub type LoadFuture<V> = BoxFuture<'static, Result<V, LoadError>>;

/// Zero-argument factory for a deferred view.
pub(crate) type LoaderFn<V> = Arc<dyn Fn() -> LoadFuture<V> + Send + Sync>;

/// Published once by the load task; `None` until then.
type Outcome<V> = Option<Result<V, LoadError>>;

/// Observable lifecycle of a route's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The view was supplied at construction.
    Immediate,
    Unloaded,
    Loading,
    Loaded,
}

enum SlotState<V> {
    Unloaded,
    Loading(watch::Receiver<Outcome<V>>),
    Loaded(V),
}

pub(crate) struct DeferredSlot<V> {
    state: Mutex<SlotState<V>>,
}

impl<V> DeferredSlot<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Unloaded),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn cached(&self) -> Option<V> {
        match &*self.lock() {
            SlotState::Loaded(view) => Some(view.clone()),
            _ => None,
        }
    }

    pub(crate) fn state(&self) -> LoadState {
        match &*self.lock() {
            SlotState::Unloaded => LoadState::Unloaded,
            SlotState::Loading(_) => LoadState::Loading,
            SlotState::Loaded(_) => LoadState::Loaded,
        }
    }

    /// Return the cached view, join the in-flight load, or start one.
    ///
    /// A load whose task went away without publishing (its runtime shut
    /// down) is discarded and a fresh one is started.
    pub(crate) async fn get_or_load(
        self: &Arc<Self>,
        route: &str,
        factory: &LoaderFn<V>,
    ) -> Result<V, LoadError> {
        loop {
            let (mut rx, source) = {
                let mut state = self.lock();
                let in_flight = match &*state {
                    SlotState::Loaded(view) => {
                        metrics::record_activation(route, ActivationSource::Cache);
                        return Ok(view.clone());
                    }
                    SlotState::Loading(rx) => Some(rx.clone()),
                    SlotState::Unloaded => None,
                };

                match in_flight {
                    Some(rx) => {
                        tracing::trace!(route, "joining in-flight load");
                        (rx, ActivationSource::Joined)
                    }
                    None => {
                        let (tx, rx) = watch::channel(None);
                        *state = SlotState::Loading(rx.clone());
                        self.spawn_load(route.to_string(), Arc::clone(factory), tx);
                        (rx, ActivationSource::Load)
                    }
                }
            };

            let outcome = match rx.wait_for(Option::is_some).await {
                Ok(published) => (*published).clone(),
                Err(_) => None,
            };

            match outcome {
                Some(result) => {
                    if result.is_ok() {
                        metrics::record_activation(route, source);
                    }
                    return result;
                }
                None => {
                    tracing::debug!(route, "load task ended without a result, restarting");
                    self.discard_abandoned(&rx);
                }
            }
        }
    }

    /// Reset to Unloaded if the slot still points at `rx`'s dead channel.
    fn discard_abandoned(&self, rx: &watch::Receiver<Outcome<V>>) {
        let mut state = self.lock();
        let abandoned = matches!(&*state, SlotState::Loading(current) if current.same_channel(rx));
        if abandoned {
            *state = SlotState::Unloaded;
        }
    }

    fn spawn_load(self: &Arc<Self>, route: String, factory: LoaderFn<V>, tx: watch::Sender<Outcome<V>>) {
        let slot = Arc::clone(self);
        tokio::spawn(async move {
            tracing::debug!(route = %route, "deferred load started");
            let result = run_catching(async move { factory().await }).await;

            {
                let mut state = slot.lock();
                *state = match &result {
                    Ok(view) => SlotState::Loaded(view.clone()),
                    Err(_) => SlotState::Unloaded,
                };
            }

            match &result {
                Ok(_) => tracing::debug!(route = %route, "deferred load cached"),
                Err(e) => tracing::debug!(route = %route, error = %e, "deferred load failed, slot reset"),
            }
            metrics::record_load(&route, result.is_ok());

            // Waiters hold their own receivers; the value is stored even
            // if every caller has gone away.
            tx.send_replace(Some(result));
        });
    }
}

/// Run a load future, turning a panic into a `LoadError`.
async fn run_catching<V>(load: impl Future<Output = Result<V, LoadError>>) -> Result<V, LoadError> {
    match AssertUnwindSafe(load).catch_unwind().await {
        Ok(result) => result,
        Err(_) => Err(LoadError::new("loader panicked")),
    }
}
