//! Route entries and their view loaders.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;

use crate::observability::metrics::{self, ActivationSource};
use crate::resilience::timeouts::with_deadline;
use crate::routing::slot::{DeferredSlot, LoadState, LoaderFn};
use crate::routing::types::{LoadError, RouteError};

/// How a route obtains its view.
pub enum Loader<V> {
    /// The view is held directly.
    Immediate(V),
    /// The view is produced on first activation and cached.
    Deferred(DeferredLoader<V>),
}

/// A deferred view factory together with its cache slot.
pub struct DeferredLoader<V> {
    factory: LoaderFn<V>,
    slot: Arc<DeferredSlot<V>>,
}

impl<V> Loader<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn immediate(view: V) -> Self {
        Loader::Immediate(view)
    }

    /// Wrap an async factory. It is invoked at most once concurrently,
    /// and never again after it succeeds.
    pub fn deferred<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, LoadError>> + Send + 'static,
    {
        Loader::Deferred(DeferredLoader {
            factory: Arc::new(move || factory().boxed()),
            slot: Arc::new(DeferredSlot::new()),
        })
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Loader::Deferred(_))
    }

    fn state(&self) -> LoadState {
        match self {
            Loader::Immediate(_) => LoadState::Immediate,
            Loader::Deferred(deferred) => deferred.slot.state(),
        }
    }
}

impl<V> fmt::Debug for Loader<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loader::Immediate(_) => f.write_str("Immediate"),
            Loader::Deferred(_) => write!(f, "Deferred({:?})", self.state()),
        }
    }
}

/// One navigable destination. Owned by its [`RouteTable`](crate::routing::RouteTable).
pub struct RouteEntry<V> {
    path: String,
    key: String,
    name: String,
    loader: Loader<V>,
}

impl<V> RouteEntry<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(path: String, key: String, name: String, loader: Loader<V>) -> Self {
        Self {
            path,
            key,
            name,
            loader,
        }
    }

    /// The path as declared, without base path or normalization.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The key requested paths are compared against.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_deferred(&self) -> bool {
        self.loader.is_deferred()
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    /// The view if it is available without suspending.
    pub fn activate_now(&self) -> Option<V> {
        match &self.loader {
            Loader::Immediate(view) => Some(view.clone()),
            Loader::Deferred(deferred) => deferred.slot.cached(),
        }
    }

    /// Materialize the view.
    ///
    /// Immediate entries complete on first poll. Deferred entries start or
    /// join the single in-flight load; a failure is returned and not cached.
    pub async fn activate(&self) -> Result<V, RouteError> {
        match &self.loader {
            Loader::Immediate(view) => {
                metrics::record_activation(&self.name, ActivationSource::Immediate);
                Ok(view.clone())
            }
            Loader::Deferred(deferred) => deferred
                .slot
                .get_or_load(&self.name, &deferred.factory)
                .await
                .map_err(|source| RouteError::LoadFailure {
                    route: self.name.clone(),
                    source,
                }),
        }
    }

    /// Like [`activate`](Self::activate), but gives up after `after`.
    ///
    /// Expiry yields `LoadTimeout`; the load keeps running and caches its
    /// view for the next caller.
    pub async fn activate_timeout(&self, after: Duration) -> Result<V, RouteError> {
        with_deadline(&self.name, after, self.activate()).await
    }
}

impl<V> fmt::Debug for RouteEntry<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("key", &self.key)
            .field("name", &self.name)
            .field("loader", &self.loader)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(loader: Loader<&'static str>) -> RouteEntry<&'static str> {
        RouteEntry::new("/x".into(), "/x".into(), "x".into(), loader)
    }

    #[tokio::test]
    async fn test_immediate_entry() {
        let e = entry(Loader::immediate("home"));
        assert_eq!(e.load_state(), LoadState::Immediate);
        assert_eq!(e.activate_now(), Some("home"));
        assert_eq!(e.activate().await.unwrap(), "home");
        assert!(!e.is_deferred());
    }

    #[tokio::test]
    async fn test_deferred_entry_caches_after_first_activation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let e = entry(Loader::deferred(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok("candidate") }
        }));

        assert!(e.is_deferred());
        assert_eq!(e.activate_now(), None);
        assert_eq!(e.activate().await.unwrap(), "candidate");
        assert_eq!(e.activate().await.unwrap(), "candidate");
        assert_eq!(e.activate_now(), Some("candidate"));
        assert_eq!(e.load_state(), LoadState::Loaded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let e = entry(Loader::deferred(move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(LoadError::new("network down"))
                } else {
                    Ok("hr")
                }
            }
        }));

        match e.activate().await {
            Err(RouteError::LoadFailure { route, source }) => {
                assert_eq!(route, "x");
                assert_eq!(source.message(), "network down");
            }
            other => panic!("expected LoadFailure, got {:?}", other),
        }
        assert_eq!(e.load_state(), LoadState::Unloaded);

        assert_eq!(e.activate().await.unwrap(), "hr");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_shows_state() {
        let e = entry(Loader::deferred(|| async { Ok("v") }));
        let rendered = format!("{:?}", e);
        assert!(rendered.contains("Deferred(Unloaded)"));
    }
}
