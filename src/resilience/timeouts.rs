//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound how long a caller waits for a view to activate
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from load failures
//! - Only the wait is abandoned; the deferred load itself runs on its own
//!   task and still populates the cache

use std::future::Future;
use std::time::Duration;

use crate::observability::metrics;
use crate::routing::types::RouteError;

/// Await `fut`, mapping expiry of `after` to `RouteError::LoadTimeout`.
pub async fn with_deadline<T, F>(route: &str, after: Duration, fut: F) -> Result<T, RouteError>
where
    F: Future<Output = Result<T, RouteError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => {
            metrics::record_activation_timeout(route);
            Err(RouteError::LoadTimeout {
                route: route.to_string(),
                after,
            })
        }
    }
}
