//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the route manifest
//! - Resolve immediate components before the table goes live
//! - Wire deferred components to the host's view source
//! - Freeze the result as an immutable RouteTable
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The table is built once and passed by reference; no global registry

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{join_errors, validate_config, ValidationError};
use crate::routing::{LoadError, LoadFuture, Loader, RouteError, RouteTable};

/// Supplies views for the components named in a route manifest.
///
/// Implemented by the rendering host.
pub trait ViewSource<V>: Send + Sync {
    /// Produce a view synchronously. Used for non-lazy routes at startup.
    fn resolve(&self, component: &str) -> Result<V, LoadError>;

    /// Produce a view asynchronously. Used for lazy routes on first activation.
    fn load(&self, component: &str) -> LoadFuture<V>;
}

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid route configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error("route '{route}': component '{component}' could not be resolved: {source}")]
    Component {
        route: String,
        component: String,
        source: LoadError,
    },

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Build the application's route table from a validated manifest.
pub fn build_route_table<V>(config: &RouterConfig, source: Arc<dyn ViewSource<V>>) -> Result<RouteTable<V>, StartupError>
where
    V: Clone + Send + Sync + 'static,
{
    validate_config(config).map_err(StartupError::Config)?;

    let mut builder = RouteTable::builder()
        .base_path(config.base_path.clone())
        .policy(config.policy);

    if let Some(ms) = config.activation_timeout_ms {
        builder = builder.activation_timeout(Duration::from_millis(ms));
    }
    if let Some(fallback) = &config.fallback {
        builder = builder.fallback(fallback.clone());
    }

    for route in &config.routes {
        let loader = if route.lazy {
            let source = Arc::clone(&source);
            let component = route.component.clone();
            Loader::deferred(move || source.load(&component))
        } else {
            let view = source.resolve(&route.component).map_err(|source| StartupError::Component {
                route: route.name.clone(),
                component: route.component.clone(),
                source,
            })?;
            Loader::immediate(view)
        };
        builder = builder.route(route.path.clone(), route.name.clone(), loader);
    }

    let table = builder.build()?;

    tracing::info!(
        routes = table.len(),
        deferred = table.iter().filter(|e| e.is_deferred()).count(),
        base_path = %table.base_path(),
        "Route table built"
    );

    Ok(table)
}
