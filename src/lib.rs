//! View Router Library
//!
//! A static path-to-view resolution table with deferred (on-demand) view
//! loading, built for a rendering host that mounts whatever view a route
//! resolves to.
//!
//! # Architecture Overview
//!
//! ```text
//!   route manifest ──▶ config ──▶ lifecycle::startup ──▶ RouteTable (immutable)
//!                                        │
//!                                        └── ViewSource (host-provided)
//!
//!   rendering host
//!     ├─ resolve_by_path / resolve_by_name ──▶ &RouteEntry | NotFound
//!     └─ activate(entry)
//!           Immediate ──▶ view
//!           Deferred  ──▶ cache slot ──▶ single in-flight load ──▶ view
//!
//!   Cross-cutting: observability (tracing, metrics), resilience (timeouts)
//! ```

// Core subsystems
pub mod config;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::RouterConfig;
pub use lifecycle::{build_route_table, ViewSource};
pub use routing::{LoadError, LoadState, Loader, RouteEntry, RouteError, RouteTable};
