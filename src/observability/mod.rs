//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (lookups, activations, slot transitions)
//!     → logging.rs (structured events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Events describe state transitions only; errors are returned to the
//!   caller, never logged in their place
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;
