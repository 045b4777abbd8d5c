//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     RouterConfig → Validate → Resolve immediate views → Freeze RouteTable
//! ```
//!
//! # Design Decisions
//! - Built once by the host's startup routine and never rebuilt
//! - Fail fast: a bad manifest or missing immediate view aborts startup

pub mod startup;

pub use startup::{build_route_table, StartupError, ViewSource};
