//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Activation of a deferred route:
//!     → timeouts.rs (bound the caller's wait)
//!     → On expiry: LoadTimeout to the caller, load keeps running
//! ```
//!
//! # Design Decisions
//! - Deadlines are caller-supplied (or the table default)
//! - No automatic retries: a failed load is retried only when a caller
//!   activates the route again

pub mod timeouts;
