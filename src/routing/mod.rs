//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     (path, name, loader)[]
//!     → policy.rs (join base path, normalize keys)
//!     → table.rs (reject duplicates, index by path and name)
//!     → Freeze as immutable RouteTable
//!
//! Navigation:
//!     requested path or name
//!     → table.rs (exact key lookup) → RouteEntry or NotFound
//!     → entry.rs activate
//!         Immediate → view
//!         Deferred  → slot.rs (cached | join in-flight | spawn load)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - The only mutable state is each deferred entry's cache slot
//! - At most one concurrent load per entry; failures stay retryable
//! - Errors go back to the caller; nothing is retried automatically

pub mod entry;
pub mod policy;
pub mod slot;
pub mod table;
pub mod types;

pub use entry::{DeferredLoader, Loader, RouteEntry};
pub use policy::{CaseSensitivity, MatchPolicy, TrailingSlash};
pub use slot::{LoadFuture, LoadState};
pub use table::{RouteTable, RouteTableBuilder};
pub use types::{EntryField, LoadError, LookupKind, RouteError};
