//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route manifest (TOML/JSON)
//!     → loader.rs (parse & deserialize, apply VIEW_ROUTER_BASE_URL)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → lifecycle::startup builds the RouteTable once
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults; the default routes are the application's own
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigFormat};
pub use schema::{ObservabilityConfig, RouteConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
