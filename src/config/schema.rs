//! Configuration schema definitions.
//!
//! This module defines the route manifest the host application ships.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::policy::MatchPolicy;

/// Root configuration for the route table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix applied to every route path (e.g., "/app/"). Empty means none.
    pub base_path: String,

    /// Path normalization applied before matching.
    pub policy: MatchPolicy,

    /// Default deadline for activating a deferred route, in milliseconds.
    pub activation_timeout_ms: Option<u64>,

    /// Route to serve when a requested path matches nothing.
    pub fallback: Option<String>,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            policy: MatchPolicy::default(),
            activation_timeout_ms: None,
            fallback: None,
            routes: vec![
                RouteConfig::immediate("/", "home", "HomeView"),
                RouteConfig::lazy("/candidate", "candidate", "CandidateView"),
                RouteConfig::lazy("/hr", "hr", "HRView"),
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A single route declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path to match (must start with '/').
    pub path: String,

    /// Unique symbolic name.
    pub name: String,

    /// Component identifier handed to the view source.
    pub component: String,

    /// Load the component on first use instead of at startup.
    #[serde(default)]
    pub lazy: bool,
}

impl RouteConfig {
    pub fn immediate(path: &str, name: &str, component: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            component: component.to_string(),
            lazy: false,
        }
    }

    pub fn lazy(path: &str, name: &str, component: &str) -> Self {
        Self {
            lazy: true,
            ..Self::immediate(path, name, component)
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Include the event target in log lines.
    pub with_target: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            with_target: true,
        }
    }
}
