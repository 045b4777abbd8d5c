//! Metrics collection.
//!
//! # Metrics
//! - `view_router_lookups_total` (counter): lookups by `by` (path|name) and `outcome` (hit|miss)
//! - `view_router_activations_total` (counter): successful activations by `route` and `source`
//! - `view_router_loads_total` (counter): completed deferred loads by `route` and `outcome`
//! - `view_router_activation_timeouts_total` (counter): caller deadlines that expired, by `route`
//!
//! # Design Decisions
//! - Records through the `metrics` facade; the host installs the recorder
//! - Without a recorder every call is a no-op

use metrics::counter;

use crate::routing::types::LookupKind;

/// Where an activated view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    /// Held directly by the route.
    Immediate,
    /// Already in the deferred entry's cache slot.
    Cache,
    /// This caller started the load.
    Load,
    /// This caller waited on a load another caller started.
    Joined,
}

impl ActivationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationSource::Immediate => "immediate",
            ActivationSource::Cache => "cache",
            ActivationSource::Load => "load",
            ActivationSource::Joined => "joined",
        }
    }
}

pub fn record_lookup(by: LookupKind, found: bool) {
    let outcome = if found { "hit" } else { "miss" };
    counter!("view_router_lookups_total", "by" => by.as_str(), "outcome" => outcome).increment(1);
}

pub fn record_activation(route: &str, source: ActivationSource) {
    counter!(
        "view_router_activations_total",
        "route" => route.to_string(),
        "source" => source.as_str()
    )
    .increment(1);
}

pub fn record_load(route: &str, loaded: bool) {
    let outcome = if loaded { "loaded" } else { "failed" };
    counter!("view_router_loads_total", "route" => route.to_string(), "outcome" => outcome).increment(1);
}

pub fn record_activation_timeout(route: &str) {
    counter!("view_router_activation_timeouts_total", "route" => route.to_string()).increment(1);
}
