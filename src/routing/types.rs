//! Routing error definitions.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Which key a lookup was performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Path,
    Name,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Path => "path",
            LookupKind::Name => "name",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route field that must be unique across a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Path,
    Name,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryField::Path => f.write_str("path"),
            EntryField::Name => f.write_str("name"),
        }
    }
}

/// Failure reported by a deferred loader.
///
/// Cloneable so that every caller waiting on the same in-flight load
/// receives the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by the route table.
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// No entry matches the requested path or name.
    #[error("no route with {by} '{key}'")]
    NotFound { by: LookupKind, key: String },

    /// A deferred loader failed. The entry stays retryable.
    #[error("route '{route}' failed to load: {source}")]
    LoadFailure { route: String, source: LoadError },

    /// The caller's deadline elapsed while a load was in flight.
    #[error("route '{route}' did not load within {after:?}")]
    LoadTimeout { route: String, after: Duration },

    /// Two entries share a path or a name.
    #[error("duplicate route {field} '{value}'")]
    DuplicateEntry { field: EntryField, value: String },

    #[error("route table must contain at least one route")]
    EmptyTable,

    #[error("fallback route '{0}' is not defined")]
    UnknownFallback(String),
}

impl RouteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteError::NotFound { .. })
    }
}
