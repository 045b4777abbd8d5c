//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that paths, names and components are well formed
//! - Detect duplicate paths (after base path and policy) and names
//! - Check that the fallback refers to a declared route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::policy::join_base;

/// A single semantic problem in a route manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes configured")]
    NoRoutes,

    #[error("base_path '{0}' must be empty or start with '/'")]
    InvalidBasePath(String),

    #[error("activation_timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("route #{index}: name must not be empty")]
    EmptyName { index: usize },

    #[error("route '{name}': path '{path}' must start with '/'")]
    RelativePath { name: String, path: String },

    #[error("route '{name}': component must not be empty")]
    EmptyComponent { name: String },

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("fallback route '{0}' is not defined")]
    UnknownFallback(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    if !config.base_path.is_empty() && !config.base_path.starts_with('/') {
        errors.push(ValidationError::InvalidBasePath(config.base_path.clone()));
    }

    if config.activation_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut paths = HashSet::new();
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyName { index });
        }
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                name: route.name.clone(),
                path: route.path.clone(),
            });
        }
        if route.component.is_empty() {
            errors.push(ValidationError::EmptyComponent {
                name: route.name.clone(),
            });
        }

        let key = config
            .policy
            .normalize(&join_base(&config.base_path, &route.path))
            .into_owned();
        if !paths.insert(key.clone()) {
            errors.push(ValidationError::DuplicatePath(key));
        }
        if !route.name.is_empty() && !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }
    }

    if let Some(fallback) = &config.fallback {
        if !names.contains(fallback.as_str()) {
            errors.push(ValidationError::UnknownFallback(fallback.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render a list of errors as one comma-separated line.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
