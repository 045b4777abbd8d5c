//! Path match policy.
//!
//! # Responsibilities
//! - Apply the base-path prefix uniformly to declared route paths
//! - Normalize declared and requested paths into lookup keys
//!
//! # Design Decisions
//! - Default policy is exact string equality (no trailing-slash or case folding)
//! - Normalization is opt-in and applied identically at build and lookup time
//! - The root path `/` survives trailing-slash stripping

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// How trailing slashes are treated when comparing paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
    /// `/hr` and `/hr/` are different paths.
    #[default]
    Strict,
    /// Trailing slashes are stripped before comparison.
    Ignore,
}

/// Whether path comparison is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// Normalization applied to paths before they are used as lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchPolicy {
    pub trailing_slash: TrailingSlash,
    pub case: CaseSensitivity,
}

impl MatchPolicy {
    /// Exact string equality.
    pub const EXACT: MatchPolicy = MatchPolicy {
        trailing_slash: TrailingSlash::Strict,
        case: CaseSensitivity::Sensitive,
    };

    /// Build the lookup key for a path.
    pub fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let mut key = Cow::Borrowed(path);

        if self.trailing_slash == TrailingSlash::Ignore && key.len() > 1 && key.ends_with('/') {
            let trimmed = key.trim_end_matches('/');
            key = if trimmed.is_empty() {
                Cow::Borrowed("/")
            } else {
                Cow::Owned(trimmed.to_string())
            };
        }

        if self.case == CaseSensitivity::Insensitive && key.chars().any(|c| c.is_uppercase()) {
            key = Cow::Owned(key.to_lowercase());
        }

        key
    }
}

/// Prefix a declared route path with the application base path.
///
/// An empty base or `/` leaves the path untouched. Otherwise trailing
/// slashes on the base are dropped and the path is appended, so base
/// `/app/` and path `/hr` give `/app/hr`.
///
/// The root route becomes `<base>/`. Unlike a browser history router,
/// which strips the base and treats a bare `/app` as `/`, the exact policy
/// does not match `/app` against it; use [`TrailingSlash::Ignore`] for that.
pub fn join_base<'a>(base: &str, path: &'a str) -> Cow<'a, str> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{}{}", base, path))
    }
}
