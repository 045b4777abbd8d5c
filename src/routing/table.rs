//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Collect routes in declaration order
//! - Enforce path and name uniqueness at build time
//! - Resolve a requested path or symbolic name to its entry
//!
//! # Design Decisions
//! - Immutable after construction (lookups take `&self`, no locks)
//! - O(1) path and name lookup via HashMap
//! - Explicit NotFound rather than silent default; the fallback is opt-in
//! - Fail fast on duplicates instead of shadowing a route

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::observability::metrics;
use crate::routing::entry::{Loader, RouteEntry};
use crate::routing::policy::{join_base, MatchPolicy};
use crate::routing::types::{EntryField, LookupKind, RouteError};

/// Ordered, immutable set of routes.
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    base_path: String,
    policy: MatchPolicy,
    activation_timeout: Option<Duration>,
    fallback: Option<usize>,
}

/// Builder for [`RouteTable`].
pub struct RouteTableBuilder<V> {
    routes: Vec<(String, String, Loader<V>)>,
    base_path: String,
    policy: MatchPolicy,
    activation_timeout: Option<Duration>,
    fallback: Option<String>,
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            base_path: String::new(),
            policy: MatchPolicy::default(),
            activation_timeout: None,
            fallback: None,
        }
    }
}

impl<V> RouteTableBuilder<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn route(mut self, path: impl Into<String>, name: impl Into<String>, loader: Loader<V>) -> Self {
        self.routes.push((path.into(), name.into(), loader));
        self
    }

    /// Prefix applied to every declared path before matching.
    pub fn base_path(mut self, base: impl Into<String>) -> Self {
        self.base_path = base.into();
        self
    }

    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Deadline applied by [`RouteTable::activate`].
    pub fn activation_timeout(mut self, after: Duration) -> Self {
        self.activation_timeout = Some(after);
        self
    }

    /// Route returned by [`RouteTable::resolve_or_fallback`] on a miss.
    pub fn fallback(mut self, name: impl Into<String>) -> Self {
        self.fallback = Some(name.into());
        self
    }

    pub fn build(self) -> Result<RouteTable<V>, RouteError> {
        if self.routes.is_empty() {
            return Err(RouteError::EmptyTable);
        }

        let mut entries = Vec::with_capacity(self.routes.len());
        let mut by_path = HashMap::with_capacity(self.routes.len());
        let mut by_name = HashMap::with_capacity(self.routes.len());

        for (index, (path, name, loader)) in self.routes.into_iter().enumerate() {
            let key = self.policy.normalize(&join_base(&self.base_path, &path)).into_owned();

            if by_path.contains_key(&key) {
                return Err(RouteError::DuplicateEntry {
                    field: EntryField::Path,
                    value: key,
                });
            }
            if by_name.contains_key(&name) {
                return Err(RouteError::DuplicateEntry {
                    field: EntryField::Name,
                    value: name,
                });
            }

            by_path.insert(key.clone(), index);
            by_name.insert(name.clone(), index);
            entries.push(RouteEntry::new(path, key, name, loader));
        }

        let fallback = match self.fallback {
            Some(name) => match by_name.get(&name) {
                Some(&index) => Some(index),
                None => return Err(RouteError::UnknownFallback(name)),
            },
            None => None,
        };

        Ok(RouteTable {
            entries,
            by_path,
            by_name,
            base_path: self.base_path,
            policy: self.policy,
            activation_timeout: self.activation_timeout,
            fallback,
        })
    }
}

impl<V> RouteTable<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::default()
    }

    /// Look up the entry whose key equals the normalized `path`.
    pub fn resolve_by_path(&self, path: &str) -> Result<&RouteEntry<V>, RouteError> {
        let key = self.policy.normalize(path);
        let found = self.by_path.get(key.as_ref()).map(|&i| &self.entries[i]);
        metrics::record_lookup(LookupKind::Path, found.is_some());
        found.ok_or_else(|| RouteError::NotFound {
            by: LookupKind::Path,
            key: path.to_string(),
        })
    }

    pub fn resolve_by_name(&self, name: &str) -> Result<&RouteEntry<V>, RouteError> {
        let found = self.by_name.get(name).map(|&i| &self.entries[i]);
        metrics::record_lookup(LookupKind::Name, found.is_some());
        found.ok_or_else(|| RouteError::NotFound {
            by: LookupKind::Name,
            key: name.to_string(),
        })
    }

    /// Resolve by path, answering a miss with the fallback route if one is set.
    pub fn resolve_or_fallback(&self, path: &str) -> Result<&RouteEntry<V>, RouteError> {
        match self.resolve_by_path(path) {
            Err(err) if err.is_not_found() => self.fallback().ok_or(err),
            result => result,
        }
    }

    /// Activate `entry`, bounded by the table's activation timeout if set.
    pub async fn activate(&self, entry: &RouteEntry<V>) -> Result<V, RouteError> {
        match self.activation_timeout {
            Some(after) => entry.activate_timeout(after).await,
            None => entry.activate().await,
        }
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn activation_timeout(&self) -> Option<Duration> {
        self.activation_timeout
    }

    pub fn fallback(&self) -> Option<&RouteEntry<V>> {
        self.fallback.map(|i| &self.entries[i])
    }
}

impl<V> fmt::Debug for RouteTable<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("entries", &self.entries)
            .field("base_path", &self.base_path)
            .field("policy", &self.policy)
            .field("activation_timeout", &self.activation_timeout)
            .field("fallback", &self.fallback().map(|e| e.name()))
            .finish()
    }
}
