//! Query cache for the interactive session.
//!
//! Fetched results are cached under a key of entity type, proxy name, and
//! pagination parameters. After any mutation the affected entity type is
//! invalidated wholesale and refetched on the next read; cached state is
//! never merged with optimistic local state.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Cache key for one fetched result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// One page of the proxy list
    Proxies { page: u32, size: u32 },
    /// All routes of one proxy
    Routes { proxy: String },
}

/// Session-scoped cache of backend reads
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result, decoding it back to its typed form
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.entries.get(key).and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Store a fetched result
    pub fn put<T: Serialize>(&mut self, key: QueryKey, value: &T) {
        if let Ok(encoded) = serde_json::to_value(value) {
            self.entries.insert(key, encoded);
        }
    }

    /// Drop every cached proxy page
    pub fn invalidate_proxies(&mut self) {
        self.entries.retain(|key, _| !matches!(key, QueryKey::Proxies { .. }));
    }

    /// Drop the cached route list of one proxy
    pub fn invalidate_routes(&mut self, proxy: &str) {
        self.entries.retain(|key, _| match key {
            QueryKey::Routes { proxy: cached } => cached != proxy,
            _ => true,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
