//! Route table for gateway-rs
//!
//! Maps the path key following the route prefix to a backend base URL.
//! Built once at startup and read-only afterwards.

use std::collections::HashMap;

use crate::config::RouteEntry;

/// Exact-match path-key to backend lookup table
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Build the table from flattened route entries. Later duplicates win.
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let mut routes = HashMap::new();
        for entry in entries {
            routes.insert(entry.key, entry.backend);
        }
        Self { routes }
    }

    /// Resolve a path key to its backend base URL. Exact match only, no
    /// prefix or wildcard matching.
    pub fn resolve(&self, path_key: &str) -> Option<&str> {
        self.routes.get(path_key).map(String::as_str)
    }

    /// All configured routes
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(key, backend)| (key.as_str(), backend.as_str()))
    }

    /// Whether any routes are configured
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
