//! Static path-to-view table for the single-page frontend.
//!
//! # Design
//! The table is built once and never mutated. Matching mirrors the default
//! behavior of the browser-side navigator it feeds: query strings and
//! fragments are ignored, one trailing slash is optional, comparison is
//! case-insensitive, and an optional history base is stripped first. There are
//! no parameters, guards or redirects; an unmatched path resolves to `None`.

use std::fmt;

use tracing::debug;

use crate::error::RouteError;

/// Views the frontend can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    SpendingAnalysis,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "Login",
            View::Register => "Register",
            View::SpendingAnalysis => "SpendingAnalysis",
        };
        f.write_str(name)
    }
}

/// A path-to-view binding. `V` is whatever the navigator renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<V = View> {
    pub path: String,
    pub name: String,
    pub view: V,
}

impl<V> RouteEntry<V> {
    pub fn new(path: &str, name: &str, view: V) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable<V = View> {
    base: String,
    entries: Vec<RouteEntry<V>>,
    // normalized form of each entry's path, same order as `entries`
    keys: Vec<String>,
}

impl<V> RouteTable<V> {
    /// Build a table, rejecting relative paths and paths that collide after
    /// normalization.
    pub fn new(entries: Vec<RouteEntry<V>>) -> Result<Self, RouteError> {
        let mut keys: Vec<String> = Vec::with_capacity(entries.len());
        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(RouteError::RelativePath(entry.path.clone()));
            }
            let key = normalize(&entry.path);
            if keys.contains(&key) {
                return Err(RouteError::DuplicatePath(entry.path.clone()));
            }
            keys.push(key);
        }
        Ok(Self {
            base: String::new(),
            entries,
            keys,
        })
    }

    /// Strip `base` (e.g. `/app`) from incoming paths before matching.
    pub fn with_base(mut self, base: &str) -> Self {
        let base = normalize(base);
        self.base = if base == "/" { String::new() } else { base };
        self
    }

    /// Resolve a URL path, possibly carrying a query or fragment.
    pub fn resolve(&self, url: &str) -> Option<&RouteEntry<V>> {
        let path = normalize(url);
        let path = self.strip_base(&path);
        let found = self
            .keys
            .iter()
            .position(|key| key == path)
            .map(|i| &self.entries[i]);
        if found.is_none() {
            debug!(url, "no route matches");
        }
        found
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry<V>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn strip_base<'a>(&self, path: &'a str) -> &'a str {
        if self.base.is_empty() {
            return path;
        }
        match path.strip_prefix(self.base.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

impl RouteTable<View> {
    /// The frontend's routes: login at the root, registration, and the
    /// spending analysis page.
    pub fn standard() -> Self {
        let entries = standard_entries();
        let keys = entries.iter().map(|entry| normalize(&entry.path)).collect();
        Self {
            base: String::new(),
            entries,
            keys,
        }
    }
}

fn standard_entries() -> Vec<RouteEntry<View>> {
    vec![
        RouteEntry::new("/", "Login", View::Login),
        RouteEntry::new("/register", "Register", View::Register),
        RouteEntry::new("/spending-analysis", "SpendingAnalysis", View::SpendingAnalysis),
    ]
}

impl Default for RouteTable<View> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Drop query and fragment, lowercase, and remove one trailing slash.
fn normalize(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..end].to_ascii_lowercase();
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => path,
    };
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}
