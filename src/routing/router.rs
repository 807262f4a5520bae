//! Path resolution against a frozen route trie.
//!
//! # Responsibilities
//! - Walk the trie segment by segment for an incoming path
//! - Bind named parameters and capture the wildcard remainder
//! - Fall back to the deepest wildcard seen when the walk dead-ends
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Static children win over the variable child at every level
//! - Single iterative pass, no recursion and no backtracking beyond
//!   one saved wildcard candidate
//! - A missing handler is a normal result, never an error

use std::collections::HashMap;

use serde::Serialize;

use crate::config::RouteConfig;
use crate::routing::builder::Builder;
use crate::routing::error::RouteConflict;
use crate::routing::node::{NodeId, Trie};

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult<'r, T> {
    pub handler: Option<&'r T>,
    pub params: HashMap<String, String>,
    /// Remainder captured by a wildcard, `Some("")` for an empty capture.
    pub trailer: Option<String>,
}

impl<'r, T> MatchResult<'r, T> {
    pub fn is_match(&self) -> bool {
        self.handler.is_some()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn trailer(&self) -> Option<&str> {
        self.trailer.as_deref()
    }
}

/// Immutable route table.
#[derive(Debug, Clone)]
pub struct Router<T> {
    trie: Trie<T>,
    routes: usize,
}

impl<T> Router<T> {
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    pub(crate) fn from_trie(trie: Trie<T>, routes: usize) -> Self {
        Self { trie, routes }
    }

    /// Resolves `path` to the best registered handler.
    pub fn resolve(&self, path: &str) -> MatchResult<'_, T> {
        let segments: Vec<&str> = path.split('/').collect();

        let mut params = HashMap::new();
        let mut trailer: Option<String> = None;
        let mut current = Some(NodeId::ROOT);
        // Deepest wildcard seen so far: (segment index, wildcard node).
        let mut saved_trailer: Option<(usize, NodeId)> = None;

        for (i, &segment) in segments.iter().enumerate() {
            let Some(id) = current else { break };
            let node = self.trie.node(id);

            if segment.is_empty() && !node.is_trailer() {
                continue;
            }

            if let Some(wildcard) = self.trie.trailer_child(id) {
                saved_trailer = Some((i, wildcard));
            }

            if let Some(child) = node.static_child(segment) {
                current = Some(child);
            } else if let Some(child) = node.variable_child() {
                let child_node = self.trie.node(child);
                current = Some(child);
                if child_node.is_trailer() {
                    trailer = Some(segments[i..].join("/"));
                    break;
                }
                // `/:` declares an unnamed parameter: it matches but binds nothing.
                if let Some(name) = child_node.segment().filter(|name| !name.is_empty()) {
                    params.insert(name.to_string(), segment.to_string());
                }
            } else {
                current = None;
                break;
            }
        }

        // Path ended right before a wildcard: empty capture.
        if let Some(id) = current {
            if self.trie.node(id).handler().is_none() {
                if let Some(wildcard) = self.trie.trailer_child(id) {
                    trailer = Some(String::new());
                    current = Some(wildcard);
                }
            }
        }

        let mut handler = current.and_then(|id| self.trie.node(id).handler());
        if handler.is_none() {
            params.clear();
            if let Some((i, wildcard)) = saved_trailer {
                trailer = Some(segments[i..].join("/"));
                handler = self.trie.node(wildcard).handler();
            }
        }

        tracing::trace!(
            path = %path,
            matched = handler.is_some(),
            trailer = ?trailer,
            "Path resolved"
        );

        MatchResult {
            handler,
            params,
            trailer,
        }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Every registered route as `(canonical pattern, handler)`, sorted by
    /// pattern.
    pub fn routes(&self) -> Vec<(String, &T)> {
        let mut routes: Vec<(String, &T)> = self
            .trie
            .handlers()
            .map(|(id, handler)| (self.trie.pattern_of(id), handler))
            .collect();
        routes.sort_by(|a, b| a.0.cmp(&b.0));
        routes
    }
}

impl Router<String> {
    /// Builds a router from configured routes, in order. The handler of
    /// each route is its configured handler name.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, RouteConflict> {
        let mut builder = Builder::new();
        for route in routes {
            builder.insert(&route.pattern, route.handler.clone())?;
        }
        Ok(builder.build())
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Builder::new().build()
    }
}
