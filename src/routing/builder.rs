//! Route registration.
//!
//! # Responsibilities
//! - Parse patterns into literal, parameter and wildcard segments
//! - Insert patterns into the trie, sharing common prefixes
//! - Detect structural conflicts between registrations
//!
//! # Design Decisions
//! - Empty segments (leading, doubled, trailing `/`) are ignored
//! - A pattern is a wildcard pattern iff its last character is `*`
//! - Conflicts are checked before any node is created, so a rejected
//!   registration leaves the trie untouched
//! - Registration order never changes the resulting trie

use crate::routing::error::{ConflictKind, RouteConflict};
use crate::routing::node::{NodeId, NodeKind, Trie};
use crate::routing::router::Router;

/// One non-empty segment of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSegment<'p> {
    /// Matched by exact text equality.
    Static(&'p str),
    /// `:name`, stored without the colon.
    Param(&'p str),
    /// Trailing wildcard. Its raw text is not kept.
    Trailer,
}

/// Splits `pattern` into its non-empty segments.
///
/// ```
/// use segment_router::routing::{parse_pattern, PatternSegment};
///
/// assert_eq!(
///     parse_pattern("/users/:id/*"),
///     vec![
///         PatternSegment::Static("users"),
///         PatternSegment::Param("id"),
///         PatternSegment::Trailer,
///     ]
/// );
/// ```
pub fn parse_pattern(pattern: &str) -> Vec<PatternSegment<'_>> {
    let has_trailer = pattern.ends_with('*');
    let raw: Vec<&str> = pattern.split('/').collect();
    let last = raw.len() - 1;

    raw.iter()
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(i, segment)| {
            if has_trailer && i == last {
                PatternSegment::Trailer
            } else if let Some(name) = segment.strip_prefix(':') {
                PatternSegment::Param(name)
            } else {
                PatternSegment::Static(segment)
            }
        })
        .collect()
}

/// Accumulates routes, then freezes them into a [`Router`].
///
/// ```
/// use segment_router::Router;
///
/// let router = Router::builder()
///     .add("/users/:id", "user")?
///     .add("/static/*", "assets")?
///     .build();
///
/// assert_eq!(router.resolve("/users/7").param("id"), Some("7"));
/// # Ok::<(), segment_router::RouteConflict>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder<T> {
    trie: Trie<T>,
    routes: usize,
}

impl<T> Builder<T> {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            routes: 0,
        }
    }

    /// Registers a route and hands the builder back for chaining.
    pub fn add(mut self, pattern: &str, handler: T) -> Result<Self, RouteConflict> {
        self.insert(pattern, handler)?;
        Ok(self)
    }

    /// Registers a route in place.
    pub fn insert(&mut self, pattern: &str, handler: T) -> Result<(), RouteConflict> {
        let segments = parse_pattern(pattern);
        self.check(pattern, &segments)?;

        let mut node = NodeId::ROOT;
        for segment in &segments {
            node = match *segment {
                PatternSegment::Static(text) => self.trie.static_child_or_insert(node, text),
                PatternSegment::Param(name) => self
                    .trie
                    .variable_child_or_insert(node, NodeKind::Param(name.to_string())),
                PatternSegment::Trailer => {
                    self.trie.variable_child_or_insert(node, NodeKind::Trailer)
                }
            };
        }

        if self.trie.set_handler(node, handler).is_err() {
            return Err(self.conflict(pattern, node, ConflictKind::DuplicateRoute));
        }
        self.routes += 1;

        tracing::debug!(
            pattern = %pattern,
            canonical = %self.trie.pattern_of(node),
            "Route registered"
        );
        Ok(())
    }

    /// Number of routes registered so far.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Freezes the trie into an immutable router.
    pub fn build(self) -> Router<T> {
        tracing::debug!(
            routes = self.routes,
            nodes = self.trie.node_count(),
            "Router built"
        );
        Router::from_trie(self.trie, self.routes)
    }

    /// Walks the existing structure along `segments` without creating
    /// anything. Once the walk leaves the existing trie every remaining
    /// node would be fresh, so no conflict is possible past that point.
    fn check(&self, pattern: &str, segments: &[PatternSegment<'_>]) -> Result<(), RouteConflict> {
        let mut node = NodeId::ROOT;

        for segment in segments {
            let next = match *segment {
                PatternSegment::Static(text) => self.trie.node(node).static_child(text),
                PatternSegment::Param(name) => {
                    let child = self.trie.node(node).variable_child();
                    if let Some(child) = child {
                        match self.trie.node(child).kind() {
                            NodeKind::Trailer => {
                                return Err(self.conflict(
                                    pattern,
                                    child,
                                    ConflictKind::ParamOverWildcard,
                                ));
                            }
                            NodeKind::Param(existing) if existing != name => {
                                return Err(self.conflict(
                                    pattern,
                                    child,
                                    ConflictKind::ParamNameMismatch {
                                        existing: existing.clone(),
                                        requested: name.to_string(),
                                    },
                                ));
                            }
                            _ => {}
                        }
                    }
                    child
                }
                PatternSegment::Trailer => {
                    let child = self.trie.node(node).variable_child();
                    if let Some(child) = child {
                        if let NodeKind::Param(existing) = self.trie.node(child).kind() {
                            return Err(self.conflict(
                                pattern,
                                child,
                                ConflictKind::WildcardOverParam {
                                    existing: existing.clone(),
                                },
                            ));
                        }
                    }
                    child
                }
            };

            match next {
                Some(child) => node = child,
                None => return Ok(()),
            }
        }

        if self.trie.node(node).handler().is_some() {
            return Err(self.conflict(pattern, node, ConflictKind::DuplicateRoute));
        }
        Ok(())
    }

    fn conflict(&self, pattern: &str, at: NodeId, kind: ConflictKind) -> RouteConflict {
        RouteConflict {
            pattern: pattern.to_string(),
            existing: self.trie.pattern_of(at),
            kind,
        }
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern_skips_empty_segments() {
        assert_eq!(parse_pattern("/"), vec![]);
        assert_eq!(parse_pattern(""), vec![]);
        assert_eq!(
            parse_pattern("//foo///bar/"),
            vec![PatternSegment::Static("foo"), PatternSegment::Static("bar")]
        );
        assert_eq!(parse_pattern("test"), parse_pattern("/test"));
    }

    #[test]
    fn test_parse_pattern_trailer_is_last_raw_segment() {
        assert_eq!(parse_pattern("/*"), vec![PatternSegment::Trailer]);
        // Any final segment of a pattern ending in `*` becomes the wildcard.
        assert_eq!(
            parse_pattern("/files/rest*"),
            vec![PatternSegment::Static("files"), PatternSegment::Trailer]
        );
        // A `*` elsewhere is just a literal.
        assert_eq!(
            parse_pattern("/*/x"),
            vec![PatternSegment::Static("*"), PatternSegment::Static("x")]
        );
    }

    #[test]
    fn test_shared_prefixes_reuse_nodes() {
        let mut builder = Builder::new();
        builder.insert("/foo/bar", 1).unwrap();
        builder.insert("/foo", 2).unwrap();
        builder.insert("/foo/:id", 3).unwrap();
        assert_eq!(builder.len(), 3);
        // root, foo, bar, :id
        assert_eq!(builder.trie.node_count(), 4);
    }

    #[test]
    fn test_conflict_kinds() {
        let mut builder = Builder::new();
        builder.insert("/a/:id", 1).unwrap();
        builder.insert("/b/*", 2).unwrap();

        let err = builder.insert("/a/:name", 3).unwrap_err();
        assert_eq!(err.existing, "/a/:id");
        assert_eq!(
            err.kind,
            ConflictKind::ParamNameMismatch {
                existing: "id".into(),
                requested: "name".into()
            }
        );

        let err = builder.insert("/a/*", 3).unwrap_err();
        assert_eq!(
            err.kind,
            ConflictKind::WildcardOverParam {
                existing: "id".into()
            }
        );

        let err = builder.insert("/b/:x", 3).unwrap_err();
        assert_eq!(err.kind, ConflictKind::ParamOverWildcard);
        assert_eq!(err.existing, "/b/*");

        let err = builder.insert("a//:id/", 3).unwrap_err();
        assert_eq!(err.kind, ConflictKind::DuplicateRoute);
        assert_eq!(err.pattern, "a//:id/");
    }

    #[test]
    fn test_rejected_registration_leaves_trie_untouched() {
        let mut builder = Builder::new();
        builder.insert("/x/:id", 1).unwrap();
        let nodes = builder.trie.node_count();

        assert!(builder.insert("/x/:other/deeper/path", 2).is_err());
        assert_eq!(builder.trie.node_count(), nodes);
        assert_eq!(builder.len(), 1);
    }
}
