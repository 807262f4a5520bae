//! Registration error definitions.

use thiserror::Error;

/// Why two registrations collide at the same trie position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictKind {
    /// The full segment sequence already has a handler.
    #[error("a handler is already registered for this path")]
    DuplicateRoute,

    /// A differently named parameter already occupies the position.
    #[error("parameter `:{requested}` collides with existing parameter `:{existing}`")]
    ParamNameMismatch { existing: String, requested: String },

    /// A wildcard already occupies the position.
    #[error("parameter collides with an existing wildcard")]
    ParamOverWildcard,

    /// A named parameter already occupies the position.
    #[error("wildcard collides with existing parameter `:{existing}`")]
    WildcardOverParam { existing: String },
}

/// A pattern structurally collides with an earlier registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route conflict registering `{pattern}` at `{existing}`: {kind}")]
pub struct RouteConflict {
    /// The pattern being registered.
    pub pattern: String,
    /// Canonical pattern of the colliding trie position.
    pub existing: String,
    pub kind: ConflictKind,
}
