//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     (pattern, handler)[]
//!     → builder.rs (parse segments, detect conflicts)
//!     → node.rs (get-or-create trie nodes)
//!     → Freeze as immutable Router
//!
//! Path Resolution:
//!     "/users/42/files/a/b"
//!     → router.rs (walk trie: static → param → wildcard)
//!     → Return: MatchResult { handler, params, trailer }
//!
//! Reload:
//!     new Router built off to the side
//!     → shared.rs (atomic swap, old snapshots stay valid)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex, one pass per path
//! - Deterministic: same input always matches same route
//! - Registration order does not affect matching

pub mod builder;
pub mod error;
pub mod node;
pub mod router;
pub mod shared;

pub use builder::{parse_pattern, Builder, PatternSegment};
pub use error::{ConflictKind, RouteConflict};
pub use router::{MatchResult, Router};
pub use shared::{OwnedMatch, SharedRouter};
