//! Segment-based path router.
//!
//! Registers route patterns made of literal segments, `:name` parameters
//! and a trailing `*` wildcard, then resolves paths to the best match.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::{RouteConfig, RouteTableConfig};
pub use routing::{Builder, MatchResult, RouteConflict, Router, SharedRouter};
