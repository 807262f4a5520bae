//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject patterns the builder would accept but read ambiguously
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouteTableConfig;
use crate::routing::{Builder, RouteConflict};

/// A semantic problem in the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("route `{pattern}` has an empty handler name")]
    EmptyHandler { pattern: String },

    #[error("route `{pattern}` declares a parameter without a name")]
    EmptyParamName { pattern: String },

    /// `*` must stand alone as the final segment.
    #[error("route `{pattern}` uses `*` outside a final `/*` segment")]
    MisplacedWildcard { pattern: String },

    #[error(transparent)]
    Conflict(#[from] RouteConflict),
}

/// Checks every route, collecting all problems.
pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut builder = Builder::new();

    for (index, route) in config.routes.iter().enumerate() {
        let pattern = route.pattern.as_str();
        if pattern.trim().is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
            continue;
        }
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler {
                pattern: pattern.to_string(),
            });
        }

        let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| *s == ":") {
            errors.push(ValidationError::EmptyParamName {
                pattern: pattern.to_string(),
            });
        }
        if has_misplaced_wildcard(pattern, &segments) {
            errors.push(ValidationError::MisplacedWildcard {
                pattern: pattern.to_string(),
            });
        }

        if let Err(conflict) = builder.insert(pattern, ()) {
            errors.push(conflict.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The builder only treats `*` as a wildcard when it is the very last
/// character of the raw pattern, so `/a/*/` registers a literal `*`.
fn has_misplaced_wildcard(pattern: &str, segments: &[&str]) -> bool {
    let is_wildcard = pattern.ends_with('*');
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .any(|(i, s)| s.contains('*') && (!is_wildcard || i != last || *s != "*"))
}
