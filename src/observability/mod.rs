//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + config produce:
//!     → tracing events (registration, reload, resolution)
//!     → logging.rs subscriber (stderr)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event
//! - Resolution events are `trace` level, off unless asked for

pub mod logging;
