//! Route table watcher for hot reload.
//!
//! # Responsibilities
//! - Observe the route table file for modifications
//! - Forward a table only when its route set actually changed
//!
//! # Design Decisions
//! - A single edit usually fires several modify events; the gate compares
//!   against the last forwarded routes, so duplicates collapse to one update
//! - An empty file is read as a truncate-then-write in progress and skipped
//! - Invalid tables are logged and never forwarded

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::{RouteConfig, RouteTableConfig};

/// Decides which reloads reach the receiver.
#[derive(Debug)]
struct ReloadGate {
    current: Vec<RouteConfig>,
}

impl ReloadGate {
    fn new(current: &RouteTableConfig) -> Self {
        Self {
            current: current.routes.clone(),
        }
    }

    fn admit(&mut self, path: &Path) -> Option<RouteTableConfig> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(path = %path.display(), "Failed to read route table: {}", e);
                return None;
            }
        };
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Route table empty, waiting for write");
            return None;
        }

        match parse_config(&content) {
            Ok(config) if config.routes == self.current => {
                tracing::debug!("Route table unchanged, skipping reload");
                None
            }
            Ok(config) => {
                self.current = config.routes.clone();
                Some(config)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to reload route table: {}. Keeping current routes.",
                    e
                );
                None
            }
        }
    }
}

/// Monitors a route table file and streams changed, validated tables.
pub struct ConfigWatcher {
    path: PathBuf,
    gate: ReloadGate,
    update_tx: mpsc::UnboundedSender<RouteTableConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, seeded with the table already in use so
    /// that re-saving identical routes is not reported.
    pub fn new(
        path: &Path,
        current: &RouteTableConfig,
    ) -> (Self, mpsc::UnboundedReceiver<RouteTableConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                gate: ReloadGate::new(current),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread. The returned
    /// watcher must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            mut gate,
            update_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    if let Some(config) = gate.admit(&watched) {
                        tracing::info!(routes = config.routes.len(), "Route table changed");
                        let _ = update_tx.send(config);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Route table watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ROUTE: &str = "[[routes]]\npattern = \"/a\"\nhandler = \"a\"\n";
    const TWO_ROUTES: &str =
        "[[routes]]\npattern = \"/a\"\nhandler = \"a\"\n[[routes]]\npattern = \"/b\"\nhandler = \"b\"\n";

    #[test]
    fn test_gate_forwards_only_changes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut gate = ReloadGate::new(&parse_config(ONE_ROUTE).unwrap());

        fs::write(file.path(), ONE_ROUTE).unwrap();
        assert!(gate.admit(file.path()).is_none());

        fs::write(file.path(), TWO_ROUTES).unwrap();
        assert_eq!(gate.admit(file.path()).unwrap().routes.len(), 2);
        // Second event for the same edit.
        assert!(gate.admit(file.path()).is_none());
    }

    #[test]
    fn test_gate_skips_empty_and_invalid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut gate = ReloadGate::new(&parse_config(ONE_ROUTE).unwrap());

        fs::write(file.path(), "").unwrap();
        assert!(gate.admit(file.path()).is_none());

        fs::write(
            file.path(),
            "[[routes]]\npattern = \"/:x\"\nhandler = \"x\"\n[[routes]]\npattern = \"/*\"\nhandler = \"y\"\n",
        )
        .unwrap();
        assert!(gate.admit(file.path()).is_none());
        assert_eq!(gate.current.len(), 1);
    }
}
