//! Hot-swappable router handle.
//!
//! A `Router` is never mutated after `build()`. Reloading means building a
//! complete replacement and swapping it in atomically; readers holding an
//! older snapshot keep using it until they drop it.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::config::RouteTableConfig;
use crate::routing::router::Router;

/// Owned form of a match, detached from the snapshot it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedMatch<T> {
    pub handler: Option<T>,
    pub params: HashMap<String, String>,
    pub trailer: Option<String>,
}

/// Router shared between many readers and a single reloading writer.
pub struct SharedRouter<T> {
    current: ArcSwap<Router<T>>,
}

impl<T> SharedRouter<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Consistent snapshot of the current router.
    pub fn load(&self) -> Arc<Router<T>> {
        self.current.load_full()
    }

    /// Installs `router` and returns the one it replaced.
    pub fn replace(&self, router: Router<T>) -> Arc<Router<T>> {
        let routes = router.len();
        let previous = self.current.swap(Arc::new(router));
        tracing::info!(
            routes,
            previous_routes = previous.len(),
            "Router replaced"
        );
        previous
    }
}

impl<T: Clone> SharedRouter<T> {
    /// Resolves `path` against the current snapshot.
    pub fn resolve_owned(&self, path: &str) -> OwnedMatch<T> {
        let router = self.current.load();
        let result = router.resolve(path);
        OwnedMatch {
            handler: result.handler.cloned(),
            params: result.params,
            trailer: result.trailer,
        }
    }
}

impl SharedRouter<String> {
    /// Rebuilds and swaps in a router for every table received, until the
    /// sender side closes. A table that fails to build is logged and
    /// skipped, leaving the current router in place.
    pub async fn follow(&self, mut updates: mpsc::UnboundedReceiver<RouteTableConfig>) {
        while let Some(config) = updates.recv().await {
            match Router::from_config(&config.routes) {
                Ok(router) => {
                    self.replace(router);
                }
                Err(e) => {
                    tracing::error!("Rejected route table: {}. Keeping current routes.", e);
                }
            }
        }
    }
}

impl<T> Default for SharedRouter<T> {
    fn default() -> Self {
        Self::new(Router::default())
    }
}
