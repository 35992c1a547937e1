//! Shared application state
//!
//! Everything the handlers need, wired once at startup and shared read-only:
//! the lifecycle dispatcher (registry + signaler + budget) and the rewrite
//! configuration.

use stackhook_lifecycle::{Dispatcher, HttpSignaler};
use stackhook_transform::RewriteConfig;
use std::sync::Arc;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The lifecycle dispatcher handling `/hook` events
    pub dispatcher: Arc<Dispatcher<HttpSignaler>>,
    /// The rewrite configuration backing `/transform`
    pub rewrite: Arc<RewriteConfig>,
}

impl AppState {
    /// Create state over an already-wired dispatcher and rewrite config
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher<HttpSignaler>>, rewrite: Arc<RewriteConfig>) -> Self {
        Self { dispatcher, rewrite }
    }
}
