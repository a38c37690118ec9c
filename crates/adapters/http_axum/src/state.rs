//! Shared application state for axum handlers.

use std::sync::Arc;

use staple_app::ports::RequestStore;
use staple_app::services::request_service::RequestService;

/// Application state shared across all axum handlers.
///
/// Generic over the store type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Service-request use-cases.
    pub request_service: Arc<RequestService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            request_service: Arc::clone(&self.request_service),
        }
    }
}

impl<S> AppState<S>
where
    S: RequestStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(request_service: RequestService<S>) -> Self {
        Self {
            request_service: Arc::new(request_service),
        }
    }
}
