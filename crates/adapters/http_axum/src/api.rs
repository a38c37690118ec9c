//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod requests;
#[allow(clippy::missing_errors_doc)]
pub mod stats;

use axum::Router;
use axum::routing::{get, patch};

use staple_app::ports::RequestStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: RequestStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/requests",
            get(requests::list::<S>).post(requests::create::<S>),
        )
        .route(
            "/requests/{id}",
            patch(requests::update_status::<S>).delete(requests::delete::<S>),
        )
        .route("/stats", get(stats::get::<S>))
}
