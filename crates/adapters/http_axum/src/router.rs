//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use staple_app::ports::RequestStore;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and adds `/health`.
/// Includes a permissive [`CorsLayer`] so browser front-ends on other
/// origins can call the API, and a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: RequestStore + Send + Sync + 'static,
{
    assemble(state, None)
}

/// Same as [`build`], with files under `public_dir` served for any path
/// no API route matches.
pub fn build_with_assets<S>(state: AppState<S>, public_dir: &Path) -> Router
where
    S: RequestStore + Send + Sync + 'static,
{
    assemble(state, Some(public_dir))
}

fn assemble<S>(state: AppState<S>, public_dir: Option<&Path>) -> Router
where
    S: RequestStore + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes());
    if let Some(dir) = public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
