//! JSON REST handler for aggregate stats.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use staple_app::ports::RequestStore;
use staple_domain::stats::RequestStats;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the stats endpoint.
pub enum StatsResponse {
    Ok(Json<RequestStats>),
}

impl IntoResponse for StatsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/stats`
pub async fn get<S>(State(state): State<AppState<S>>) -> Result<StatsResponse, ApiError>
where
    S: RequestStore + Send + Sync + 'static,
{
    let stats = state.request_service.stats().await?;
    Ok(StatsResponse::Ok(Json(stats)))
}
