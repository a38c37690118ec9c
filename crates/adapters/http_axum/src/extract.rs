//! Request body extraction that never short-circuits with axum's plain-text
//! rejections.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON body that falls back to `T::default()` when the request has no JSON
/// content type, is not valid JSON, or does not match `T`.
///
/// Handlers then report what is missing through the usual [`ApiError`]
/// path, so every failure reaches the client as a JSON `{error}` body.
///
/// [`ApiError`]: crate::error::ApiError
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    reason = %rejection.body_text(),
                    "unusable request body, treating it as empty"
                );
                Ok(Self(T::default()))
            }
        }
    }
}
