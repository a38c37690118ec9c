//! JSON REST handlers for service requests.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use staple_app::ports::RequestStore;
use staple_domain::error::{NotFoundError, StapleError, ValidationError};
use staple_domain::id::RequestId;
use staple_domain::request::{NewServiceRequest, RequestStatus, ServiceRequest};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Request body for submitting a service request.
///
/// Fields are kept as raw JSON so that wrong types are reported as missing
/// fields instead of failing the whole decode. Only strings count as values.
#[derive(Default, Deserialize)]
pub struct CreateServiceRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub service: Option<Value>,
    pub message: Option<Value>,
}

impl CreateServiceRequest {
    fn into_domain(self) -> Result<NewServiceRequest, StapleError> {
        let mut builder = NewServiceRequest::builder();
        if let Some(name) = text(self.name) {
            builder = builder.name(name);
        }
        if let Some(email) = text(self.email) {
            builder = builder.email(email);
        }
        if let Some(phone) = text(self.phone) {
            builder = builder.phone(phone);
        }
        if let Some(service) = text(self.service) {
            builder = builder.service(service);
        }
        if let Some(message) = text(self.message) {
            builder = builder.message(message);
        }
        builder.build()
    }
}

fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Request body for changing a request's status.
#[derive(Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<Value>,
}

impl UpdateStatusRequest {
    fn status(self) -> Result<RequestStatus, StapleError> {
        match self.status {
            None | Some(Value::Null) => {
                Err(ValidationError::MissingFields(vec!["status"]).into())
            }
            Some(Value::String(raw)) => Ok(RequestStatus::from_str(&raw)?),
            Some(other) => Err(ValidationError::InvalidStatus(other.to_string()).into()),
        }
    }
}

/// Confirmation body returned after a deletion.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ServiceRequest>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<ServiceRequest>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the status update endpoint.
pub enum UpdateResponse {
    Ok(Json<ServiceRequest>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted(Json<MessageBody>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted(json) => json.into_response(),
        }
    }
}

/// A path segment that is not an integer cannot name any stored request.
fn parse_id(raw: &str) -> Result<RequestId, ApiError> {
    RequestId::from_str(raw).map_err(|_| {
        ApiError::from(NotFoundError {
            entity: "Request",
            id: raw.to_string(),
        })
    })
}

/// `GET /api/requests`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: RequestStore + Send + Sync + 'static,
{
    let requests = state.request_service.list_requests().await?;
    Ok(ListResponse::Ok(Json(requests)))
}

/// `POST /api/requests`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    JsonBody(req): JsonBody<CreateServiceRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: RequestStore + Send + Sync + 'static,
{
    let new = req.into_domain()?;
    let created = state.request_service.create_request(new).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/requests/{id}`
pub async fn update_status<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateStatusRequest>,
) -> Result<UpdateResponse, ApiError>
where
    S: RequestStore + Send + Sync + 'static,
{
    let status = req.status()?;
    let id = parse_id(&id)?;
    let updated = state.request_service.update_status(id, status).await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/requests/{id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: RequestStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    state.request_service.delete_request(id).await?;
    Ok(DeleteResponse::Deleted(Json(MessageBody {
        message: "Request deleted successfully",
    })))
}
