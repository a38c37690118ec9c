//! Service request — a contact-form submission tracked until completed.

mod status;

pub use status::RequestStatus;

use serde::{Deserialize, Serialize};

use crate::error::{StapleError, ValidationError};
use crate::id::RequestId;
use crate::time::{self, Timestamp};

/// Placeholder stored when a submission carries no phone number.
pub const DEFAULT_PHONE: &str = "N/A";

/// A persisted service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: RequestId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub status: RequestStatus,
    /// Human-readable creation date (`M/D/YYYY`, server-local).
    pub date: String,
    #[serde(serialize_with = "time::serialize_millis")]
    pub created_at: Timestamp,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "time::serialize_millis_opt"
    )]
    pub updated_at: Option<Timestamp>,
}

impl ServiceRequest {
    /// Change the status and stamp `updated_at`.
    pub fn set_status(&mut self, status: RequestStatus, at: Timestamp) {
        self.status = status;
        self.updated_at = Some(at);
    }
}

/// A validated submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl NewServiceRequest {
    /// Create a builder for constructing a [`NewServiceRequest`].
    #[must_use]
    pub fn builder() -> NewServiceRequestBuilder {
        NewServiceRequestBuilder::default()
    }

    /// Turn the submission into a pending record created at `created_at`.
    #[must_use]
    pub fn into_request(self, id: RequestId, created_at: Timestamp) -> ServiceRequest {
        ServiceRequest {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            service: self.service,
            message: self.message,
            status: RequestStatus::Pending,
            date: time::local_date(created_at),
            created_at,
            updated_at: None,
        }
    }
}

/// Step-by-step builder for [`NewServiceRequest`].
#[derive(Debug, Default)]
pub struct NewServiceRequestBuilder {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    service: Option<String>,
    message: Option<String>,
}

impl NewServiceRequestBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewServiceRequest`].
    ///
    /// A blank phone falls back to [`DEFAULT_PHONE`].
    ///
    /// # Errors
    ///
    /// Returns [`StapleError::Validation`] listing every required field
    /// (`name`, `email`, `service`, `message`) that is missing or blank.
    pub fn build(self) -> Result<NewServiceRequest, StapleError> {
        let mut missing = Vec::new();
        let name = required(self.name, "name", &mut missing);
        let email = required(self.email, "email", &mut missing);
        let service = required(self.service, "service", &mut missing);
        let message = required(self.message, "message", &mut missing);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        let phone = self
            .phone
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PHONE.to_string());

        Ok(NewServiceRequest {
            name,
            email,
            phone,
            service,
            message,
        })
    }
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}
