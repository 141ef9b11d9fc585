//! HTTP error responses
//!
//! Translates [`CarebookError`] into a status code and a JSON body of the form
//! `{"error": kind, "detail": message, "fields": [...]}`. Handlers adjust the
//! status where an endpoint reports a fault differently from the default.

use crate::domain::errors::{CarebookError, FieldError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error returned by every handler
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    detail: String,
    fields: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: &'a str,
    #[serde(skip_serializing_if = "no_fields")]
    fields: &'a [FieldError],
}

fn no_fields(fields: &&[FieldError]) -> bool {
    fields.is_empty()
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            detail: detail.into(),
            fields: Vec::new(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", detail)
    }

    /// Malformed request body, reported like a validation failure
    pub fn malformed_body(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::new(status, "validation_error", detail)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    /// Overrides the status code, keeping kind and detail
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl From<CarebookError> for ApiError {
    fn from(err: CarebookError) -> Self {
        let status = match &err {
            CarebookError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CarebookError::NotFound(_) => StatusCode::NOT_FOUND,
            CarebookError::Conflict(_) => StatusCode::CONFLICT,
            CarebookError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CarebookError::StoreUnavailable(_)
            | CarebookError::CorruptData(_)
            | CarebookError::Configuration(_)
            | CarebookError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, kind = err.kind(), "Request failed");
        } else {
            tracing::debug!(error = %err, kind = err.kind(), "Request rejected");
        }

        let fields = match &err {
            CarebookError::Validation(errors) => errors.errors().to_vec(),
            _ => Vec::new(),
        };

        Self {
            status,
            kind: err.kind(),
            detail: err.to_string(),
            fields,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind,
            detail: &self.detail,
            fields: &self.fields,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationErrors;

    #[test]
    fn test_default_status_mapping() {
        let cases = [
            (CarebookError::NotFound("P1".into()), StatusCode::NOT_FOUND),
            (CarebookError::Conflict("P1".into()), StatusCode::CONFLICT),
            (CarebookError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (
                CarebookError::StoreUnavailable("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CarebookError::CorruptData("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_validation_carries_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("age", "must be greater than 0 and less than 120");
        let api: ApiError = CarebookError::from(errors).into();

        assert_eq!(api.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.kind(), "validation_error");
        assert_eq!(api.fields().len(), 1);
        assert_eq!(api.fields()[0].field, "age");
    }

    #[test]
    fn test_with_status_keeps_kind() {
        let api = ApiError::from(CarebookError::NotFound("P1".into()))
            .with_status(StatusCode::BAD_REQUEST);
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.kind(), "not_found");
    }

    #[test]
    fn test_into_response_sets_status() {
        let resp = ApiError::bad_request("sort_by is required").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
