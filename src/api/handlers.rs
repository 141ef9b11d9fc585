//! Endpoint handlers
//!
//! Thin adapters between axum extractors and [`PatientService`]. Status codes
//! that differ from the default [`ApiError`] mapping are set here.

use super::error::ApiError;
use crate::adapters::store::PatientCollection;
use crate::core::records::PatientService;
use crate::domain::errors::CarebookError;
use crate::domain::ids::PatientId;
use crate::domain::patch::PatientPatch;
use crate::domain::patient::{NewPatient, PatientView};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PatientService>,
}

/// Acknowledgment body for writers
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Query string of `GET /sort`
#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Unreadable request bodies are reported with the endpoint's validation
/// status; an oversized body keeps 413.
fn body_rejection(rejection: JsonRejection, status: StatusCode) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            rejection.body_text(),
        );
    }
    ApiError::malformed_body(status, rejection.body_text())
}

/// Path identifiers that cannot name a record are reported as absent
fn path_id(raw: String) -> Result<PatientId, CarebookError> {
    PatientId::new(raw.clone()).map_err(|_| CarebookError::NotFound(raw))
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "hello from carebook" }))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<PatientCollection>, ApiError> {
    Ok(Json(state.service.list().await?))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientView>, ApiError> {
    let id = path_id(id)?;
    Ok(Json(state.service.get(&id).await?))
}

pub async fn sort_patients(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientView>>, ApiError> {
    let sort_by = params
        .sort_by
        .ok_or_else(|| ApiError::bad_request("sort_by is required"))?;
    let views = state
        .service
        .sort(&sort_by, params.order.as_deref())
        .await?;
    Ok(Json(views))
}

pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| body_rejection(e, StatusCode::BAD_REQUEST))?;

    state.service.create(&request).await.map_err(|err| {
        let client = matches!(
            err,
            CarebookError::Validation(_) | CarebookError::Conflict(_)
        );
        let api = ApiError::from(err);
        if client {
            api.with_status(StatusCode::BAD_REQUEST)
        } else {
            api
        }
    })?;

    Ok((StatusCode::ACCEPTED, Ack::new("patient created successfully")))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PatientPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(id)?;
    let Json(patch) = payload.map_err(|e| body_rejection(e, StatusCode::UNPROCESSABLE_ENTITY))?;

    state.service.update(&id, &patch).await?;
    Ok((StatusCode::OK, Ack::new("patient updated successfully")))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = match path_id(id) {
        Ok(id) => state.service.delete(&id).await,
        Err(err) => Err(err),
    };

    result.map_err(|err| {
        let absent = matches!(err, CarebookError::NotFound(_));
        let api = ApiError::from(err);
        if absent {
            api.with_status(StatusCode::BAD_REQUEST)
        } else {
            api
        }
    })?;

    Ok((StatusCode::OK, Ack::new("patient deleted successfully")))
}
