//! HTTP surface: router, shared state, handlers, and error mapping.
//!
//! Handlers are thin: parse and validate at the boundary, call into the store
//! or the classifier, and map `ServiceError` onto a status class. Validation
//! and conflict are the client's fault (400), a missing patient id is 404, and
//! model or store trouble is the server's fault (500).

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ServiceError;
use crate::models::patient::{Patient, PatientDraft, PatientUpdate};
use crate::models::user_profile::UserProfile;
use crate::predictor::PremiumModel;
use crate::store::{PatientMap, PatientStore, SortField, SortOrder};

/// Shared per-process state: the store and the classifier handle
pub struct AppState {
    pub store: PatientStore,
    pub model: Arc<dyn PremiumModel>,
}

pub type SharedState = Arc<AppState>;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Build the service router over the shared state.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/about", get(about))
        .route("/predict", post(predict))
        .route("/view", get(view))
        .route("/patient/{patient_id}", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/{patient_id}", put(update_patient))
        .route("/delete/{patient_id}", delete(delete_patient))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "Patient Management System API"}))
}

async fn about() -> Json<serde_json::Value> {
    Json(json!({"message": "A fully functional API to manage your patient records"}))
}

/// Response body of `POST /predict`
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_category: String,
}

async fn predict(
    State(state): State<SharedState>,
    Json(profile): Json<UserProfile>,
) -> ApiResult<Json<PredictResponse>> {
    profile.validate()?;
    let predicted_category = state.model.predict(&profile.to_features())?;
    Ok(Json(PredictResponse { predicted_category }))
}

async fn view(State(state): State<SharedState>) -> ApiResult<Json<PatientMap>> {
    Ok(Json(state.store.list().await?))
}

async fn view_patient(
    State(state): State<SharedState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(state.store.get(&patient_id).await?))
}

/// Query parameters of `GET /sort`; order defaults to ascending
#[derive(Debug, Deserialize)]
pub struct SortParams {
    sort_by: String,
    #[serde(default = "default_order")]
    order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

async fn sort_patients(
    State(state): State<SharedState>,
    Query(params): Query<SortParams>,
) -> ApiResult<Json<Vec<Patient>>> {
    let field = SortField::parse(&params.sort_by)?;
    let order = SortOrder::parse(&params.order)?;
    Ok(Json(state.store.sorted(field, order).await?))
}

async fn create_patient(
    State(state): State<SharedState>,
    Json(draft): Json<PatientDraft>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let patient = state.store.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Patient created successfully", "id": patient.id})),
    ))
}

async fn update_patient(
    State(state): State<SharedState>,
    Path(patient_id): Path<String>,
    Json(update): Json<PatientUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    state.store.update(&patient_id, &update).await?;
    Ok(Json(json!({"message": "patient updated"})))
}

async fn delete_patient(
    State(state): State<SharedState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.store.remove(&patient_id).await?;
    Ok(Json(json!({"message": "patient deleted"})))
}

/// HTTP-facing error: a status class plus a human-readable detail message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = if err.is_internal() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else if matches!(err, ServiceError::NotFound) {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{}", self.detail);
        }
        (self.status, Json(json!({"detail": self.detail}))).into_response()
    }
}
