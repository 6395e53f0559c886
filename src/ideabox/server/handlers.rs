use super::error::{ApiError, INVALID_BODY_MESSAGE, UNKNOWN_ENDPOINT_MESSAGE};
use super::health::{HealthReport, Liveness};
use super::AppState;
use crate::error::{IdeaError, Result};
use crate::model::{Category, Idea, IdeaDraft, REQUIRED_FIELDS_MESSAGE};
use crate::store::StorageBackend;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

/// Request body for create and update. Every field is optional at the wire
/// level so that missing fields produce a 400 rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct IdeaPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl IdeaPayload {
    pub fn into_draft(self) -> Result<IdeaDraft> {
        let required = |field: Option<String>| {
            field
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| IdeaError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))
        };
        let title = required(self.title)?;
        let description = required(self.description)?;
        let category: Category = required(self.category)?.parse()?;

        let draft = IdeaDraft {
            title,
            description,
            category,
            tags: self.tags.unwrap_or_default(),
        };
        draft.validate()
    }
}

fn parse_body(body: std::result::Result<Json<IdeaPayload>, JsonRejection>) -> std::result::Result<IdeaDraft, ApiError> {
    let Json(payload) = body.map_err(|rejection| {
        warn!(error = %rejection, "rejected request body");
        ApiError::bad_request(INVALID_BODY_MESSAGE)
    })?;
    payload.into_draft().map_err(|err| {
        warn!(error = %err, "idea failed validation");
        ApiError::bad_request(err.to_string())
    })
}

pub async fn list_ideas<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
) -> std::result::Result<Json<Vec<Idea>>, ApiError> {
    let ideas = state
        .with_store(|store| Ok(store.get_all()))
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to load ideas"))?;
    info!(count = ideas.len(), "fetched all ideas");
    Ok(Json(ideas))
}

pub async fn create_idea<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    body: std::result::Result<Json<IdeaPayload>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<Idea>), ApiError> {
    let draft = parse_body(body)?;
    let idea = state
        .with_store(move |store| store.insert(draft))
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to save idea"))?;
    info!(id = %idea.id, category = %idea.category, "created idea");
    Ok((StatusCode::CREATED, Json(idea)))
}

pub async fn update_idea<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<IdeaPayload>, JsonRejection>,
) -> std::result::Result<Json<Idea>, ApiError> {
    let draft = parse_body(body)?;
    let idea = state
        .with_store(move |store| store.update_by_id(&id, draft))
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to update idea"))?;
    info!(id = %idea.id, "updated idea");
    Ok(Json(idea))
}

pub async fn delete_idea<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    let target = id.clone();
    state
        .with_store(move |store| store.delete_by_id(&target))
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to delete idea"))?;
    info!(id = %id, "deleted idea");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> Json<Liveness> {
    Json(Liveness::now())
}

pub async fn health_details<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Response {
    let uptime = state.started_at.elapsed();
    let report = match state.with_store(|store| Ok(store.status())).await {
        Ok(backend) => HealthReport::build(backend, uptime),
        Err(err) => return ApiError::from_store(err, "Health check failed").into_response(),
    };
    info!(status = ?report.status, "health check performed");

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

pub async fn not_found() -> ApiError {
    ApiError::not_found(UNKNOWN_ENDPOINT_MESSAGE)
}
