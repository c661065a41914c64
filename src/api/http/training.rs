// src/api/http/training.rs

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiResult;
use crate::identity::Caller;
use crate::learning::IngestReport;
use crate::state::AppState;
use crate::training::{EntryId, TrainingEntry};

#[derive(Deserialize)]
pub struct TrainRequest {
    pub pattern: String,
    pub response: String,
}

#[derive(Serialize)]
pub struct TrainResponse {
    pub id: EntryId,
}

#[derive(Deserialize)]
pub struct RateRequest {
    pub rating: f64,
}

#[derive(Serialize)]
pub struct RateResponse {
    pub ok: bool,
}

#[derive(Deserialize)]
pub struct LearnRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct TrainingListResponse {
    pub entries: Vec<TrainingEntry>,
}

pub async fn train(
    State(app_state): State<Arc<AppState>>,
    caller: Caller,
    Json(request): Json<TrainRequest>,
) -> ApiResult<Json<TrainResponse>> {
    let id = app_state
        .chat
        .train(&caller, &request.pattern, &request.response)
        .await?;
    info!("Trained entry {} via API", id);
    Ok(Json(TrainResponse { id }))
}

pub async fn list_training(
    State(app_state): State<Arc<AppState>>,
    caller: Caller,
) -> ApiResult<Json<TrainingListResponse>> {
    let entries = app_state.chat.list_training(&caller).await?;
    Ok(Json(TrainingListResponse { entries }))
}

pub async fn rate_response(
    State(app_state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<EntryId>,
    Json(request): Json<RateRequest>,
) -> ApiResult<Json<RateResponse>> {
    app_state
        .chat
        .rate_response(&caller, id, request.rating)
        .await?;
    Ok(Json(RateResponse { ok: true }))
}

pub async fn learn_from_url(
    State(app_state): State<Arc<AppState>>,
    caller: Caller,
    Json(request): Json<LearnRequest>,
) -> ApiResult<Json<IngestReport>> {
    let report = app_state.chat.learn_now(&caller, &request.url).await?;
    Ok(Json(report))
}
