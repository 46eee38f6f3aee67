//! Listener HTTP surface
//!
//! - `GET /` liveness message
//! - `GET /wearables/user/:user_id` latest reading for the stored user
//! - `POST /internal/update` replace the stored reading

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    config::CorsConfig,
    error::AppError,
    middleware,
    reading::{Reading, ReadingUpdate},
    store::ReadingStore,
};

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub status: &'static str,
    pub data: Reading,
}

/// Routes without middleware
pub fn router(store: ReadingStore) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/wearables/user/:user_id", get(get_user_reading))
        .route("/internal/update", post(update_reading))
        .with_state(store)
}

/// Full listener application
pub fn app(store: ReadingStore, cors: &CorsConfig) -> Router {
    router(store)
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Wearable Listener API is running" }))
}

async fn get_user_reading(
    State(store): State<ReadingStore>,
    Path(user_id): Path<String>,
) -> Result<Json<Reading>, AppError> {
    store
        .find(&user_id)
        .await
        .map(Json)
        .ok_or(AppError::UserNotFound(user_id))
}

async fn update_reading(
    State(store): State<ReadingStore>,
    payload: Result<Json<ReadingUpdate>, JsonRejection>,
) -> Result<Json<UpdateResponse>, AppError> {
    let Json(update) = payload?;
    let stored = store.replace(update.into_reading(Utc::now())).await;

    info!(user_id = %stored.user_id, timestamp = %stored.timestamp, "Reading updated");

    Ok(Json(UpdateResponse {
        status: "updated",
        data: stored,
    }))
}
