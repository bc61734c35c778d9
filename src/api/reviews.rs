use axum::{
    extract::State,
    Json,
};
use serde_json::Value;
use tracing::error;

use super::types::*;
use crate::server::AppState;

pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let reviews = state.reviews.list().await.map_err(|e| {
        error!("{}", e);
        ApiError::internal("Could not read reviews")
    })?;
    Ok(Json(reviews))
}

pub async fn add_review(
    State(state): State<AppState>,
    Json(review): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.reviews.prepend(review).await.map_err(|e| {
        error!("{}", e);
        ApiError::internal("Could not save review")
    })?;
    Ok(Json(MessageResponse {
        message: "Review saved!".to_string(),
    }))
}
