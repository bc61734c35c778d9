use axum::{
    extract::{Query, State},
    Json,
};

use super::types::*;
use crate::server::AppState;
use crate::util::QueryParams;

pub async fn trailer_search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<VideoIdResponse>, ApiError> {
    let video_id = state.trailers.find_trailer(params.get("name")).await?;
    Ok(Json(VideoIdResponse { video_id }))
}
