use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, error};

use super::types::*;
use crate::catalog::{LibraryFilter, Recommendation};
use crate::db::MovieRecord;
use crate::server::AppState;
use crate::util::QueryParams;

type Movies = Json<Vec<MovieRecord>>;

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Movies, ApiError> {
    let Some(name) = params.get("q") else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(state.catalog.search(name).await?))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieRecord>, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::movie_not_found())?;
    Ok(Json(state.catalog.movie(id).await?))
}

pub async fn library(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Movies {
    let filter = LibraryFilter::from_params(&params);
    Json(state.catalog.library(&filter).await)
}

pub async fn recommend_genre(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Movies {
    let recommendation = params.get("genre").and_then(Recommendation::genre);
    recommend(&state, recommendation, &params).await
}

pub async fn recommend_actors(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Movies {
    let recommendation = params.get("val").and_then(Recommendation::cast);
    recommend(&state, recommendation, &params).await
}

pub async fn recommend_director(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Movies {
    let recommendation = params.get("val").and_then(Recommendation::director);
    recommend(&state, recommendation, &params).await
}

pub async fn recommend_timeline(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Movies {
    let recommendation = Recommendation::timeline(params.get_int("year"));
    recommend(&state, recommendation, &params).await
}

async fn recommend(
    state: &AppState,
    recommendation: Option<Recommendation>,
    params: &QueryParams,
) -> Movies {
    let Some(recommendation) = recommendation else {
        debug!("recommendation without a value to match");
        return Json(Vec::new());
    };
    let exclude = params.get_int("exclude");
    Json(state.catalog.recommend(&recommendation, exclude).await)
}

/// `POST /movies/get-list` with `{"ids": [...]}`. Ids may be numbers or
/// numeric strings; anything else is ignored.
pub async fn get_list(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Movies, ApiError> {
    let ids: Vec<i64> = body
        .get("ids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(list_id).collect())
        .unwrap_or_default();

    let movies = state.catalog.my_list(ids).await.map_err(|e| {
        error!("Failed to build movie list: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(movies))
}

fn list_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_id() {
        assert_eq!(list_id(&json!(12)), Some(12));
        assert_eq!(list_id(&json!(" 7 ")), Some(7));
        assert_eq!(list_id(&json!("x")), None);
        assert_eq!(list_id(&json!(1.5)), None);
        assert_eq!(list_id(&json!(null)), None);
    }
}
