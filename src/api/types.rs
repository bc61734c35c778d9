use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::DbError;
use crate::trailer::TrailerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoIdResponse {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// Error response with a JSON `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn movie_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Movie not found")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(_) => ApiError::movie_not_found(),
            DbError::Sqlx(e) => ApiError::internal(e.to_string()),
        }
    }
}

impl From<TrailerError> for ApiError {
    fn from(e: TrailerError) -> Self {
        match e {
            TrailerError::MissingName => ApiError::new(StatusCode::BAD_REQUEST, e.to_string()),
            TrailerError::Upstream { status, details } => ApiError {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: "YouTube API Error".to_string(),
                details: Some(details),
            },
            TrailerError::Transport(_) | TrailerError::Decode(_) => {
                ApiError::internal("Video search failed")
            }
        }
    }
}
