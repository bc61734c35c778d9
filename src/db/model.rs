use serde::{Deserialize, Serialize};

/// One row of the `movies` table.
///
/// Everything except the id is stored as text; numeric meaning is only
/// derived inside SQL (see `catalog::columns`). Field names on the wire
/// follow the table's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovieRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Movie Name")]
    pub name: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Stars")]
    pub stars: Option<String>,
    #[serde(rename = "Directors")]
    pub directors: Option<String>,
    pub release_date: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<String>,
    #[serde(rename = "Votes")]
    pub votes: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    pub budget: Option<String>,
    pub revenue: Option<String>,
    /// Only present on genre recommendations.
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_score: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;
