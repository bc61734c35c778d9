use async_trait::async_trait;

use super::model::*;
use crate::catalog::CatalogQuery;

#[async_trait]
pub trait MovieRepo: Send + Sync {
    /// Run one catalog query and return the matching rows in query order.
    async fn fetch(&self, query: &CatalogQuery) -> DbResult<Vec<MovieRecord>>;

    async fn get_movie(&self, id: i64) -> DbResult<MovieRecord> {
        self.fetch(&CatalogQuery::by_id(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound(format!("Movie not found: {}", id)))
    }
}
