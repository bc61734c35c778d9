pub mod columns;
pub mod query;
pub mod recommend;

pub use query::{CatalogQuery, LibraryFilter, OrderKey, Predicate, SortMode};
pub use recommend::Recommendation;

use std::sync::Arc;

use tracing::{debug, error};

use crate::db::{DbResult, MovieRecord, MovieRepo};

/// Read side of the movie catalog.
///
/// Listing and recommendations treat a failing store as "no results";
/// single lookups, search and list building report the error to the caller.
#[derive(Clone)]
pub struct Catalog {
    repo: Arc<dyn MovieRepo>,
}

impl Catalog {
    pub fn new(repo: Arc<dyn MovieRepo>) -> Self {
        Self { repo }
    }

    pub async fn search(&self, name: &str) -> DbResult<Vec<MovieRecord>> {
        self.repo.fetch(&CatalogQuery::search(name)).await
    }

    pub async fn movie(&self, id: i64) -> DbResult<MovieRecord> {
        self.repo.get_movie(id).await
    }

    pub async fn library(&self, filter: &LibraryFilter) -> Vec<MovieRecord> {
        debug!(
            sort = filter.sort.as_str(),
            min_year = filter.min_year,
            limit = filter.limit,
            offset = filter.offset,
            "library query"
        );
        match self.repo.fetch(&filter.to_query()).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Library query failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn recommend(
        &self,
        recommendation: &Recommendation,
        exclude: Option<i64>,
    ) -> Vec<MovieRecord> {
        match self.repo.fetch(&recommendation.to_query(exclude)).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(
                    "{} recommendation failed: {}",
                    recommendation.kind(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Look up a client-side list of ids. Unknown ids are left out and the
    /// result follows the store's order, not the input order.
    pub async fn my_list(&self, ids: Vec<i64>) -> DbResult<Vec<MovieRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.fetch(&CatalogQuery::by_ids(ids)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockRepo {
        fail: bool,
        calls: AtomicUsize,
        last_query: Mutex<Option<CatalogQuery>>,
    }

    #[async_trait]
    impl MovieRepo for MockRepo {
        async fn fetch(&self, query: &CatalogQuery) -> DbResult<Vec<MovieRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            if self.fail {
                return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
            }
            Ok(Vec::new())
        }
    }

    fn catalog(repo: &Arc<MockRepo>) -> Catalog {
        Catalog::new(repo.clone())
    }

    #[tokio::test]
    async fn test_empty_list_skips_store() {
        let repo = Arc::new(MockRepo::default());
        let rows = catalog(&repo).my_list(Vec::new()).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);

        catalog(&repo).my_list(vec![4, 2]).await.unwrap();
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            repo.last_query.lock().unwrap().as_ref().unwrap().predicates(),
            &[Predicate::IdIn(vec![4, 2])]
        );
    }

    #[tokio::test]
    async fn test_store_failure_yields_empty() {
        let repo = Arc::new(MockRepo {
            fail: true,
            ..MockRepo::default()
        });
        let catalog = catalog(&repo);

        assert!(catalog.library(&LibraryFilter::default()).await.is_empty());
        let rec = Recommendation::timeline(Some(1999)).unwrap();
        assert!(catalog.recommend(&rec, Some(1)).await.is_empty());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);

        // these surface the failure instead
        assert!(catalog.movie(1).await.is_err());
        assert!(catalog.my_list(vec![1]).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_movie_is_not_found() {
        let repo = Arc::new(MockRepo::default());
        match catalog(&repo).movie(42).await {
            Err(DbError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
