use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Review file {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Review file {0} is not valid JSON: {1}")]
    Json(String, serde_json::Error),
    #[error("Review file {0} does not hold a JSON array")]
    NotAnArray(String),
}

/// Free-form reviews kept as one JSON array in a file, newest first.
pub struct ReviewStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ReviewStore {
    /// Creates the file (and its directory) holding an empty array if it
    /// does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ReviewError> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path)
            .await
            .map_err(|e| io_error(&path, e))?
        {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| io_error(&path, e))?;
            }
            tokio::fs::write(&path, "[]")
                .await
                .map_err(|e| io_error(&path, e))?;
            info!("Created review file {}", path.display());
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Result<Vec<Value>, ReviewError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Insert a review in front of all others.
    pub async fn prepend(&self, review: Value) -> Result<(), ReviewError> {
        let _guard = self.lock.lock().await;

        let mut reviews = self.read().await?;
        reviews.insert(0, review);

        let content = serde_json::to_string_pretty(&reviews)
            .map_err(|e| ReviewError::Json(self.display(), e))?;

        // Write next to the target and rename over it, so readers never
        // see a half-written file.
        let tmp = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| io_error(&self.path, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(&self.path, e));
        }

        Ok(())
    }

    async fn read(&self) -> Result<Vec<Value>, ReviewError> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        match serde_json::from_str::<Value>(&data).map_err(|e| ReviewError::Json(self.display(), e))? {
            Value::Array(reviews) => Ok(reviews),
            _ => Err(ReviewError::NotAnArray(self.display())),
        }
    }

    fn display(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

fn io_error(path: &Path, e: std::io::Error) -> ReviewError {
    ReviewError::Io(path.to_string_lossy().to_string(), e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("movieshelf-{}", uuid::Uuid::new_v4()))
            .join("reviews.json")
    }

    #[tokio::test]
    async fn test_open_creates_empty_file() {
        let path = scratch_path();
        let store = ReviewStore::open(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.list().await.unwrap().is_empty());

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_prepend_puts_newest_first() {
        let path = scratch_path();
        let store = ReviewStore::open(&path).await.unwrap();

        store.prepend(json!({"movie": 1, "text": "fine"})).await.unwrap();
        store.prepend(json!({"movie": 2, "text": "great"})).await.unwrap();

        let reviews = store.list().await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0], json!({"movie": 2, "text": "great"}));
        assert_eq!(reviews[1], json!({"movie": 1, "text": "fine"}));

        // survives reopening, and no temp files are left behind
        let reopened = ReviewStore::open(&path).await.unwrap();
        assert_eq!(reopened.list().await.unwrap(), reviews);
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_non_array_file_is_an_error() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"not": "a list"}"#).unwrap();

        let store = ReviewStore::open(&path).await.unwrap();
        assert!(matches!(
            store.list().await,
            Err(ReviewError::NotAnArray(_))
        ));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
