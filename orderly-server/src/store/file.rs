//! Local file store
//!
//! One JSON file holds the full collection as a map of location id to
//! aggregate. Every operation rewrites the whole file; a missing file reads
//! as an empty collection. Good enough for single-node deployments and as
//! the backup tier behind DynamoDB.

use std::collections::HashMap;
use std::path::PathBuf;

use shared::models::Location;

use super::{LocationStore, StoreError, StoreResult};
use async_trait::async_trait;

/// JSON-file-backed location store
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> StoreResult<HashMap<String, Location>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                StoreError::Corrupt(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Read(format!("{}: {}", self.path.display(), e))),
        }
    }

    async fn save(&self, locations: &HashMap<String, Location>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Write(format!("{}: {}", parent.display(), e)))?;
        }
        let raw = serde_json::to_string_pretty(locations)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| StoreError::Write(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl LocationStore for FileStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Location>> {
        Ok(self.load().await?.remove(id))
    }

    async fn put(&self, location: &Location) -> StoreResult<()> {
        let mut locations = self.load().await?;
        locations.insert(location.id.clone(), location.clone());
        self.save(&locations).await
    }

    async fn list(&self) -> StoreResult<Vec<Location>> {
        Ok(self.load().await?.into_values().collect())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut locations = self.load().await?;
        let existed = locations.remove(id).is_some();
        if existed {
            self.save(&locations).await?;
        }
        Ok(existed)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("queue_data.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.list().await.unwrap().is_empty());
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_get_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let location = Location::new("Cafe", "Corner cafe", 20);
        store.put(&location).await.unwrap();

        let fetched = store.get(&location.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Cafe");

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);

        assert!(store.delete(&location.id).await.unwrap());
        assert!(!store.delete(&location.id).await.unwrap());
        assert!(store.get(&location.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut location = Location::new("Cafe", "", 0);
        store.put(&location).await.unwrap();

        location.name = "Renamed".to_string();
        store.put(&location).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Renamed");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue_data.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = FileStore::new(path);
        assert!(matches!(
            store.list().await,
            Err(StoreError::Corrupt(_))
        ));
    }
}
