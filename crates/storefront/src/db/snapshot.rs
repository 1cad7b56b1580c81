//! JSON snapshot file backing the in-memory store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::RepositoryError;
use crate::models::{Product, User};

const SNAPSHOT_VERSION: u32 = 1;

/// Everything the store holds, as written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub users: Vec<User>,
    pub products: Vec<Product>,
}

impl Snapshot {
    #[must_use]
    pub const fn new(users: Vec<User>, products: Vec<Product>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            users,
            products,
        }
    }
}

/// Location of a snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, or `None` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the file cannot be read or decoded, or
    /// was written by an unknown format version.
    pub async fn load(&self) -> Result<Option<Snapshot>, RepositoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RepositoryError::DataCorruption(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        Ok(Some(snapshot))
    }

    /// Replace the snapshot file atomically (write a sibling, then rename).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if encoding or any file operation fails.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            users = snapshot.users.len(),
            products = snapshot.products.len(),
            "Wrote store snapshot"
        );

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("absent.json"));
        assert!(file.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("nested/store.json"));

        file.save(&Snapshot::new(Vec::new(), Vec::new())).await.unwrap();
        let loaded = file.load().await.unwrap().unwrap();

        assert_eq!(loaded.version, SNAPSHOT_VERSION);
        assert!(loaded.users.is_empty());
        assert!(!dir.path().join("nested/store.tmp").exists());
    }

    #[tokio::test]
    async fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"version":99,"users":[],"products":[]}"#).unwrap();

        let err = SnapshotFile::new(path).load().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[tokio::test]
    async fn test_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let err = SnapshotFile::new(path).load().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
