//! Filesystem blob store served back over HTTP under `/blobs`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use reqwest::Url;

use super::BlobStore;
use crate::errors::AppError;

/// Route prefix the HTTP layer serves blobs from.
pub const BLOB_ROUTE: &str = "blobs";

/// Stores each blob as a file below `root`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FsBlobStore {
    /// Create the store, making sure `root` exists.
    pub async fn open(root: &Path, public_base: &str) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(root).await?;
        Ok(Self {
            root: root.to_path_buf(),
            public_base: public_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a blob path to a file below the root, rejecting anything that escapes it.
    fn file_path(&self, path: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(path);
        let mut components = 0;
        for component in relative.components() {
            match component {
                Component::Normal(_) => components += 1,
                _ => {
                    return Err(AppError::Validation(format!(
                        "Invalid blob path: {:?}",
                        path
                    )))
                }
            }
        }
        if components == 0 {
            return Err(AppError::Validation("Blob path is empty".to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), AppError> {
        let file_path = self.file_path(path)?;
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file_path, bytes).await?;

        tracing::debug!(
            "Stored blob {} ({} bytes, {})",
            path,
            bytes.len(),
            content_type.unwrap_or("unknown type")
        );
        Ok(())
    }

    async fn public_url(&self, path: &str) -> Result<String, AppError> {
        let file_path = self.file_path(path)?;
        if !tokio::fs::try_exists(&file_path).await? {
            return Err(AppError::NotFound(format!("Blob {} not found", path)));
        }

        let mut url = Url::parse(&self.public_base)
            .map_err(|e| AppError::Internal(format!("Invalid public URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Public URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(BLOB_ROUTE)
            .extend(path.split('/'));

        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store() -> (FsBlobStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FsBlobStore::open(&temp_dir.path().join("blobs"), "http://localhost:8080/")
            .await
            .expect("Failed to open blob store");
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_upload_then_resolve_url() {
        let (store, _dir) = open_store().await;
        store
            .upload("images/cat.png", b"meow", Some("image/png"))
            .await
            .unwrap();

        let on_disk = tokio::fs::read(store.root().join("images/cat.png"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"meow");
        assert_eq!(
            store.public_url("images/cat.png").await.unwrap(),
            "http://localhost:8080/blobs/images/cat.png"
        );
    }

    #[tokio::test]
    async fn test_url_encodes_file_names() {
        let (store, _dir) = open_store().await;
        store
            .upload("images/my photo.png", b"x", None)
            .await
            .unwrap();
        assert_eq!(
            store.public_url("images/my photo.png").await.unwrap(),
            "http://localhost:8080/blobs/images/my%20photo.png"
        );
    }

    #[tokio::test]
    async fn test_same_path_overwrites() {
        let (store, _dir) = open_store().await;
        store.upload("images/a.txt", b"one", None).await.unwrap();
        store.upload("images/a.txt", b"two", None).await.unwrap();

        let on_disk = tokio::fs::read(store.root().join("images/a.txt"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"two");
    }

    #[tokio::test]
    async fn test_rejects_escaping_paths() {
        let (store, _dir) = open_store().await;
        for bad in ["../evil.png", "/etc/passwd", "images/../../x", ""] {
            assert!(
                matches!(
                    store.upload(bad, b"x", None).await,
                    Err(AppError::Validation(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_url_for_missing_blob() {
        let (store, _dir) = open_store().await;
        assert!(matches!(
            store.public_url("images/nope.png").await,
            Err(AppError::NotFound(_))
        ));
    }
}
