//! Blob store abstraction for uploaded images.
//!
//! Paths are chosen by the caller; uploading twice to the same path replaces the
//! earlier bytes.

mod fs;

pub use fs::*;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;

/// Operations the application needs from a blob store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path`, replacing anything already there.
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), AppError>;

    /// Resolve a stored path into a URL clients can fetch it from.
    async fn public_url(&self, path: &str) -> Result<String, AppError>;
}

/// Blob store kept in process memory. Records every upload for inspection.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    uploads: RwLock<Vec<String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths passed to `upload`, in call order.
    pub async fn uploads(&self) -> Vec<String> {
        self.uploads.read().await.clone()
    }

    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(path).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        _content_type: Option<&str>,
    ) -> Result<(), AppError> {
        self.uploads.write().await.push(path.to_string());
        self.blobs
            .write()
            .await
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn public_url(&self, path: &str) -> Result<String, AppError> {
        if self.blobs.read().await.contains_key(path) {
            Ok(format!("memory://blobs/{}", path))
        } else {
            Err(AppError::NotFound(format!("Blob {} not found", path)))
        }
    }
}
