//! Application service for posts.
//!
//! Screens talk to `PostService` only; whether the calls hit local stores or a remote
//! postboard server is decided by the implementation handed to them.

mod http;

pub use http::*;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::blob::BlobStore;
use crate::errors::AppError;
use crate::models::{
    ImageFile, NewPost, PostId, PostKind, PostRecord, Question, StoredDate, POSTS_COLLECTION,
};
use crate::store::DocumentStore;

/// Create, list and delete posts.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Upload the image (if any), then write the post with a fresh timestamp.
    async fn create_post(&self, post: NewPost, image: Option<ImageFile>)
        -> Result<PostId, AppError>;

    /// Every stored question, with dates normalized, in store order.
    async fn list_questions(&self) -> Result<Vec<Question>, AppError>;

    /// Remove a post by id. Removing an id that no longer exists succeeds.
    async fn delete_post(&self, id: &str) -> Result<(), AppError>;
}

/// `PostService` over a document store and a blob store.
#[derive(Clone)]
pub struct BackendPostService {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl BackendPostService {
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { documents, blobs }
    }

    async fn store_image(&self, image: &ImageFile) -> Result<String, AppError> {
        let path = image.storage_path();

        self.blobs
            .upload(&path, &image.bytes, image.content_type.as_deref())
            .await
            .map_err(|e| AppError::Upload(format!("Uploading {} failed: {}", path, e)))?;

        self.blobs
            .public_url(&path)
            .await
            .map_err(|e| AppError::ResolveUrl(format!("Resolving {} failed: {}", path, e)))
    }
}

#[async_trait]
impl PostService for BackendPostService {
    async fn create_post(
        &self,
        post: NewPost,
        image: Option<ImageFile>,
    ) -> Result<PostId, AppError> {
        let image_url = match &image {
            Some(image) => self.store_image(image).await?,
            None => String::new(),
        };

        let kind = post.kind();
        let fields = PostRecord::new(post, image_url, StoredDate::now()).into_fields()?;
        let id = self
            .documents
            .insert(POSTS_COLLECTION, fields)
            .await
            .map_err(|e| AppError::Insert(format!("Writing post failed: {}", e)))?;

        tracing::info!("Created {} post {}", kind.as_str(), id);
        Ok(id)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        let documents = self
            .documents
            .query_eq(
                POSTS_COLLECTION,
                "type",
                &Value::from(PostKind::Question.as_str()),
            )
            .await
            .map_err(|e| AppError::Fetch(format!("Loading questions failed: {}", e)))?;

        documents
            .into_iter()
            .map(|doc| {
                Question::from_stored(doc.id, doc.data)
                    .map_err(|e| AppError::Fetch(format!("Loading questions failed: {}", e)))
            })
            .collect()
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let existed = self
            .documents
            .delete(POSTS_COLLECTION, id)
            .await
            .map_err(|e| AppError::Delete(format!("Deleting post {} failed: {}", id, e)))?;

        if existed {
            tracing::info!("Deleted post {}", id);
        } else {
            tracing::debug!("Post {} was already gone", id);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Store doubles that fail on demand.

    use super::*;
    use serde_json::Map;

    use crate::store::{Document, MemoryDocumentStore};

    /// Document store wrapper whose operations can be switched to fail.
    #[derive(Default)]
    pub struct FlakyDocumentStore {
        pub inner: MemoryDocumentStore,
        pub fail_insert: bool,
        pub fail_query: bool,
        pub fail_delete: bool,
    }

    fn offline() -> AppError {
        AppError::Database("store offline".to_string())
    }

    #[async_trait]
    impl DocumentStore for FlakyDocumentStore {
        async fn insert(
            &self,
            collection: &str,
            fields: Map<String, Value>,
        ) -> Result<String, AppError> {
            if self.fail_insert {
                return Err(offline());
            }
            self.inner.insert(collection, fields).await
        }

        async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
            self.inner.get(collection, id).await
        }

        async fn query_eq(
            &self,
            collection: &str,
            field: &str,
            value: &Value,
        ) -> Result<Vec<Document>, AppError> {
            if self.fail_query {
                return Err(offline());
            }
            self.inner.query_eq(collection, field, value).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
            if self.fail_delete {
                return Err(offline());
            }
            self.inner.delete(collection, id).await
        }
    }

    /// Blob store that accepts uploads but can never resolve a URL.
    #[derive(Default)]
    pub struct UrlLessBlobStore;

    #[async_trait]
    impl BlobStore for UrlLessBlobStore {
        async fn upload(
            &self,
            _path: &str,
            _bytes: &[u8],
            _content_type: Option<&str>,
        ) -> Result<(), AppError> {
            Ok(())
        }

        async fn public_url(&self, path: &str) -> Result<String, AppError> {
            Err(AppError::Blob(format!("no URL for {}", path)))
        }
    }
}
