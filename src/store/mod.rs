//! Document store abstraction.
//!
//! A document store holds named collections of schemaless JSON records, each with an
//! id assigned at insert. SQLite backs real deployments; the in-memory store backs tests.

mod sqlite;

pub use sqlite::*;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::errors::AppError;

/// A stored record and the id the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Operations the application needs from a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a record and return its newly generated id.
    async fn insert(&self, collection: &str, fields: Map<String, Value>)
        -> Result<String, AppError>;

    /// Fetch one record by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    /// All records whose top-level `field` equals `value`, in insertion order.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, AppError>;

    /// Delete a record. Returns whether it existed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError>;
}

fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Document store kept entirely in process memory.
#[derive(Default)]
pub struct MemoryDocumentStore {
    entries: RwLock<Vec<(String, Document)>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all collections.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, AppError> {
        let id = new_document_id();
        self.entries.write().await.push((
            collection.to_string(),
            Document {
                id: id.clone(),
                data: Value::Object(fields),
            },
        ));
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|(c, doc)| c == collection && doc.id == id)
            .map(|(_, doc)| doc.clone()))
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, AppError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|(c, doc)| c == collection && doc.data.get(field) == Some(value))
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(c, doc)| !(c == collection && doc.id == id));
        Ok(entries.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_memory_insert_assigns_unique_ids() {
        let store = MemoryDocumentStore::new();
        let a = store.insert("posts", fields(json!({"n": 1}))).await.unwrap();
        let b = store.insert("posts", fields(json!({"n": 1}))).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_memory_query_filters_by_collection_and_field() {
        let store = MemoryDocumentStore::new();
        store
            .insert("posts", fields(json!({"type": "question", "title": "a"})))
            .await
            .unwrap();
        store
            .insert("posts", fields(json!({"type": "article", "title": "b"})))
            .await
            .unwrap();
        store
            .insert("other", fields(json!({"type": "question", "title": "c"})))
            .await
            .unwrap();
        store
            .insert("posts", fields(json!({"type": "question", "title": "d"})))
            .await
            .unwrap();

        let found = store
            .query_eq("posts", "type", &json!("question"))
            .await
            .unwrap();
        let titles: Vec<_> = found.iter().map(|d| d.data["title"].clone()).collect();
        assert_eq!(titles, vec![json!("a"), json!("d")]);
    }

    #[tokio::test]
    async fn test_memory_delete_reports_existence() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("posts", fields(json!({}))).await.unwrap();

        assert!(store.delete("posts", &id).await.unwrap());
        assert!(!store.delete("posts", &id).await.unwrap());
        assert!(store.get("posts", &id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
