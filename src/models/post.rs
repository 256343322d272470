//! Post model matching the documents stored in the `posts` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::StoredDate;
use crate::errors::AppError;

/// Discriminates which optional fields of a post are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Question,
    Article,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Question => "question",
            PostKind::Article => "article",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "question" => Some(PostKind::Question),
            "article" => Some(PostKind::Article),
            _ => None,
        }
    }
}

/// Kind-specific content submitted by the composer.
///
/// Serializes with a `type` tag so the fields land in the document exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NewPost {
    Question {
        title: String,
        description: String,
        tags: String,
    },
    Article {
        title: String,
        #[serde(rename = "abstract")]
        summary: String,
        content: String,
        tags: String,
    },
}

impl NewPost {
    pub fn kind(&self) -> PostKind {
        match self {
            NewPost::Question { .. } => PostKind::Question,
            NewPost::Article { .. } => PostKind::Article,
        }
    }
}

/// A complete post document as written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(flatten)]
    pub post: NewPost,
    /// Public URL of the attached image, empty when none was attached
    pub image_url: String,
    pub date: StoredDate,
}

impl PostRecord {
    pub fn new(post: NewPost, image_url: String, date: StoredDate) -> Self {
        Self {
            post,
            image_url,
            date,
        }
    }

    /// Flatten the record into the field map handed to the document store.
    pub fn into_fields(self) -> Result<Map<String, Value>, AppError> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            other => Err(AppError::Internal(format!(
                "Post record serialized to a non-object: {}",
                other
            ))),
        }
    }
}

/// Response body returned when a post has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPost {
    pub id: super::PostId,
}
