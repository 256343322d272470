//! Question view model used by the question browser.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PostId, StoredDate};
use crate::errors::AppError;

/// A question as kept in the browser cache, with its date already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub image_url: String,
    /// Calendar day of creation, `YYYY-MM-DD`
    pub formatted_date: String,
}

/// Lenient view over a stored question document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredQuestion {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    date: StoredDate,
}

impl Question {
    /// Build a question from a stored document's id and fields.
    pub fn from_stored(id: PostId, data: Value) -> Result<Self, AppError> {
        let stored: StoredQuestion = serde_json::from_value(data)
            .map_err(|e| AppError::BadRequest(format!("Malformed question {}: {}", id, e)))?;
        let formatted_date = stored.date.calendar_day()?;

        Ok(Self {
            id,
            title: stored.title.unwrap_or_default(),
            description: stored.description.unwrap_or_default(),
            tags: stored.tags.unwrap_or_default(),
            image_url: stored.image_url.unwrap_or_default(),
            formatted_date,
        })
    }
}
