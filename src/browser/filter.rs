//! Client-side question filtering.

use serde::{Deserialize, Serialize};

use crate::models::Question;

/// One of the three filter inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Tag,
    Date,
}

/// Title, tag and date filters, combined with AND.
///
/// Empty title/tag filters match everything through the substring rule; an empty date
/// filter is skipped outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub date: String,
}

impl PostFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tag.is_empty() && self.date.is_empty()
    }

    /// Copy of this filter with one field replaced.
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FilterField::Title => next.title = value,
            FilterField::Tag => next.tag = value,
            FilterField::Date => next.date = value,
        }
        next
    }

    pub fn matches(&self, question: &Question) -> bool {
        let matches_title = contains_ignore_case(&question.title, &self.title);
        let matches_tag = contains_ignore_case(&question.tags, &self.tag);
        let matches_date = self.date.is_empty() || question.formatted_date == self.date;

        matches_title && matches_tag && matches_date
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Questions passing `filter`, in their original order.
pub fn apply_filter(questions: &[Question], filter: &PostFilter) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| filter.matches(q))
        .cloned()
        .collect()
}
