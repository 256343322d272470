//! Question browser.
//!
//! Holds the questions loaded at mount, the debounced filters and the expanded cards.
//! The visible list is only recomputed when the committed filter or the loaded
//! questions change.

mod debounce;
mod expanded;
mod filter;
mod live;

pub use debounce::*;
pub use expanded::*;
pub use filter::*;
pub use live::*;

use std::time::Instant;

use crate::errors::AppError;
use crate::models::Question;
use crate::service::PostService;

/// State behind the "find questions" screen.
#[derive(Debug, Clone)]
pub struct QuestionBrowser {
    questions: Vec<Question>,
    filters: Debounced<PostFilter>,
    expanded: ExpandedSet,
    visible: Vec<Question>,
}

impl Default for QuestionBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBrowser {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            filters: Debounced::new(PostFilter::default(), FILTER_DEBOUNCE),
            expanded: ExpandedSet::new(),
            visible: Vec::new(),
        }
    }

    /// Fetch every question and replace the cache. On error the previous state is kept.
    pub async fn load<S: PostService + ?Sized>(&mut self, service: &S) -> Result<(), AppError> {
        let questions = service.list_questions().await?;
        tracing::debug!("Loaded {} questions", questions.len());
        self.questions = questions;
        self.recompute();
        Ok(())
    }

    /// Record a filter keystroke. The change shows up after a quiet period via `tick`.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>, at: Instant) {
        let draft = self.filters.draft().with(field, value);
        self.apply(DebounceAction::Edit { value: draft, at });
    }

    /// Advance the clock. Returns true when a pending filter was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let was_pending = self.filters.is_pending();
        self.apply(DebounceAction::Tick { now });
        was_pending && !self.filters.is_pending()
    }

    /// When the pending filter edit will commit, if any.
    pub fn next_commit(&self) -> Option<Instant> {
        self.filters.deadline()
    }

    fn apply(&mut self, action: DebounceAction<PostFilter>) {
        let previous = self.filters.effective().clone();
        self.filters = self.filters.clone().reduce(action);

        if self.filters.effective() != &previous {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.visible = apply_filter(&self.questions, self.filters.effective());
    }

    /// Filter values as typed.
    pub fn draft_filter(&self) -> &PostFilter {
        self.filters.draft()
    }

    /// Filter values driving the visible list.
    pub fn effective_filter(&self) -> &PostFilter {
        self.filters.effective()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn visible(&self) -> &[Question] {
        &self.visible
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        let expanded = std::mem::take(&mut self.expanded);
        self.expanded = expanded.reduce(ExpandAction::Toggle(id.to_string()));
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Delete remotely, then drop the question from the cache.
    ///
    /// The cache is left untouched if the remote delete fails. Expanded state for the
    /// id is kept; it can no longer match a rendered card.
    pub async fn delete<S: PostService + ?Sized>(
        &mut self,
        service: &S,
        id: &str,
    ) -> Result<(), AppError> {
        service.delete_post(id).await?;
        self.questions.retain(|q| q.id != id);
        self.recompute();
        Ok(())
    }
}
