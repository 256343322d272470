//! A question browser driven by the tokio clock.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{DebounceTimer, FilterField, QuestionBrowser, FILTER_DEBOUNCE};
use crate::errors::AppError;
use crate::models::Question;
use crate::service::PostService;

/// Owns a `QuestionBrowser` and commits filter edits once the quiet period passes.
///
/// Each edit reschedules the single pending commit, so a burst of keystrokes commits
/// once with the last value.
pub struct LiveBrowser {
    state: Arc<Mutex<QuestionBrowser>>,
    timer: DebounceTimer,
}

impl LiveBrowser {
    pub fn new(browser: QuestionBrowser) -> Self {
        Self {
            state: Arc::new(Mutex::new(browser)),
            timer: DebounceTimer::new(FILTER_DEBOUNCE),
        }
    }

    pub async fn load<S: PostService + ?Sized>(&self, service: &S) -> Result<(), AppError> {
        self.state.lock().await.load(service).await
    }

    pub async fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.state
            .lock()
            .await
            .set_filter(field, value, Instant::now().into_std());

        let state = Arc::clone(&self.state);
        self.timer.schedule(async move {
            if state.lock().await.tick(Instant::now().into_std()) {
                tracing::debug!("Question filter committed");
            }
        });
    }

    pub async fn toggle_expanded(&self, id: &str) {
        self.state.lock().await.toggle_expanded(id);
    }

    pub async fn delete<S: PostService + ?Sized>(
        &self,
        service: &S,
        id: &str,
    ) -> Result<(), AppError> {
        self.state.lock().await.delete(service, id).await
    }

    /// Snapshot of the displayed questions.
    pub async fn visible(&self) -> Vec<Question> {
        self.state.lock().await.visible().to_vec()
    }

    pub fn has_pending_commit(&self) -> bool {
        self.timer.is_pending()
    }

    /// Shared handle to the underlying browser state.
    pub fn state(&self) -> Arc<Mutex<QuestionBrowser>> {
        Arc::clone(&self.state)
    }
}
