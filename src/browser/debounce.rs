//! Debouncing for rapidly changing input.
//!
//! `Debounced` is a pure reducer: callers feed it edits and clock ticks and read back the
//! committed value. `DebounceTimer` is the runtime side, a single-slot delayed task.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

/// Quiet period before a filter edit takes effect.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

/// Input to the debounce reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum DebounceAction<T> {
    /// A new draft value arrived at `at`. Restarts the quiet period.
    Edit { value: T, at: Instant },
    /// The clock reached `now`.
    Tick { now: Instant },
}

/// A draft value and the effective value it commits to after a quiet period.
#[derive(Debug, Clone, PartialEq)]
pub struct Debounced<T> {
    draft: T,
    effective: T,
    deadline: Option<Instant>,
    window: Duration,
}

impl<T: Clone> Debounced<T> {
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            draft: initial.clone(),
            effective: initial,
            deadline: None,
            window,
        }
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn effective(&self) -> &T {
        &self.effective
    }

    /// When the pending draft will commit, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn reduce(self, action: DebounceAction<T>) -> Self {
        match action {
            DebounceAction::Edit { value, at } => Self {
                draft: value,
                deadline: Some(at + self.window),
                ..self
            },
            DebounceAction::Tick { now } => match self.deadline {
                Some(deadline) if now >= deadline => Self {
                    effective: self.draft.clone(),
                    deadline: None,
                    ..self
                },
                _ => self,
            },
        }
    }
}

/// Runs a task after a quiet period; scheduling again cancels the pending task.
pub struct DebounceTimer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Run `task` once `window` elapses, replacing any task still waiting.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
