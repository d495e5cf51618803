//! Session state for one user: current tasks, result, error, busy flag and active tab.
//!
//! Every submission gets a new epoch. Only the response for the latest epoch is
//! applied, so a slow reply to a superseded submission can never overwrite
//! fresher state.

use crate::client::LitReviewClient;
use crate::cover::CoverImage;
use crate::error::{LitReviewError, ValidationError};
use crate::form::WorkForm;
use crate::render::{render, RenderedContent, TabState};
use crate::types::{GenerationResult, TaskKind, TaskSelection};
use std::sync::{Arc, Mutex, MutexGuard};

/// What happened to a submission's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The result was stored.
    Completed,
    /// The call failed and the error message was stored.
    Failed,
    /// A newer submission started first; the response was discarded.
    Superseded,
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Epoch(u64);

/// A point-in-time copy of the session state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub tasks: TaskSelection,
    pub busy: bool,
    pub error: Option<String>,
    pub result: Option<GenerationResult>,
    pub cover: Option<CoverImage>,
    pub active_tab: Option<TaskKind>,
}

#[derive(Debug, Default)]
struct SessionState {
    tasks: TaskSelection,
    epoch: u64,
    busy: bool,
    error: Option<String>,
    result: Option<GenerationResult>,
    cover: Option<CoverImage>,
    tabs: TabState,
}

impl SessionState {
    fn begin(&mut self, cover: Option<CoverImage>) -> Epoch {
        self.epoch += 1;
        self.busy = true;
        self.error = None;
        self.result = None;
        self.cover = cover;
        Epoch(self.epoch)
    }

    fn complete(
        &mut self,
        epoch: Epoch,
        outcome: Result<GenerationResult, LitReviewError>,
    ) -> SubmitOutcome {
        if epoch.0 != self.epoch {
            tracing::debug!(
                stale = epoch.0,
                current = self.epoch,
                "discarding response for superseded submission"
            );
            return SubmitOutcome::Superseded;
        }

        self.busy = false;
        match outcome {
            Ok(result) => {
                self.tabs.sync(&result.present_kinds());
                self.result = Some(result);
                SubmitOutcome::Completed
            }
            Err(err) => {
                self.error = Some(format!("Could not generate content: {}", err));
                SubmitOutcome::Failed
            }
        }
    }

    /// Clears the busy flag of a submission that will never complete.
    fn abandon(&mut self, epoch: Epoch) {
        if epoch.0 == self.epoch && self.busy {
            tracing::debug!(epoch = epoch.0, "submission dropped before its response arrived");
            self.busy = false;
        }
    }

    /// The tab preference is kept across submissions but only reported while a
    /// result is shown.
    fn active_tab(&self) -> Option<TaskKind> {
        self.result.as_ref().and(self.tabs.active())
    }
}

/// Releases the busy flag if `submit` is dropped mid-flight.
struct PendingSubmission<'a> {
    session: &'a Session,
    epoch: Epoch,
    settled: bool,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.lock().abandon(self.epoch);
        }
    }
}

/// Shared handle to a session. Clones refer to the same state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a specific task selection instead of the default.
    pub fn with_tasks(tasks: TaskSelection) -> Self {
        let session = Self::default();
        session.lock().tasks = tasks;
        session
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn tasks(&self) -> TaskSelection {
        self.lock().tasks
    }

    pub fn set_task(&self, kind: TaskKind, selected: bool) {
        self.lock().tasks.set(kind, selected);
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn result(&self) -> Option<GenerationResult> {
        self.lock().result.clone()
    }

    /// The tab being shown, or `None` while there is no result.
    pub fn active_tab(&self) -> Option<TaskKind> {
        self.lock().active_tab()
    }

    /// Switches to `kind` if the current result has it.
    pub fn select_tab(&self, kind: TaskKind) -> bool {
        let mut state = self.lock();
        let present = state
            .result
            .as_ref()
            .map(GenerationResult::present_kinds)
            .unwrap_or_default();
        state.tabs.select(kind, &present)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            tasks: state.tasks,
            busy: state.busy,
            error: state.error.clone(),
            result: state.result.clone(),
            cover: state.cover.clone(),
            active_tab: state.active_tab(),
        }
    }

    /// Renders the current result with the cover that was submitted alongside it.
    pub fn rendered(&self) -> Option<RenderedContent> {
        let state = self.lock();
        state
            .result
            .as_ref()
            .map(|result| render(result, state.cover.as_ref()))
    }

    /// Clears the previous result and error, marks the session busy and returns
    /// the epoch of the new submission.
    pub fn begin(&self, cover: Option<CoverImage>) -> Epoch {
        self.lock().begin(cover)
    }

    /// Applies the response for `epoch`, unless a newer submission has started.
    pub fn complete(
        &self,
        epoch: Epoch,
        outcome: Result<GenerationResult, LitReviewError>,
    ) -> SubmitOutcome {
        self.lock().complete(epoch, outcome)
    }

    /// Validates `form` against the current tasks and runs one generation.
    ///
    /// # Errors
    ///
    /// Returns the validation error without touching any state if the form is
    /// incomplete. Generation failures are stored in the session instead.
    ///
    /// Dropping the returned future before it finishes (a timeout, a cancelled
    /// task) clears the busy flag, unless a newer submission owns it by then.
    pub async fn submit(
        &self,
        client: &LitReviewClient,
        form: &WorkForm,
    ) -> Result<SubmitOutcome, ValidationError> {
        let tasks = self.tasks();
        let metadata = form.validate(&tasks)?;

        let epoch = self.begin(metadata.cover_image.clone());
        let mut pending = PendingSubmission {
            session: self,
            epoch,
            settled: false,
        };
        let outcome = client.generate(&metadata, &tasks).await;
        pending.settled = true;
        Ok(self.complete(epoch, outcome))
    }
}
