use std::collections::BTreeMap;

use crate::view_model::{ring_stroke_offset, AppViewModel, LikeCountView, PreviewView};

/// Opaque generation-job identifier assigned by the server.
pub type JobId = String;
/// Identifier of a story card on the gallery page.
pub type StoryId = u64;
/// Monotonically increasing counter for polling sessions. Events tagged
/// with a superseded generation are discarded.
pub type Generation = u64;

/// Status label decoded from a preview status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Completed,
    Error,
}

/// One decoded status response, as fed back by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub kind: StatusKind,
    pub progress: f64,
    pub message: String,
    pub video_url: Option<String>,
}

/// Visual lifecycle of the preview widget. `Completed` and `Failed` are
/// terminal for a given job; a new start re-enters `Generating`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum PreviewPhase {
    #[default]
    Idle,
    Generating,
    Completed { video_url: Option<String> },
    Failed { message: String },
}

const INITIAL_STATUS: &str = "Initializing...";

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    phase: PreviewPhase,
    job_id: Option<JobId>,
    generation: Generation,
    polling: bool,
    poll_failures: u32,
    progress: f64,
    status_message: String,
    likes: BTreeMap<StoryId, u64>,
    notice: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: PreviewPhase::Idle,
            job_id: None,
            generation: 0,
            polling: false,
            poll_failures: 0,
            progress: 0.0,
            status_message: INITIAL_STATUS.to_owned(),
            likes: BTreeMap::new(),
            notice: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            preview: self.preview_view(),
            likes: self
                .likes
                .iter()
                .map(|(&story_id, &likes)| LikeCountView { story_id, likes })
                .collect(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    fn preview_view(&self) -> PreviewView {
        let (status_text, error, video_url) = match &self.phase {
            PreviewPhase::Failed { message } => (format!("Error: {message}"), true, None),
            PreviewPhase::Completed { video_url } => {
                (self.status_message.clone(), false, video_url.clone())
            }
            PreviewPhase::Idle | PreviewPhase::Generating => {
                (self.status_message.clone(), false, None)
            }
        };
        let shown = self.progress.clamp(0.0, 100.0);
        PreviewView {
            generating: self.phase == PreviewPhase::Generating,
            ring_offset: ring_stroke_offset(self.progress),
            percent_text: format!("{}%", shown.round() as i64),
            status_text,
            error,
            video_url,
        }
    }

    /// Returns and clears the dirty flag used to coalesce rendering.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Consecutive transient tick failures in the active session. Resets
    /// to zero on every successful tick and on session start.
    pub fn poll_failures(&self) -> u32 {
        self.poll_failures
    }

    pub fn current_generation(&self) -> Generation {
        self.generation
    }

    pub fn active_job(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// An event is stale when no poll is active or its generation has been
    /// superseded by a later start/stop.
    pub(crate) fn is_stale(&self, generation: Generation) -> bool {
        !self.polling || generation != self.generation
    }

    pub(crate) fn start_preview(&mut self, job_id: JobId) -> Generation {
        self.generation += 1;
        self.phase = PreviewPhase::Generating;
        self.job_id = Some(job_id);
        self.polling = true;
        self.poll_failures = 0;
        self.progress = 0.0;
        self.status_message = INITIAL_STATUS.to_owned();
        self.mark_dirty();
        self.generation
    }

    /// Returns `false` when no poll was active (stop is then a no-op).
    pub(crate) fn stop_preview(&mut self) -> bool {
        if !self.polling {
            return false;
        }
        self.finish_polling();
        if self.phase == PreviewPhase::Generating {
            self.phase = PreviewPhase::Idle;
        }
        self.mark_dirty();
        true
    }

    /// Applies a fresh status report. Returns `true` when the report was
    /// terminal and polling has ended.
    pub(crate) fn apply_status(&mut self, snapshot: StatusSnapshot) -> bool {
        self.poll_failures = 0;
        self.progress = snapshot.progress;
        self.status_message = snapshot.message;
        let terminal = match snapshot.kind {
            StatusKind::Pending => false,
            StatusKind::Completed => {
                self.phase = PreviewPhase::Completed {
                    video_url: snapshot.video_url,
                };
                true
            }
            StatusKind::Error => {
                self.phase = PreviewPhase::Failed {
                    message: self.status_message.clone(),
                };
                true
            }
        };
        if terminal {
            self.finish_polling();
        }
        self.mark_dirty();
        terminal
    }

    /// The engine gave up after exhausting its retry budget.
    pub(crate) fn give_up(&mut self, message: String) {
        self.status_message = message.clone();
        self.phase = PreviewPhase::Failed { message };
        self.finish_polling();
        self.mark_dirty();
    }

    /// Stores the engine's consecutive-failure count for the session.
    /// Deliberately leaves the dirty flag alone: transient failures are
    /// never rendered.
    pub(crate) fn record_failed_ticks(&mut self, failures: u32) {
        self.poll_failures = failures;
    }

    pub(crate) fn record_like(&mut self, story_id: StoryId, likes: u64) {
        self.likes.insert(story_id, likes);
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, text: &str) {
        if self.notice.as_deref() != Some(text) {
            self.notice = Some(text.to_owned());
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    // Bumping the generation here makes any response still in flight for
    // the finished session stale on arrival.
    fn finish_polling(&mut self) {
        self.polling = false;
        self.poll_failures = 0;
        self.job_id = None;
        self.generation += 1;
    }
}
