#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User requested a preview for a server-side generation job.
    StartPreview { job_id: crate::JobId },
    /// User dismissed the preview widget.
    StopPreview,
    /// Engine delivered a decoded status report for a polling session.
    StatusReported {
        generation: crate::Generation,
        snapshot: crate::StatusSnapshot,
    },
    /// One poll tick failed transiently; the engine retries on its own.
    /// `failures` is the consecutive-failure count for the session.
    PollTickFailed {
        generation: crate::Generation,
        failures: u32,
    },
    /// Engine exhausted its retry budget for a polling session.
    PollGaveUp {
        generation: crate::Generation,
        detail: String,
    },
    /// User clicked the like button on a story card.
    LikeClicked { story_id: crate::StoryId },
    /// Server acknowledged a like with the new total.
    LikeRecorded { story_id: crate::StoryId, likes: u64 },
    /// User picked a media file for the submission form.
    MediaSelected { byte_len: u64 },
    /// User submitted the story form.
    SubmitRequested { draft: crate::StoryDraft },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
