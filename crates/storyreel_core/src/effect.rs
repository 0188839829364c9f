/// IO requests produced by `update` for the platform layer to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin a recurring status poll for the given session.
    StartPolling {
        generation: crate::Generation,
        job_id: crate::JobId,
    },
    /// Cancel the active status poll, releasing its timer.
    StopPolling,
    /// Fire-and-forget like post for a story card.
    PostLike { story_id: crate::StoryId },
    /// Hand a validated story draft to the host page for submission.
    SubmitStory { draft: crate::StoryDraft },
}
