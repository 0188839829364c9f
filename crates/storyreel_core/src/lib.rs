//! Storyreel core: pure widget state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod submission;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Generation, JobId, StatusKind, StatusSnapshot, StoryId};
pub use submission::{
    missing_required_fields, upload_too_large, StoryDraft, MAX_UPLOAD_BYTES,
    MISSING_FIELDS_NOTICE, OVERSIZE_UPLOAD_NOTICE,
};
pub use update::update;
pub use view_model::{
    ring_stroke_offset, AppViewModel, LikeCountView, PreviewView, RING_CIRCUMFERENCE, RING_RADIUS,
};
