use crate::submission::{missing_required_fields, upload_too_large};
use crate::{AppState, Effect, Msg, MISSING_FIELDS_NOTICE, OVERSIZE_UPLOAD_NOTICE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::StartPreview { job_id } => {
            let job_id = job_id.trim().to_owned();
            if job_id.is_empty() {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            // One poll at a time: a previous session must release its
            // timer before the new one starts.
            if state.is_polling() {
                effects.push(Effect::StopPolling);
            }
            let generation = state.start_preview(job_id.clone());
            effects.push(Effect::StartPolling { generation, job_id });
            effects
        }
        Msg::StopPreview => {
            if state.stop_preview() {
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::StatusReported {
            generation,
            snapshot,
        } => {
            if state.is_stale(generation) {
                Vec::new()
            } else if state.apply_status(snapshot) {
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        // Transient failures stay invisible: the engine retries and the
        // widget keeps whatever it showed last. The count is tracked so
        // the session's health is inspectable without a view change.
        Msg::PollTickFailed {
            generation,
            failures,
        } => {
            if !state.is_stale(generation) {
                state.record_failed_ticks(failures);
            }
            Vec::new()
        }
        Msg::PollGaveUp { generation, detail } => {
            if state.is_stale(generation) {
                Vec::new()
            } else {
                state.give_up(detail);
                vec![Effect::StopPolling]
            }
        }
        Msg::LikeClicked { story_id } => vec![Effect::PostLike { story_id }],
        Msg::LikeRecorded { story_id, likes } => {
            state.record_like(story_id, likes);
            Vec::new()
        }
        Msg::MediaSelected { byte_len } => {
            if upload_too_large(byte_len) {
                state.set_notice(OVERSIZE_UPLOAD_NOTICE);
            } else {
                state.clear_notice();
            }
            Vec::new()
        }
        Msg::SubmitRequested { draft } => {
            if missing_required_fields(&draft).is_empty() {
                state.clear_notice();
                vec![Effect::SubmitStory { draft }]
            } else {
                state.set_notice(MISSING_FIELDS_NOTICE);
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
