use std::sync::mpsc;
use std::thread;

use storyreel_core::{Effect, Msg, StatusKind, StatusSnapshot};
use storyreel_engine::{
    ApiError, PollEvent, PollSettings, StatusLabel, StatusReport, WidgetEngine,
};
use url::Url;
use widget_logging::widget_info;

/// Executes core effects against the engine and pumps engine events back
/// into the message channel.
pub struct EffectRunner {
    engine: WidgetEngine,
}

impl EffectRunner {
    pub fn new(base: Url, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let (engine, event_rx) = WidgetEngine::new(base, PollSettings::default())?;
        spawn_event_pump(event_rx, msg_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartPolling { generation, job_id } => {
                    widget_info!("StartPolling session={generation} job={job_id}");
                    self.engine.start_polling(generation, job_id);
                }
                Effect::StopPolling => {
                    self.engine.stop_polling();
                }
                Effect::PostLike { story_id } => {
                    self.engine.post_like(story_id);
                }
                Effect::SubmitStory { draft } => {
                    // Submission itself belongs to the host page; the glue
                    // only reports that the draft passed validation.
                    widget_info!("story draft accepted: title={}", draft.title);
                }
            }
        }
    }
}

fn spawn_event_pump(event_rx: mpsc::Receiver<PollEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                return;
            }
        }
    });
}

fn map_event(event: PollEvent) -> Msg {
    match event {
        PollEvent::Status { generation, report } => Msg::StatusReported {
            generation,
            snapshot: map_report(report),
        },
        PollEvent::TickFailed {
            generation,
            consecutive,
            ..
        } => Msg::PollTickFailed {
            generation,
            failures: consecutive,
        },
        PollEvent::RetriesExhausted { generation, error } => Msg::PollGaveUp {
            generation,
            detail: error.to_string(),
        },
        PollEvent::LikePosted { story_id, likes } => Msg::LikeRecorded { story_id, likes },
    }
}

fn map_report(report: StatusReport) -> StatusSnapshot {
    StatusSnapshot {
        kind: match report.status {
            StatusLabel::Pending => StatusKind::Pending,
            StatusLabel::Completed => StatusKind::Completed,
            StatusLabel::Error => StatusKind::Error,
        },
        progress: report.progress,
        message: report.message,
        video_url: report.video_url,
    }
}
