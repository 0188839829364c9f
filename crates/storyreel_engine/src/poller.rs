use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;
use url::Url;
use widget_logging::{widget_debug, widget_info, widget_warn};

use crate::like::{HttpLikePoster, LikePoster};
use crate::status::{HttpStatusFetcher, StatusFetcher};
use crate::{ApiError, Generation, PollEvent, PollSettings, StatusLabel};

enum EngineCommand {
    StartPolling {
        generation: Generation,
        job_id: String,
    },
    StopPolling,
    PostLike {
        story_id: u64,
    },
}

/// Handle to the background polling engine.
///
/// Commands are queued over a channel into a dedicated thread that owns a
/// tokio runtime; events come back on the receiver returned alongside the
/// handle. At most one poll loop is live at any time: starting a session
/// cancels its predecessor, and dropping the handle cancels whatever is
/// left before the runtime shuts down.
pub struct WidgetEngine {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl WidgetEngine {
    /// Engine with HTTP clients for the server at `base`.
    pub fn new(
        base: Url,
        settings: PollSettings,
    ) -> Result<(Self, mpsc::Receiver<PollEvent>), ApiError> {
        let fetcher = Arc::new(HttpStatusFetcher::new(base.clone(), &settings)?);
        let poster = Arc::new(HttpLikePoster::new(base, &settings)?);
        Ok(Self::with_clients(fetcher, poster, settings))
    }

    /// Engine over caller-supplied endpoint clients.
    pub fn with_clients(
        fetcher: Arc<dyn StatusFetcher>,
        poster: Arc<dyn LikePoster>,
        settings: PollSettings,
    ) -> (Self, mpsc::Receiver<PollEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_commands(cmd_rx, event_tx, fetcher, poster, settings));

        (Self { cmd_tx }, event_rx)
    }

    pub fn start_polling(&self, generation: Generation, job_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling {
            generation,
            job_id: job_id.into(),
        });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling);
    }

    pub fn post_like(&self, story_id: u64) {
        let _ = self.cmd_tx.send(EngineCommand::PostLike { story_id });
    }
}

fn run_commands(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<PollEvent>,
    fetcher: Arc<dyn StatusFetcher>,
    poster: Arc<dyn LikePoster>,
    settings: PollSettings,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut active: Option<(Generation, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::StartPolling { generation, job_id } => {
                if let Some((superseded, token)) = active.take() {
                    widget_debug!("superseding poll session {superseded}");
                    token.cancel();
                }
                let token = CancellationToken::new();
                let loop_token = token.clone();
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let settings = settings.clone();
                runtime.spawn(async move {
                    run_poll_loop(fetcher, generation, job_id, settings, event_tx, loop_token)
                        .await;
                });
                active = Some((generation, token));
            }
            EngineCommand::StopPolling => {
                if let Some((generation, token)) = active.take() {
                    widget_debug!("stopping poll session {generation}");
                    token.cancel();
                }
            }
            EngineCommand::PostLike { story_id } => {
                let poster = poster.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    match poster.post_like(story_id).await {
                        Ok(receipt) => {
                            let _ = event_tx.send(PollEvent::LikePosted {
                                story_id,
                                likes: receipt.likes,
                            });
                        }
                        // Fire-and-forget: the page keeps its old count.
                        Err(err) => widget_warn!("like post for story {story_id} failed: {err}"),
                    }
                });
            }
        }
    }

    // Handle dropped: release the timer before the runtime shuts down.
    if let Some((generation, token)) = active.take() {
        widget_debug!("releasing poll session {generation} on engine teardown");
        token.cancel();
    }
}

async fn run_poll_loop(
    fetcher: Arc<dyn StatusFetcher>,
    generation: Generation,
    job_id: String,
    settings: PollSettings,
    event_tx: mpsc::Sender<PollEvent>,
    cancel: CancellationToken,
) {
    let mut consecutive_failures = 0u32;
    let mut delay = settings.interval;
    widget_info!("polling preview status for job {job_id} (session {generation})");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                widget_debug!("poll session {generation} cancelled");
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        // Each request is awaited before the next tick is scheduled, so a
        // slow round-trip stretches the cadence instead of overlapping it.
        match fetcher.fetch_status(&job_id).await {
            Ok(report) => {
                consecutive_failures = 0;
                delay = settings.interval;
                let terminal =
                    matches!(report.status, StatusLabel::Completed | StatusLabel::Error);
                if event_tx.send(PollEvent::Status { generation, report }).is_err() {
                    return;
                }
                if terminal {
                    widget_info!("poll session {generation} reached a terminal status");
                    return;
                }
            }
            Err(error) => {
                consecutive_failures += 1;
                widget_warn!(
                    "status poll for job {job_id} failed ({consecutive_failures}/{}): {error}",
                    settings.max_consecutive_failures
                );
                if consecutive_failures >= settings.max_consecutive_failures {
                    let _ = event_tx.send(PollEvent::RetriesExhausted { generation, error });
                    return;
                }
                let _ = event_tx.send(PollEvent::TickFailed {
                    generation,
                    error,
                    consecutive: consecutive_failures,
                });
                delay = delay.saturating_mul(2).min(settings.max_backoff);
            }
        }
    }
}
