use std::sync::mpsc;

use anyhow::Context;
use storyreel_core::{update, AppState, Msg};
use url::Url;
use widget_logging::widget_info;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;

/// Runs the widget against a live server: polls the preview job given on
/// the command line and renders progress until a terminal state.
pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both);

    let mut args = std::env::args().skip(1);
    let (base, job_id) = match (args.next(), args.next()) {
        (Some(base), Some(job_id)) => (base, job_id),
        _ => anyhow::bail!("usage: storyreel_app <base-url> <job-id>"),
    };
    let base = Url::parse(&base).with_context(|| format!("invalid base url {base}"))?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(base, msg_tx.clone())?;

    widget_info!("previewing job {job_id}");
    let _ = msg_tx.send(Msg::StartPreview { job_id });

    let mut state = AppState::new();
    loop {
        let msg = msg_rx
            .recv()
            .context("message channel closed before the preview finished")?;
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        if state.consume_dirty() {
            for line in ui::render::render(&state.view()) {
                println!("{line}");
            }
        }

        let view = state.view();
        if view.preview.video_url.is_some() || view.preview.error {
            widget_info!("preview finished");
            break;
        }
    }

    Ok(())
}
