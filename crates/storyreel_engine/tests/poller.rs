use std::sync::mpsc;
use std::time::{Duration, Instant};

use storyreel_engine::{PollEvent, PollSettings, StatusLabel, WidgetEngine};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("mock server url")
}

fn fast_settings() -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(20),
        max_backoff: Duration::from_millis(100),
        ..PollSettings::default()
    }
}

/// Receives events on a blocking thread until a terminal one arrives (or
/// the channel goes quiet), handing the receiver back for follow-up
/// assertions.
async fn drain_until_terminal(
    events: mpsc::Receiver<PollEvent>,
) -> (Vec<PollEvent>, mpsc::Receiver<PollEvent>) {
    tokio::task::spawn_blocking(move || {
        let mut seen = Vec::new();
        loop {
            match events.recv_timeout(Duration::from_secs(5)) {
                Ok(event) => {
                    let terminal = matches!(
                        &event,
                        PollEvent::Status { report, .. } if report.status != StatusLabel::Pending
                    ) || matches!(&event, PollEvent::RetriesExhausted { .. });
                    seen.push(event);
                    if terminal {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        (seen, events)
    })
    .await
    .expect("event drain")
}

async fn collect_for(
    events: mpsc::Receiver<PollEvent>,
    window: Duration,
) -> (Vec<PollEvent>, mpsc::Receiver<PollEvent>) {
    tokio::task::spawn_blocking(move || {
        let deadline = Instant::now() + window;
        let mut seen = Vec::new();
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match events.recv_timeout(remaining) {
                Ok(event) => seen.push(event),
                Err(_) => break,
            }
        }
        (seen, events)
    })
    .await
    .expect("event collect")
}

#[tokio::test]
async fn poll_loop_reports_progress_then_stops_on_completion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video-preview/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "pending",
            "progress": 40,
            "message": "Encoding...",
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/video-preview/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "completed",
            "progress": 100,
            "message": "Done",
            "video_url": "/media/out.mp4",
        })))
        .mount(&server)
        .await;

    let (engine, events) = WidgetEngine::new(base(&server), fast_settings()).expect("engine");
    engine.start_polling(1, "job-1");

    let (seen, events) = drain_until_terminal(events).await;

    let reports: Vec<_> = seen
        .iter()
        .map(|event| match event {
            PollEvent::Status { generation, report } => {
                assert_eq!(*generation, 1);
                report.clone()
            }
            other => panic!("unexpected event: {other:?}"),
        })
        .collect();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].status, StatusLabel::Pending);
    assert_eq!(reports[0].progress, 40.0);
    assert_eq!(reports[2].status, StatusLabel::Completed);
    assert_eq!(reports[2].video_url.as_deref(), Some("/media/out.mp4"));

    // The loop stopped itself after the terminal report.
    let (late, _events) = collect_for(events, Duration::from_millis(200)).await;
    assert!(late.is_empty());
    drop(engine);
}

#[tokio::test]
async fn poll_loop_gives_up_after_the_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video-preview/job-err"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let settings = PollSettings {
        interval: Duration::from_millis(10),
        max_consecutive_failures: 2,
        ..fast_settings()
    };
    let (engine, events) = WidgetEngine::new(base(&server), settings).expect("engine");
    engine.start_polling(4, "job-err");

    let (seen, _events) = drain_until_terminal(events).await;

    assert_eq!(seen.len(), 2);
    match &seen[0] {
        PollEvent::TickFailed {
            generation,
            error,
            consecutive,
        } => {
            assert_eq!(*generation, 4);
            assert_eq!(*consecutive, 1);
            assert_eq!(error.kind, storyreel_engine::ApiFailure::HttpStatus(500));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match &seen[1] {
        PollEvent::RetriesExhausted { generation, error } => {
            assert_eq!(*generation, 4);
            assert_eq!(error.kind, storyreel_engine::ApiFailure::HttpStatus(500));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    drop(engine);
}

#[tokio::test]
async fn stopping_before_the_first_tick_issues_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video-preview/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "pending",
        })))
        .expect(0)
        .mount(&server)
        .await;

    let settings = PollSettings {
        interval: Duration::from_millis(200),
        ..PollSettings::default()
    };
    let (engine, events) = WidgetEngine::new(base(&server), settings).expect("engine");
    engine.start_polling(1, "job-1");
    engine.stop_polling();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(events.try_recv().is_err());
    drop(engine);
}

#[tokio::test]
async fn starting_a_new_session_supersedes_the_previous_one() {
    let server = MockServer::start().await;
    for job in ["job-a", "job-b"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/video-preview/{job}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "pending",
                "progress": 10,
                "message": "Encoding...",
            })))
            .mount(&server)
            .await;
    }

    let (engine, events) = WidgetEngine::new(base(&server), fast_settings()).expect("engine");
    engine.start_polling(1, "job-a");
    engine.start_polling(2, "job-b");

    let (seen, _events) = collect_for(events, Duration::from_millis(200)).await;

    assert!(!seen.is_empty());
    for event in &seen {
        match event {
            PollEvent::Status { generation, .. } => assert_eq!(*generation, 2),
            other => panic!("unexpected event: {other:?}"),
        }
    }
    drop(engine);
}

#[tokio::test]
async fn like_posts_flow_back_as_events() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/like/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "likes": 3 })))
        .mount(&server)
        .await;

    let (engine, events) = WidgetEngine::new(base(&server), fast_settings()).expect("engine");
    engine.post_like(7);

    let event = tokio::task::spawn_blocking(move || {
        events
            .recv_timeout(Duration::from_secs(5))
            .expect("like event")
    })
    .await
    .expect("event wait");

    assert_eq!(
        event,
        PollEvent::LikePosted {
            story_id: 7,
            likes: 3,
        }
    );
    drop(engine);
}
