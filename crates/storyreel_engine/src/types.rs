use std::time::Duration;

use serde::Deserialize;

/// Identifier of the polling session an event belongs to. Assigned by the
/// caller on start; events tagged with a superseded session are stale.
pub type Generation = u64;

/// Status label of a preview generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLabel {
    #[default]
    Pending,
    Completed,
    Error,
}

impl<'de> Deserialize<'de> for StatusLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(match label.as_str() {
            "completed" => Self::Completed,
            "error" => Self::Error,
            // Any other label means the job is still in flight.
            _ => Self::Pending,
        })
    }
}

/// Payload of `GET /api/video-preview/{job_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub status: StatusLabel,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Payload of `POST /like/{story_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LikeReceipt {
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("malformed payload")]
    Malformed,
    #[error("network error")]
    Network,
}

/// Events delivered from the engine back to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A status response decoded for the tagged polling session.
    Status {
        generation: Generation,
        report: StatusReport,
    },
    /// One tick failed; the loop backs off and retries.
    TickFailed {
        generation: Generation,
        error: ApiError,
        consecutive: u32,
    },
    /// The retry budget ran out; the session is over.
    RetriesExhausted {
        generation: Generation,
        error: ApiError,
    },
    /// A like post was acknowledged with the new total.
    LikePosted { story_id: u64, likes: u64 },
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Nominal cadence between status requests.
    pub interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Consecutive transient failures tolerated before giving up.
    pub max_consecutive_failures: u32,
    /// Ceiling for the doubled retry delay.
    pub max_backoff: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            max_consecutive_failures: 5,
            max_backoff: Duration::from_secs(8),
        }
    }
}
