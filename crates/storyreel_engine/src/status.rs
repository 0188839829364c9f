use async_trait::async_trait;
use url::Url;

use crate::http::{build_client, map_reqwest_error};
use crate::{ApiError, ApiFailure, PollSettings, StatusReport};

/// Seam over the preview status endpoint so the poll loop can be driven
/// against a double in tests.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch_status(&self, job_id: &str) -> Result<StatusReport, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpStatusFetcher {
    pub fn new(base: Url, settings: &PollSettings) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(settings)?,
            base,
        })
    }

    fn endpoint(&self, job_id: &str) -> Result<Url, ApiError> {
        self.base
            .join(&format!("/api/video-preview/{job_id}"))
            .map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch_status(&self, job_id: &str) -> Result<StatusReport, ApiError> {
        let response = self
            .client
            .get(self.endpoint(job_id)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<StatusReport>()
            .await
            .map_err(map_reqwest_error)
    }
}
