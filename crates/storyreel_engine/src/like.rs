use async_trait::async_trait;
use url::Url;

use crate::http::{build_client, map_reqwest_error};
use crate::{ApiError, ApiFailure, LikeReceipt, PollSettings};

/// Seam over the like endpoint.
#[async_trait]
pub trait LikePoster: Send + Sync {
    async fn post_like(&self, story_id: u64) -> Result<LikeReceipt, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpLikePoster {
    client: reqwest::Client,
    base: Url,
}

impl HttpLikePoster {
    pub fn new(base: Url, settings: &PollSettings) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(settings)?,
            base,
        })
    }

    fn endpoint(&self, story_id: u64) -> Result<Url, ApiError> {
        self.base
            .join(&format!("/like/{story_id}"))
            .map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))
    }
}

#[async_trait]
impl LikePoster for HttpLikePoster {
    async fn post_like(&self, story_id: u64) -> Result<LikeReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint(story_id)?)
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
            .json::<LikeReceipt>()
            .await
            .map_err(map_reqwest_error)
    }
}
