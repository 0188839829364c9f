use crate::{ApiError, ApiFailure, PollSettings};

pub(crate) fn build_client(settings: &PollSettings) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiFailure::Malformed, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
