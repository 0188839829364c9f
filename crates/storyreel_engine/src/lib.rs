//! Storyreel engine: endpoint clients and poll-loop effect execution.
mod http;
mod like;
mod poller;
mod status;
mod types;

pub use like::{HttpLikePoster, LikePoster};
pub use poller::WidgetEngine;
pub use status::{HttpStatusFetcher, StatusFetcher};
pub use types::{
    ApiError, ApiFailure, Generation, LikeReceipt, PollEvent, PollSettings, StatusLabel,
    StatusReport,
};
