//! Latest tweet lookup: `/latest-tweet?handle=<handle>`
//!
//! The v1.1 timeline endpoint only gives us the id of the newest non-reply
//! tweet; the full text comes from a second lookup against the v2 tweets
//! endpoint. The second call depends on the first, so they run in order.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{respond, to_body};
use crate::upstream::{urls, UpstreamClient, UpstreamError};

pub const ERROR_REASON: &str = "Error fetching latest tweet";

pub async fn handle_latest_tweet(
    handle: &str,
    upstream: &UpstreamClient,
    cancel: &CancellationToken,
) -> Response<Full<Bytes>> {
    let result = fetch_latest_tweet(handle, upstream, cancel).await;
    respond(result, "latest-tweet", handle, ERROR_REASON)
}

async fn fetch_latest_tweet(
    handle: &str,
    upstream: &UpstreamClient,
    cancel: &CancellationToken,
) -> Result<Bytes, UpstreamError> {
    let timeline_url = urls::timeline_url(upstream.api_base(), handle)?;
    let timeline = upstream.get_json(timeline_url, &[], cancel).await?;
    let tweet_id = latest_tweet_id(&timeline)?;

    let tweet_url = urls::tweet_url(upstream.api_base(), tweet_id)?;
    let tweet = upstream.get_json(tweet_url, &[], cancel).await?;
    to_body(&tweet)
}

/// `id_str` of the first entry of a timeline array
fn latest_tweet_id(timeline: &Value) -> Result<&str, UpstreamError> {
    let tweets = timeline.as_array().ok_or(UpstreamError::MissingTweetId)?;
    let latest = tweets.first().ok_or(UpstreamError::EmptyTimeline)?;
    latest
        .get("id_str")
        .and_then(Value::as_str)
        .ok_or(UpstreamError::MissingTweetId)
}
