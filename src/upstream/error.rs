//! Upstream failure kinds

use thiserror::Error;

/// Everything that can go wrong between the proxy and the upstream API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),

    #[error("bearer token is not a valid header value")]
    InvalidCredential,

    #[error("upstream request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream body is not valid JSON: {0}")]
    Body(String),

    #[error("timeline contained no tweets")]
    EmptyTimeline,

    #[error("timeline response has no tweet id_str")]
    MissingTweetId,

    #[error("upstream request canceled")]
    Canceled,
}

impl UpstreamError {
    /// Machine-readable code surfaced in the `X-Error-Code` response header
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidCredential => "invalid_credential",
            Self::Network(_) => "upstream_network",
            Self::Status(_) => "upstream_status",
            Self::Body(_) => "upstream_body",
            Self::EmptyTimeline => "empty_timeline",
            Self::MissingTweetId => "missing_tweet_id",
            Self::Canceled => "canceled",
        }
    }
}

impl From<url::ParseError> for UpstreamError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            UpstreamError::InvalidUrl("x".to_string()),
            UpstreamError::InvalidCredential,
            UpstreamError::Status(500),
            UpstreamError::Body("eof".to_string()),
            UpstreamError::EmptyTimeline,
            UpstreamError::MissingTweetId,
            UpstreamError::Canceled,
        ];
        let mut codes: Vec<_> = errors.iter().map(UpstreamError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            UpstreamError::Status(503).to_string(),
            "upstream returned status 503"
        );
        assert_eq!(UpstreamError::Canceled.to_string(), "upstream request canceled");
    }
}
