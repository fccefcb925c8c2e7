//! Profile lookup: `/user?handle=<handle>`

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio_util::sync::CancellationToken;

use super::{respond, to_body};
use crate::upstream::{urls, UpstreamClient, UpstreamError};

pub const ERROR_REASON: &str = "Error fetching profile";

pub async fn handle_profile(
    handle: &str,
    upstream: &UpstreamClient,
    cancel: &CancellationToken,
) -> Response<Full<Bytes>> {
    let result = fetch_profile(handle, upstream, cancel).await;
    respond(result, "profile", handle, ERROR_REASON)
}

async fn fetch_profile(
    handle: &str,
    upstream: &UpstreamClient,
    cancel: &CancellationToken,
) -> Result<Bytes, UpstreamError> {
    let url = urls::profile_url(upstream.api_base(), handle)?;
    let profile = upstream.get_json(url, &[], cancel).await?;
    to_body(&profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::ext::ReasonPhrase;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> UpstreamClient {
        UpstreamClient::new(reqwest::Client::new(), Url::parse(uri).unwrap(), "t").unwrap()
    }

    #[tokio::test]
    async fn test_profile_success_is_verbatim() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({
            "data": {"username": "alice", "name": "Alice", "id": "42", "pinned_tweet_id": "7"},
            "includes": {"tweets": [{"id": "7", "text": "pinned", "author_id": "42"}]}
        });
        Mock::given(method("GET"))
            .and(path("/2/users/by/username/alice"))
            .and(query_param("expansions", "pinned_tweet_id"))
            .and(query_param("user.fields", "profile_image_url"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .expect(1)
            .mount(&server)
            .await;

        let resp = handle_profile("alice", &client_for(&server.uri()), &CancellationToken::new()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, serde_json::to_vec(&payload).unwrap());
    }

    #[tokio::test]
    async fn test_profile_failure_is_400() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let resp = handle_profile("alice", &client_for(&server.uri()), &CancellationToken::new()).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(
            resp.extensions().get::<ReasonPhrase>().unwrap().as_bytes(),
            ERROR_REASON.as_bytes()
        );
        assert_eq!(resp.headers()["x-error-code"], "upstream_body");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(resp.headers()["vary"], "Origin");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_handle_requests_empty_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/users/by/username/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"errors": []})))
            .expect(1)
            .mount(&server)
            .await;

        let resp = handle_profile("", &client_for(&server.uri()), &CancellationToken::new()).await;
        assert_eq!(resp.status(), 200);
    }
}
