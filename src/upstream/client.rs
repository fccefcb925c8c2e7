//! Authenticated GET client for the upstream API

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::urls::origin_of;
use super::UpstreamError;
use crate::config::UpstreamConfig;

pub struct UpstreamClient {
    http_client: Client,
    api_base: Url,
    /// Headers shared by every call; copied, never mutated
    base_headers: HeaderMap,
}

impl UpstreamClient {
    pub fn new(http_client: Client, api_base: Url, bearer_token: &str) -> Result<Self, UpstreamError> {
        let mut base_headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {bearer_token}"))
            .map_err(|_| UpstreamError::InvalidCredential)?;
        auth.set_sensitive(true);
        base_headers.insert(header::AUTHORIZATION, auth);

        Ok(Self {
            http_client,
            api_base,
            base_headers,
        })
    }

    pub fn from_config(config: &UpstreamConfig, bearer_token: &str) -> Result<Self, UpstreamError> {
        let api_base = Url::parse(&config.api_base)?;

        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder.build().map_err(UpstreamError::Network)?;

        Self::new(http_client, api_base, bearer_token)
    }

    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Headers for one call to `url`: the base set, the target's own origin, then caller extras
    pub fn headers_for(&self, url: &Url, extra_headers: &[(&str, &str)]) -> HeaderMap {
        let mut headers = self.base_headers.clone();

        if let Ok(origin) = HeaderValue::from_str(&origin_of(url)) {
            headers.insert(header::ORIGIN, origin);
        }

        for (k, v) in extra_headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers.insert(name, value);
            }
        }

        headers
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Aborts the in-flight request and returns `Canceled` as soon as `cancel` fires.
    pub async fn get_json(
        &self,
        url: Url,
        extra_headers: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Value, UpstreamError> {
        let headers = self.headers_for(&url, extra_headers);
        let request = self.http_client.get(url).headers(headers);

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(UpstreamError::Canceled),
            result = Self::send(request) => result,
        }
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Value, UpstreamError> {
        let response = request.send().await.map_err(UpstreamError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Body(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::new(
            Client::new(),
            Url::parse(&server.uri()).unwrap(),
            "secret-token",
        )
        .unwrap()
    }

    #[test]
    fn test_headers_built_fresh_per_target() {
        let client = UpstreamClient::new(
            Client::new(),
            Url::parse("https://api.twitter.com").unwrap(),
            "tok",
        )
        .unwrap();

        let a = client.headers_for(&Url::parse("https://api.twitter.com/2/tweets").unwrap(), &[]);
        let b = client.headers_for(&Url::parse("http://127.0.0.1:8080/x").unwrap(), &[("X-Extra", "1")]);

        assert_eq!(a.get("origin").unwrap(), "https://api.twitter.com");
        assert_eq!(b.get("origin").unwrap(), "http://127.0.0.1:8080");
        assert_eq!(a.get("authorization").unwrap(), "Bearer tok");
        assert_eq!(b.get("authorization").unwrap(), "Bearer tok");
        assert!(a.get("x-extra").is_none());
        assert_eq!(b.get("x-extra").unwrap(), "1");
        assert!(client.base_headers.get("origin").is_none());
    }

    #[test]
    fn test_rejects_unusable_token() {
        let result = UpstreamClient::new(
            Client::new(),
            Url::parse("https://api.twitter.com").unwrap(),
            "bad\ntoken",
        );
        assert!(matches!(result, Err(UpstreamError::InvalidCredential)));
    }

    #[tokio::test]
    async fn test_get_json_sends_auth_and_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets"))
            .and(header("authorization", "Bearer secret-token"))
            .and(header("origin", server.uri().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = Url::parse(&format!("{}/2/tweets", server.uri())).unwrap();
        let value = client
            .get_json(url, &[], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_non_json_body_is_body_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = Url::parse(&server.uri()).unwrap();
        let err = client
            .get_json(url, &[], &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Body(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({"title": "down"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = Url::parse(&server.uri()).unwrap();
        let err = client
            .get_json(url, &[], &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Status(503)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let client = UpstreamClient::new(Client::new(), Url::parse(&uri).unwrap(), "t").unwrap();
        let err = client
            .get_json(Url::parse(&uri).unwrap(), &[], &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_cancellation_aborts_in_flight_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = Url::parse(&server.uri()).unwrap();
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let err = client.get_json(url, &[], &token).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Canceled), "got {err:?}");
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
