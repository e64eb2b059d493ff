//! Reddit listing client and shared HTTP client construction.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::api::types::Listing;
use crate::error::{Error, Result};

/// Reddit base URL.
pub const API_BASE: &str = "https://www.reddit.com";

/// User agent sent with every request.
pub const USER_AGENT: &str = "Reddit Image Downloader/1.0";

/// Connection pool settings for the shared client.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Upper bound on idle connections across all hosts.
    ///
    /// reqwest only enforces a per-host cap, so this is advisory and is used
    /// to clamp `max_idle_per_host`.
    pub max_idle_total: usize,
    pub max_idle_per_host: usize,
    pub idle_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_idle_total: 100,
            max_idle_per_host: 20,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Build the HTTP client shared by every worker for the whole run.
///
/// No request timeout is configured: requests are bounded by the run's
/// cancellation token instead.
pub fn build_http_client(settings: &HttpSettings) -> Result<Client> {
    Client::builder()
        .user_agent(&settings.user_agent)
        .pool_max_idle_per_host(settings.max_idle_per_host.min(settings.max_idle_total))
        .pool_idle_timeout(settings.idle_timeout)
        .tcp_keepalive(settings.tcp_keepalive)
        .build()
        .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))
}

/// Run `fut` unless `cancel` fires first.
pub async fn cancellable<F, T>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        res = fut => res,
    }
}

/// Client for subreddit listings.
#[derive(Debug, Clone)]
pub struct RedditApi {
    client: Client,
    base_url: String,
}

impl RedditApi {
    /// Create a listing client against the public Reddit API.
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, API_BASE)
    }

    /// Create a listing client against another host (mirrors, tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The underlying shared HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Listing endpoint for a subreddit.
    pub fn listing_url(&self, subreddit: &str) -> String {
        format!("{}/r/{}.json", self.base_url, subreddit)
    }

    /// Fetch and decode the listing of a subreddit.
    pub async fn get_listing(
        &self,
        subreddit: &str,
        cancel: &CancellationToken,
    ) -> Result<Listing> {
        let url = self.listing_url(subreddit);
        tracing::debug!("GET {}", url);

        cancellable(cancel, async {
            let response = self.client.get(&url).send().await?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(Error::HttpStatus { url, status });
            }

            let body = response.bytes().await?;
            let listing: Listing = serde_json::from_slice(&body)?;
            Ok(listing)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> RedditApi {
        let client = build_http_client(&HttpSettings::default()).unwrap();
        RedditApi::with_base_url(client, server.uri())
    }

    #[test]
    fn test_listing_url() {
        let client = build_http_client(&HttpSettings::default()).unwrap();
        let api = RedditApi::with_base_url(client, "http://localhost:8080/");
        assert_eq!(api.listing_url("pics"), "http://localhost:8080/r/pics.json");
    }

    #[tokio::test]
    async fn test_get_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics.json"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":{"children":[{"data":{"url":"https://i.redd.it/a.jpg"}}]}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let listing = api_for(&server)
            .get_listing("pics", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(listing.urls().collect::<Vec<_>>(), vec!["https://i.redd.it/a.jpg"]);
    }

    #[tokio::test]
    async fn test_get_listing_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/private.json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .get_listing("private", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status, .. } if status == StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_get_listing_bad_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/broken.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .get_listing("broken", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_get_listing_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_secs(30)),
            )
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = api_for(&server)
            .get_listing("slow", &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
