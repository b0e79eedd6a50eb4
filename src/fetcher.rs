// =============================================================================
// fetcher.rs - ONE GET PER PAGE, NO SECOND CHANCES
// =============================================================================
//
// A thin wrapper around reqwest. One request per URL, the body comes back as
// text whatever the status code says. A 404 page or a captcha wall still gets
// handed to the extractor, which will dutifully find nothing in it. There is
// no retry and no backoff. A transport failure ends the run.
// =============================================================================

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ScrapeError;

/// What came back from one product URL.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a client with the configured User-Agent and optional timeout.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(ScrapeError::Client)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and return the body as text, regardless of status.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let wrap = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(wrap)?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = url, status = %status, "Non-success status, extracting from the body anyway");
        }

        let body = response.text().await.map_err(wrap)?;
        debug!(url = url, status = %status, bytes = body.len(), "Page fetched");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{local_fetcher, refused_url, StubServer};

    #[tokio::test]
    async fn test_fetch_returns_body_text() {
        let server = StubServer::start(vec![("/dp/1", 200, "<h1>Widget</h1>")]).await;
        let page = local_fetcher().fetch(&server.url("/dp/1")).await.unwrap();

        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.body, "<h1>Widget</h1>");
        assert_eq!(page.url, server.url("/dp/1"));
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let server = StubServer::start(vec![("/dp/gone", 404, "<h1>Page not found</h1>")]).await;
        let page = local_fetcher().fetch(&server.url("/dp/gone")).await.unwrap();

        assert_eq!(page.status, StatusCode::NOT_FOUND);
        assert_eq!(page.body, "<h1>Page not found</h1>");
    }

    #[tokio::test]
    async fn test_connection_failure_is_fetch_error() {
        let url = refused_url().await;
        let err = local_fetcher().fetch(&url).await.unwrap_err();

        match err {
            ScrapeError::Fetch { url: failed, .. } => assert_eq!(failed, url),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = Config {
            request_timeout: Some(std::time::Duration::from_secs(5)),
            ..Config::default()
        };
        assert!(PageFetcher::new(&config).is_ok());
    }
}
