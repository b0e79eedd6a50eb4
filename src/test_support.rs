// Test-only plumbing: a wiremock server standing in for the product site, so
// fetch and pipeline tests never touch the real internet.

use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fetcher::PageFetcher;

pub struct StubServer {
    server: MockServer,
}

impl StubServer {
    /// Serve `(path, status, body)` routes. Unknown paths get wiremock's
    /// default 404.
    pub async fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        let server = MockServer::start().await;
        for (route, status, body) in routes {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(
                    ResponseTemplate::new(status)
                        .insert_header("content-type", "text/html; charset=utf-8")
                        .set_body_string(body),
                )
                .mount(&server)
                .await;
        }
        Self { server }
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.server.uri(), route)
    }

    /// Paths requested so far, in arrival order.
    pub async fn requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

/// A fetcher that ignores any proxy settings in the environment.
pub fn local_fetcher() -> PageFetcher {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    PageFetcher::with_client(client)
}

/// A URL on a port that nothing is listening on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/dp/unreachable")
}
