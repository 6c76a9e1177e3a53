//! Upstream HTTP client behind the `HistoryClient` seam.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::HistoryConfig;
use crate::error::{HistoryError, HistoryResult};

/// Abstraction over the history server and log viewer endpoints.
///
/// Tools take `&dyn HistoryClient` so every handler is testable against
/// [`crate::mock::MockHistoryClient`] without a network.
#[async_trait]
pub trait HistoryClient: Send + Sync {
    /// GET `{base_url}/{endpoint}` with the given query pairs and parse
    /// the body as JSON.
    async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> HistoryResult<Value>;

    /// GET a caller-composed absolute URL, following redirects, and return
    /// the decoded body unparsed.
    async fn fetch_text(&self, url: &str) -> HistoryResult<String>;

    /// Configured history REST base URL.
    fn base_url(&self) -> &str;

    /// Derived log-viewer base URL.
    fn logs_base_url(&self) -> &str;

    /// Configured NodeManager log port.
    fn nodemanager_port(&self) -> u16;
}

/// `HistoryClient` over reqwest with a fixed per-request timeout.
///
/// No retries, no caching; each call is independent.
pub struct HttpHistoryClient {
    http: reqwest::Client,
    base_url: String,
    logs_base: String,
    nodemanager_port: u16,
    timeout_secs: u64,
}

impl HttpHistoryClient {
    pub fn new(config: &HistoryConfig) -> HistoryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HistoryError::Upstream(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            logs_base: config.logs_base_url(),
            nodemanager_port: config.nodemanager_port,
            timeout_secs: config.timeout_secs,
        })
    }

    fn classify(&self, e: reqwest::Error) -> HistoryError {
        if e.is_timeout() {
            HistoryError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if e.is_connect() {
            HistoryError::Connect {
                base_url: self.base_url.clone(),
                message: e.to_string(),
            }
        } else {
            HistoryError::Upstream(e.to_string())
        }
    }

    async fn get_bytes(
        &self,
        url: &str,
        query: &[(&str, String)],
        accept: &str,
    ) -> HistoryResult<Vec<u8>> {
        tracing::info!(method = "GET", url = %url, "upstream request");
        let start = Instant::now();

        let mut request = self.http.get(url).header(ACCEPT, accept);
        if !query.is_empty() {
            // fetch_text URLs arrive with their query string already
            // composed; only structured pairs go through the serializer.
            request = request.query(query);
        }
        let sent = request.send().await;
        let response = match sent {
            Ok(r) => r,
            Err(e) => {
                let err = self.classify(e);
                tracing::warn!(
                    url = %url,
                    error = %err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "upstream request failed"
                );
                return Err(err);
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => {
                let err = self.classify(e);
                tracing::warn!(url = %url, error = %err, "upstream body read failed");
                return Err(err);
            }
        };

        tracing::info!(
            status = status.as_u16(),
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "upstream response"
        );

        if !status.is_success() {
            return Err(HistoryError::Status {
                status: status.as_u16(),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl HistoryClient for HttpHistoryClient {
    async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> HistoryResult<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let body = self.get_bytes(&url, query, "application/json").await?;
        serde_json::from_slice(&body)
            .map_err(|e| HistoryError::Upstream(format!("response is not valid JSON: {e}")))
    }

    async fn fetch_text(&self, url: &str) -> HistoryResult<String> {
        let body = self.get_bytes(url, &[], "text/html").await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn logs_base_url(&self) -> &str {
        &self.logs_base
    }

    fn nodemanager_port(&self) -> u16 {
        self.nodemanager_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout_secs: u64) -> HttpHistoryClient {
        HttpHistoryClient::new(&HistoryConfig {
            base_url: server.uri(),
            nodemanager_port: 8052,
            timeout_secs,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn get_json_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"historyInfo": {"hadoopVersion": "3.3.6"}})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let data = client.get_json("info", &[]).await.unwrap();
        assert_eq!(data["historyInfo"]["hadoopVersion"], "3.3.6");
    }

    #[tokio::test]
    async fn get_json_sends_query_pairs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mapreduce/jobs"))
            .and(query_param("user", "hadoop"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobs": null})))
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let query = [("user", "hadoop".to_string()), ("limit", "20".to_string())];
        assert!(client.get_json("mapreduce/jobs", &query).await.is_ok());
    }

    #[tokio::test]
    async fn non_2xx_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mapreduce/jobs/job_1_1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let err = client.get_json("mapreduce/jobs/job_1_1", &[]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn invalid_json_maps_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let err = client.get_json("info", &[]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Upstream(_)));
    }

    #[tokio::test]
    async fn slow_upstream_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, 1);
        let err = client.get_json("info", &[]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Timeout { timeout_secs: 1 }));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_connect() {
        let client = HttpHistoryClient::new(&HistoryConfig {
            base_url: "http://127.0.0.1:1/ws/v1/history".into(),
            nodemanager_port: 8052,
            timeout_secs: 2,
        })
        .unwrap();
        let err = client.get_json("info", &[]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Connect { .. }));
    }

    #[tokio::test]
    async fn fetch_text_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobhistory/logs/node:8052/c_1/a_1/hadoop/stdout/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><pre>hi</pre></html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let url = format!(
            "{}/jobhistory/logs/node:8052/c_1/a_1/hadoop/stdout/",
            server.uri()
        );
        let text = client.fetch_text(&url).await.unwrap();
        assert_eq!(text, "<html><pre>hi</pre></html>");
    }
}
