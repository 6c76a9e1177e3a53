//! Shared helpers for the end-to-end suites.

use jh_history_tools::{HistoryConfig, HttpHistoryClient};
use wiremock::MockServer;

/// Build an HTTP client pointed at a wiremock history server.
pub fn client_for(server: &MockServer) -> HttpHistoryClient {
    HttpHistoryClient::new(&HistoryConfig {
        base_url: server.uri(),
        nodemanager_port: 8052,
        timeout_secs: 5,
    })
    .unwrap()
}

/// The job detail payload used across suites.
pub fn sample_job() -> serde_json::Value {
    serde_json::json!({
        "id": "job_1_1",
        "name": "word count",
        "user": "hadoop",
        "queue": "default",
        "state": "SUCCEEDED",
        "startTime": 1326381446529i64,
        "finishTime": 1326381356010i64,
        "mapsTotal": 4,
        "mapsCompleted": 4,
        "reducesTotal": 1,
        "reducesCompleted": 1,
    })
}
