//! Mock history client for testing — serves pre-loaded responses.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::HistoryClient;
use crate::error::{HistoryError, HistoryResult};

/// A mock `HistoryClient` serving canned JSON by endpoint and canned text
/// by absolute URL. Unregistered lookups answer 404, which mirrors what
/// the history server does for unknown resources.
pub struct MockHistoryClient {
    json: HashMap<String, Value>,
    text: HashMap<String, String>,
    logs_base: String,
    nodemanager_port: u16,
}

impl MockHistoryClient {
    pub fn new() -> Self {
        Self {
            json: HashMap::new(),
            text: HashMap::new(),
            logs_base: "http://jobhistory.test:19888/jobhistory/logs".into(),
            nodemanager_port: 8052,
        }
    }

    /// Register a JSON response for an endpoint path.
    pub fn add_json(&mut self, endpoint: impl Into<String>, body: Value) {
        self.json.insert(endpoint.into(), body);
    }

    /// Register a raw text response for an absolute URL.
    pub fn add_text(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.text.insert(url.into(), body.into());
    }

    /// One succeeded job (`job_1_1`, user `hadoop`) in the jobs listing
    /// and as job detail.
    pub fn with_sample_job() -> Self {
        let mut m = Self::new();
        let job = json!({
            "id": "job_1_1",
            "name": "word count",
            "user": "hadoop",
            "queue": "default",
            "state": "SUCCEEDED",
            "uberized": false,
            "submitTime": 1326381344449i64,
            "startTime": 1326381446529i64,
            "finishTime": 1326381356010i64,
            "mapsTotal": 4,
            "mapsCompleted": 4,
            "reducesTotal": 1,
            "reducesCompleted": 1,
            "successfulMapAttempts": 4,
            "failedMapAttempts": 0,
            "killedMapAttempts": 0,
            "successfulReduceAttempts": 1,
            "failedReduceAttempts": 0,
            "killedReduceAttempts": 0,
            "avgMapTime": 26562,
            "avgReduceTime": 61342,
            "avgShuffleTime": 2600,
            "avgMergeTime": 2700,
        });
        m.add_json("mapreduce/jobs", json!({"jobs": {"job": [job]}}));
        m.add_json("mapreduce/jobs/job_1_1", json!({"job": job}));
        m
    }

    /// Sample job plus a map task, a task attempt with container info,
    /// and a log page for the attempt's stdout.
    pub fn with_sample_attempt() -> Self {
        let mut m = Self::with_sample_job();
        m.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0",
            json!({"task": {
                "id": "task_1_1_m_0",
                "type": "MAP",
                "state": "SUCCEEDED",
                "progress": 100.0,
                "startTime": 1326381446541i64,
                "finishTime": 1326381453318i64,
                "elapsedTime": 6777,
                "successfulAttempt": "attempt_1_1_m_0_0",
            }}),
        );
        m.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/attempts/attempt_1_1_m_0_0",
            json!({"taskAttempt": {
                "id": "attempt_1_1_m_0_0",
                "type": "MAP",
                "state": "SUCCEEDED",
                "progress": 100.0,
                "assignedContainerId": "container_1_1_01_000002",
                "nodeHttpAddress": "node42.cluster.test:8042",
                "rack": "/default-rack",
                "startTime": 1326381446541i64,
                "finishTime": 1326381453318i64,
                "elapsedTime": 6777,
            }}),
        );
        m.add_text(
            "http://jobhistory.test:19888/jobhistory/logs/node42.cluster.test:8052/container_1_1_01_000002/attempt_1_1_m_0_0/hadoop/stdout/?start=0&start.time=0&end.time=9223372036854775807",
            "<html><body><pre>map output written &amp; flushed</pre></body></html>",
        );
        m
    }
}

impl Default for MockHistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryClient for MockHistoryClient {
    async fn get_json(&self, endpoint: &str, _query: &[(&str, String)]) -> HistoryResult<Value> {
        self.json
            .get(endpoint)
            .cloned()
            .ok_or(HistoryError::Status { status: 404 })
    }

    async fn fetch_text(&self, url: &str) -> HistoryResult<String> {
        self.text
            .get(url)
            .cloned()
            .ok_or(HistoryError::Status { status: 404 })
    }

    fn base_url(&self) -> &str {
        "http://jobhistory.test:19888/ws/v1/history"
    }

    fn logs_base_url(&self) -> &str {
        &self.logs_base
    }

    fn nodemanager_port(&self) -> u16 {
        self.nodemanager_port
    }
}
