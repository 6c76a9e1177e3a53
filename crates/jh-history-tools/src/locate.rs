//! Two-hop resolution of a task attempt's container log location.
//!
//! The history server does not serve log content itself. Finding a log
//! takes the attempt's container id and node address (attempt detail),
//! the owning user (job detail), and the configured NodeManager port;
//! the pieces are assembled into a log-viewer URL.

use jh_protocol::LogType;
use serde_json::Value;

use crate::client::HistoryClient;
use crate::error::{HistoryError, HistoryResult};

/// Everything needed to address one attempt's logs on the log viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub container_id: String,
    /// `hostname:port` of the NodeManager serving the logs.
    pub node_manager: String,
    /// User the job ran as (a path segment of the log URL).
    pub user: String,
}

/// Which slice of the log file to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRange {
    /// The whole file, from byte 0 to an effectively unbounded end.
    Full,
    /// A byte range forwarded verbatim: negative `start` counts from the
    /// end of the file, `end == 0` means to the end. No local clamping.
    Range { start: i64, end: i64 },
}

impl LogRange {
    /// Query string for the log page, including the leading `?`.
    pub fn query(&self) -> String {
        match self {
            Self::Full => "?start=0&start.time=0&end.time=9223372036854775807".into(),
            Self::Range { start, end } => format!("?start={start}&end={end}"),
        }
    }

    /// Human description of the requested slice, echoed in tool output.
    pub fn describe(&self) -> String {
        match self {
            Self::Full => "entire file".into(),
            Self::Range { start, end } => {
                if *start < 0 {
                    format!("last {} bytes", start.unsigned_abs())
                } else if *end == 0 {
                    format!("from byte {start} to end")
                } else {
                    format!("bytes {start} to {end}")
                }
            }
        }
    }
}

/// Strip the trailing `:port` from a `host:port` address.
///
/// Splits on the last colon so IPv4 addresses and dotted hostnames pass
/// through intact; an address without a colon is returned unchanged.
pub fn extract_hostname(node_http_address: &str) -> &str {
    match node_http_address.rsplit_once(':') {
        Some((host, _port)) => host,
        None => node_http_address,
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Resolve the log target for one task attempt.
///
/// Two dependent upstream fetches, strictly sequential: attempt detail
/// for container id and node address, then job detail for the owning
/// user. The first missing piece aborts with its own error so the caller
/// can say exactly which identifier to re-check.
pub async fn resolve_log_target(
    client: &dyn HistoryClient,
    job_id: &str,
    task_id: &str,
    attempt_id: &str,
) -> HistoryResult<LogTarget> {
    let attempt_data = client
        .get_json(
            &format!("mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}"),
            &[],
        )
        .await?;
    let attempt = &attempt_data["taskAttempt"];

    let container_id = non_empty_str(attempt, "assignedContainerId")
        .ok_or(HistoryError::MissingContainerId)?
        .to_string();
    let node_http_address =
        non_empty_str(attempt, "nodeHttpAddress").ok_or(HistoryError::MissingNodeAddress)?;

    let job_data = client
        .get_json(&format!("mapreduce/jobs/{job_id}"), &[])
        .await?;
    let user = non_empty_str(&job_data["job"], "user")
        .ok_or(HistoryError::MissingUser)?
        .to_string();

    let node_manager = format!(
        "{}:{}",
        extract_hostname(node_http_address),
        client.nodemanager_port()
    );

    Ok(LogTarget {
        container_id,
        node_manager,
        user,
    })
}

/// Assemble the log-viewer URL for a resolved target.
pub fn build_log_url(
    logs_base: &str,
    target: &LogTarget,
    attempt_id: &str,
    log_type: LogType,
    range: LogRange,
) -> String {
    format!(
        "{logs_base}/{}/{}/{attempt_id}/{}/{}/{}",
        target.node_manager,
        target.container_id,
        target.user,
        log_type.url_segment(),
        range.query()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHistoryClient;
    use serde_json::json;

    #[test]
    fn hostname_strips_trailing_port() {
        assert_eq!(extract_hostname("host.example.com:8042"), "host.example.com");
        assert_eq!(extract_hostname("host-no-port"), "host-no-port");
        assert_eq!(extract_hostname("10.0.0.5:8042"), "10.0.0.5");
    }

    #[test]
    fn full_range_query_is_unbounded() {
        assert_eq!(
            LogRange::Full.query(),
            "?start=0&start.time=0&end.time=9223372036854775807"
        );
    }

    #[test]
    fn byte_range_query_is_verbatim() {
        let range = LogRange::Range {
            start: -4096,
            end: 0,
        };
        assert_eq!(range.query(), "?start=-4096&end=0");
        // No clamping of odd ranges either.
        let odd = LogRange::Range { start: 500, end: 100 };
        assert_eq!(odd.query(), "?start=500&end=100");
    }

    #[test]
    fn range_descriptions() {
        assert_eq!(
            LogRange::Range { start: -4096, end: 0 }.describe(),
            "last 4096 bytes"
        );
        assert_eq!(
            LogRange::Range { start: 1024, end: 0 }.describe(),
            "from byte 1024 to end"
        );
        assert_eq!(
            LogRange::Range { start: 1024, end: 5120 }.describe(),
            "bytes 1024 to 5120"
        );
    }

    #[test]
    fn log_url_shape() {
        let target = LogTarget {
            container_id: "container_1_1_01_000002".into(),
            node_manager: "node42.cluster.test:8052".into(),
            user: "hadoop".into(),
        };
        let url = build_log_url(
            "http://jh.test:19888/jobhistory/logs",
            &target,
            "attempt_1_1_m_0_0",
            LogType::Stderr,
            LogRange::Range { start: -4096, end: 0 },
        );
        assert_eq!(
            url,
            "http://jh.test:19888/jobhistory/logs/node42.cluster.test:8052/\
             container_1_1_01_000002/attempt_1_1_m_0_0/hadoop/stderr/?start=-4096&end=0"
        );
    }

    #[tokio::test]
    async fn resolves_target_from_two_fetches() {
        let client = MockHistoryClient::with_sample_attempt();
        let target = resolve_log_target(&client, "job_1_1", "task_1_1_m_0", "attempt_1_1_m_0_0")
            .await
            .unwrap();
        assert_eq!(target.container_id, "container_1_1_01_000002");
        assert_eq!(target.node_manager, "node42.cluster.test:8052");
        assert_eq!(target.user, "hadoop");
    }

    #[tokio::test]
    async fn missing_container_id_is_specific() {
        let mut client = MockHistoryClient::with_sample_job();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/attempts/attempt_1_1_m_0_0",
            json!({"taskAttempt": {"nodeHttpAddress": "node42:8042"}}),
        );
        let err = resolve_log_target(&client, "job_1_1", "task_1_1_m_0", "attempt_1_1_m_0_0")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::MissingContainerId));
    }

    #[tokio::test]
    async fn missing_node_address_is_specific() {
        let mut client = MockHistoryClient::with_sample_job();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/attempts/attempt_1_1_m_0_0",
            json!({"taskAttempt": {"assignedContainerId": "container_1_1_01_000002"}}),
        );
        let err = resolve_log_target(&client, "job_1_1", "task_1_1_m_0", "attempt_1_1_m_0_0")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::MissingNodeAddress));
    }

    #[tokio::test]
    async fn missing_user_even_when_attempt_resolves() {
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/attempts/attempt_1_1_m_0_0",
            json!({"taskAttempt": {
                "assignedContainerId": "container_1_1_01_000002",
                "nodeHttpAddress": "node42:8042",
            }}),
        );
        client.add_json("mapreduce/jobs/job_1_1", json!({"job": {"id": "job_1_1"}}));
        let err = resolve_log_target(&client, "job_1_1", "task_1_1_m_0", "attempt_1_1_m_0_0")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::MissingUser));
    }
}
