//! Tool: ApplicationMaster attempts of a job.

use async_trait::async_trait;
use jh_protocol::{JobInput, ResponseFormat, parse_input};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::format_timestamp;
use crate::tools::pretty;
use crate::types::HistoryTool;

/// Lists the AM attempts of a job. YARN restarts the AM after a failure,
/// so a troubled job accumulates several.
pub struct JobAttempts;

#[async_trait]
impl HistoryTool for JobAttempts {
    fn name(&self) -> &str {
        "jobhistory_get_job_attempts"
    }

    fn description(&self) -> &str {
        "List the ApplicationMaster attempts of a job"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "response_format": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown"
                }
            },
            "required": ["job_id"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String> {
        let input: JobInput = parse_input(args)?;
        let data = client
            .get_json(&format!("mapreduce/jobs/{}/jobattempts", input.job_id), &[])
            .await?;
        let attempts = data["jobAttempts"]["jobAttempt"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        if input.response_format == ResponseFormat::Json {
            return pretty(&json!({"total": attempts.len(), "attempts": attempts}));
        }

        if attempts.is_empty() {
            return Ok("No job attempts recorded.".into());
        }

        let mut lines = vec![
            format!("# Job attempts: {}", input.job_id),
            format!("**{}** attempt(s)", attempts.len()),
            String::new(),
        ];
        for attempt in &attempts {
            lines.push(format!(
                "## Attempt #{}",
                attempt["id"].as_i64().map(|n| n.to_string()).unwrap_or_else(
                    || attempt["id"].as_str().unwrap_or("N/A").to_string()
                )
            ));
            lines.push(String::new());
            lines.push("| Field | Value |".into());
            lines.push("|-------|-------|".into());
            lines.push(format!(
                "| Container ID | `{}` |",
                attempt["containerId"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Node ID | {} |",
                attempt["nodeId"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Node HTTP address | {} |",
                attempt["nodeHttpAddress"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Started | {} |",
                format_timestamp(attempt["startTime"].as_i64().unwrap_or(0))
            ));
            if let Some(link) = attempt["logsLink"].as_str().filter(|l| !l.is_empty()) {
                lines.push(format!("| Logs | [view logs]({link}) |"));
            }
            lines.push(String::new());
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHistoryClient;
    use serde_json::Value;

    fn client_with_attempts() -> MockHistoryClient {
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/jobattempts",
            json!({"jobAttempts": {"jobAttempt": [{
                "id": 1,
                "containerId": "container_1_1_01_000001",
                "nodeId": "node42:45454",
                "nodeHttpAddress": "node42:8042",
                "startTime": 1326381444449i64,
                "logsLink": "http://node42:8042/node/containerlogs/container_1_1_01_000001/hadoop",
            }]}}),
        );
        client
    }

    #[tokio::test]
    async fn renders_attempt_with_logs_link() {
        let client = client_with_attempts();
        let out = JobAttempts
            .execute(json!({"job_id": "job_1_1"}), &client)
            .await
            .unwrap();
        assert!(out.contains("## Attempt #1"));
        assert!(out.contains("`container_1_1_01_000001`"));
        assert!(out.contains("[view logs]("));
    }

    #[tokio::test]
    async fn json_mode_wraps_with_total() {
        let client = client_with_attempts();
        let out = JobAttempts
            .execute(json!({"job_id": "job_1_1", "response_format": "json"}), &client)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["total"], 1);
    }

    #[tokio::test]
    async fn empty_attempts_sentence() {
        let mut client = MockHistoryClient::new();
        client.add_json("mapreduce/jobs/job_1_1/jobattempts", json!({"jobAttempts": {}}));
        let out = JobAttempts
            .execute(json!({"job_id": "job_1_1"}), &client)
            .await
            .unwrap();
        assert_eq!(out, "No job attempts recorded.");
    }
}
