//! Tools: container log retrieval, full and byte-range.
//!
//! The only tools composing multiple upstream calls: locate the container
//! (two dependent fetches), fetch the HTML log page, extract the text.
//! Any failure along the chain aborts the whole call with the most
//! specific error available.

use async_trait::async_trait;
use jh_protocol::{LogsInput, LogsPartialInput, ResponseFormat, parse_input};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::html::extract_preformatted;
use crate::locate::{LogRange, LogTarget, build_log_url, resolve_log_target};
use crate::tools::pretty;
use crate::types::HistoryTool;

fn empty_log_message(url: &str) -> String {
    format!("Log is empty or the content could not be parsed.\n\n**Log URL**: {url}")
}

fn metadata_rows(
    job_id: &str,
    task_id: &str,
    attempt_id: &str,
    target: &LogTarget,
    log_type: &str,
) -> Vec<String> {
    vec![
        "| Field | Value |".into(),
        "|-------|-------|".into(),
        format!("| Job ID | `{job_id}` |"),
        format!("| Task ID | `{task_id}` |"),
        format!("| Attempt ID | `{attempt_id}` |"),
        format!("| Container ID | `{}` |", target.container_id),
        format!("| Node | {} |", target.node_manager),
        format!("| User | {} |", target.user),
        format!("| Log type | {log_type} |"),
    ]
}

pub struct TaskAttemptLogs;

#[async_trait]
impl HistoryTool for TaskAttemptLogs {
    fn name(&self) -> &str {
        "jobhistory_get_task_attempt_logs"
    }

    fn description(&self) -> &str {
        "Fetch the full container log of a task attempt; prefer the partial tool for large logs"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "task_id": { "type": "string", "description": "Task id" },
                "attempt_id": {
                    "type": "string",
                    "description": "Attempt id, e.g. 'attempt_1326381300833_2_2_m_0_0'"
                },
                "log_type": {
                    "type": "string",
                    "enum": ["stdout", "stderr", "syslog", "syslog.shuffle", "prelaunch.out", "prelaunch.err", "container-localizer-syslog"],
                    "default": "stdout",
                    "description": "Which container log file to read"
                },
                "response_format": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown"
                }
            },
            "required": ["job_id", "task_id", "attempt_id"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String> {
        let input: LogsInput = parse_input(args)?;

        let target =
            resolve_log_target(client, &input.job_id, &input.task_id, &input.attempt_id).await?;
        let url = build_log_url(
            client.logs_base_url(),
            &target,
            &input.attempt_id,
            input.log_type,
            LogRange::Full,
        );
        tracing::info!(url = %url, "fetching full container log");

        let html = client.fetch_text(&url).await?;
        let content = extract_preformatted(&html);
        if content.is_empty() {
            return Ok(empty_log_message(&url));
        }

        if input.response_format == ResponseFormat::Json {
            return pretty(&json!({
                "job_id": input.job_id,
                "task_id": input.task_id,
                "attempt_id": input.attempt_id,
                "container_id": target.container_id,
                "node_manager": target.node_manager,
                "user": target.user,
                "log_type": input.log_type.url_segment(),
                "log_url": url,
                "content": content,
            }));
        }

        let mut lines = vec![
            format!("# Task attempt log: {}", input.log_type),
            String::new(),
            "## Source".into(),
        ];
        lines.extend(metadata_rows(
            &input.job_id,
            &input.task_id,
            &input.attempt_id,
            &target,
            input.log_type.url_segment(),
        ));
        lines.push(String::new());
        lines.push("## Content".into());
        lines.push("```".into());
        lines.push(content);
        lines.push("```".into());
        Ok(lines.join("\n"))
    }
}

pub struct TaskAttemptLogsPartial;

#[async_trait]
impl HistoryTool for TaskAttemptLogsPartial {
    fn name(&self) -> &str {
        "jobhistory_get_task_attempt_logs_partial"
    }

    fn description(&self) -> &str {
        "Fetch a byte range of a container log; negative start counts from the end of the file"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "task_id": { "type": "string", "description": "Task id" },
                "attempt_id": { "type": "string", "description": "Attempt id" },
                "log_type": {
                    "type": "string",
                    "enum": ["stdout", "stderr", "syslog", "syslog.shuffle", "prelaunch.out", "prelaunch.err", "container-localizer-syslog"],
                    "default": "syslog",
                    "description": "Which container log file to read"
                },
                "start": {
                    "type": "integer",
                    "default": -4096,
                    "description": "Start byte. Negative counts back from the end of the file"
                },
                "end": {
                    "type": "integer",
                    "default": 0,
                    "description": "End byte. 0 means the end of the file"
                },
                "response_format": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown"
                }
            },
            "required": ["job_id", "task_id", "attempt_id"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String> {
        let input: LogsPartialInput = parse_input(args)?;
        let range = LogRange::Range {
            start: input.start,
            end: input.end,
        };

        let target =
            resolve_log_target(client, &input.job_id, &input.task_id, &input.attempt_id).await?;
        let url = build_log_url(
            client.logs_base_url(),
            &target,
            &input.attempt_id,
            input.log_type,
            range,
        );
        tracing::info!(url = %url, "fetching partial container log");

        let html = client.fetch_text(&url).await?;
        let content = extract_preformatted(&html);
        if content.is_empty() {
            return Ok(empty_log_message(&url));
        }

        let range_desc = range.describe();

        if input.response_format == ResponseFormat::Json {
            return pretty(&json!({
                "job_id": input.job_id,
                "task_id": input.task_id,
                "attempt_id": input.attempt_id,
                "container_id": target.container_id,
                "node_manager": target.node_manager,
                "user": target.user,
                "log_type": input.log_type.url_segment(),
                "byte_range": {
                    "start": input.start,
                    "end": input.end,
                    "description": range_desc,
                },
                "log_url": url,
                "content_length": content.len(),
                "content": content,
            }));
        }

        let mut lines = vec![
            format!("# Task attempt log (partial): {}", input.log_type),
            String::new(),
            "## Source".into(),
        ];
        lines.extend(metadata_rows(
            &input.job_id,
            &input.task_id,
            &input.attempt_id,
            &target,
            input.log_type.url_segment(),
        ));
        lines.push(format!("| Range | {range_desc} |"));
        lines.push(format!("| Content length | {} bytes |", content.len()));
        lines.push(String::new());
        lines.push("## Content".into());
        lines.push("```".into());
        lines.push(content);
        lines.push("```".into());
        lines.push(String::new());
        lines.push(
            "*For the complete log use `jobhistory_get_task_attempt_logs`*".into(),
        );
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoryError;
    use crate::mock::MockHistoryClient;
    use serde_json::Value;

    fn attempt_args() -> Value {
        json!({
            "job_id": "job_1_1",
            "task_id": "task_1_1_m_0",
            "attempt_id": "attempt_1_1_m_0_0"
        })
    }

    #[tokio::test]
    async fn full_log_pipeline() {
        let client = MockHistoryClient::with_sample_attempt();
        let out = TaskAttemptLogs.execute(attempt_args(), &client).await.unwrap();
        assert!(out.contains("map output written & flushed"));
        assert!(out.contains("| User | hadoop |"));
        assert!(out.contains("node42.cluster.test:8052"));
    }

    #[tokio::test]
    async fn full_log_json_mode() {
        let client = MockHistoryClient::with_sample_attempt();
        let mut args = attempt_args();
        args["response_format"] = "json".into();
        let out = TaskAttemptLogs.execute(args, &client).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["container_id"], "container_1_1_01_000002");
        assert_eq!(parsed["content"], "map output written & flushed");
        assert!(
            parsed["log_url"]
                .as_str()
                .unwrap()
                .ends_with("?start=0&start.time=0&end.time=9223372036854775807")
        );
    }

    #[tokio::test]
    async fn partial_log_uses_verbatim_range() {
        let mut client = MockHistoryClient::with_sample_attempt();
        client.add_text(
            "http://jobhistory.test:19888/jobhistory/logs/node42.cluster.test:8052/container_1_1_01_000002/attempt_1_1_m_0_0/hadoop/syslog/?start=-4096&end=0",
            "<pre>tail of syslog</pre>",
        );
        let out = TaskAttemptLogsPartial
            .execute(attempt_args(), &client)
            .await
            .unwrap();
        assert!(out.contains("tail of syslog"));
        assert!(out.contains("| Range | last 4096 bytes |"));
    }

    #[tokio::test]
    async fn partial_log_json_carries_byte_range() {
        let mut client = MockHistoryClient::with_sample_attempt();
        client.add_text(
            "http://jobhistory.test:19888/jobhistory/logs/node42.cluster.test:8052/container_1_1_01_000002/attempt_1_1_m_0_0/hadoop/stderr/?start=0&end=2048",
            "<pre>startup banner</pre>",
        );
        let mut args = attempt_args();
        args["log_type"] = "stderr".into();
        args["start"] = 0.into();
        args["end"] = 2048.into();
        args["response_format"] = "json".into();
        let out = TaskAttemptLogsPartial.execute(args, &client).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["byte_range"]["start"], 0);
        assert_eq!(parsed["byte_range"]["end"], 2048);
        assert_eq!(parsed["byte_range"]["description"], "from byte 0 to end");
        assert_eq!(parsed["content_length"], "startup banner".len() as u64);
    }

    #[tokio::test]
    async fn empty_log_names_url() {
        let mut client = MockHistoryClient::with_sample_attempt();
        client.add_text(
            "http://jobhistory.test:19888/jobhistory/logs/node42.cluster.test:8052/container_1_1_01_000002/attempt_1_1_m_0_0/hadoop/stderr/?start=0&start.time=0&end.time=9223372036854775807",
            "<html>no pre block here</html>",
        );
        let mut args = attempt_args();
        args["log_type"] = "stderr".into();
        let out = TaskAttemptLogs.execute(args, &client).await.unwrap();
        assert!(out.contains("Log is empty"));
        assert!(out.contains("**Log URL**: http://jobhistory.test:19888/jobhistory/logs/"));
    }

    #[tokio::test]
    async fn locator_failure_aborts_whole_call() {
        // Job detail missing: the attempt resolves but the user lookup 404s.
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/attempts/attempt_1_1_m_0_0",
            json!({"taskAttempt": {
                "assignedContainerId": "container_1_1_01_000002",
                "nodeHttpAddress": "node42:8042",
            }}),
        );
        let err = TaskAttemptLogs
            .execute(attempt_args(), &client)
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::Status { status: 404 }));
    }
}
