//! Tool: detail for one task.

use async_trait::async_trait;
use jh_protocol::{ResponseFormat, TaskInput, parse_input, state_icon};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::{format_duration, format_timestamp};
use crate::tools::pretty;
use crate::types::HistoryTool;

pub struct GetTask;

#[async_trait]
impl HistoryTool for GetTask {
    fn name(&self) -> &str {
        "jobhistory_get_task"
    }

    fn description(&self) -> &str {
        "Get detail for one task of a job"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "task_id": {
                    "type": "string",
                    "description": "Task id, e.g. 'task_1326381300833_2_2_m_0'"
                },
                "response_format": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown"
                }
            },
            "required": ["job_id", "task_id"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String> {
        let input: TaskInput = parse_input(args)?;
        let data = client
            .get_json(
                &format!("mapreduce/jobs/{}/tasks/{}", input.job_id, input.task_id),
                &[],
            )
            .await?;
        let task = &data["task"];

        if input.response_format == ResponseFormat::Json {
            return pretty(task);
        }

        let state = task["state"].as_str().unwrap_or("N/A");
        let lines = vec![
            format!(
                "# {} Task: {}",
                state_icon(state),
                task["id"].as_str().unwrap_or("N/A")
            ),
            String::new(),
            "| Field | Value |".into(),
            "|-------|-------|".into(),
            format!("| Task ID | `{}` |", task["id"].as_str().unwrap_or("N/A")),
            format!("| Type | {} |", task["type"].as_str().unwrap_or("UNKNOWN")),
            format!("| State | {state} |"),
            format!("| Progress | {:.1}% |", task["progress"].as_f64().unwrap_or(0.0)),
            format!(
                "| Started | {} |",
                format_timestamp(task["startTime"].as_i64().unwrap_or(0))
            ),
            format!(
                "| Finished | {} |",
                format_timestamp(task["finishTime"].as_i64().unwrap_or(0))
            ),
            format!(
                "| Elapsed | {} |",
                format_duration(task["elapsedTime"].as_i64().unwrap_or(0))
            ),
            format!(
                "| Successful attempt | `{}` |",
                task["successfulAttempt"].as_str().unwrap_or("N/A")
            ),
        ];
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHistoryClient;
    use serde_json::Value;

    #[tokio::test]
    async fn markdown_detail() {
        let client = MockHistoryClient::with_sample_attempt();
        let out = GetTask
            .execute(
                json!({"job_id": "job_1_1", "task_id": "task_1_1_m_0"}),
                &client,
            )
            .await
            .unwrap();
        assert!(out.contains("`task_1_1_m_0`"));
        assert!(out.contains("| Type | MAP |"));
        assert!(out.contains("`attempt_1_1_m_0_0`"));
        assert!(out.contains("✅"));
    }

    #[tokio::test]
    async fn json_mode_is_passthrough() {
        let client = MockHistoryClient::with_sample_attempt();
        let out = GetTask
            .execute(
                json!({"job_id": "job_1_1", "task_id": "task_1_1_m_0", "response_format": "json"}),
                &client,
            )
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["id"], "task_1_1_m_0");
    }

    #[tokio::test]
    async fn absent_successful_attempt_renders_na() {
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_r_0",
            json!({"task": {"id": "task_1_1_r_0", "type": "REDUCE", "state": "RUNNING"}}),
        );
        let out = GetTask
            .execute(
                json!({"job_id": "job_1_1", "task_id": "task_1_1_r_0"}),
                &client,
            )
            .await
            .unwrap();
        assert!(out.contains("| Successful attempt | `N/A` |"));
    }
}
