//! Tools: attempt listing and attempt detail for one task.

use async_trait::async_trait;
use jh_protocol::{AttemptInput, ResponseFormat, TaskInput, parse_input, state_icon};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::{format_duration, format_timestamp};
use crate::tools::pretty;
use crate::types::HistoryTool;

pub struct ListTaskAttempts;

#[async_trait]
impl HistoryTool for ListTaskAttempts {
    fn name(&self) -> &str {
        "jobhistory_list_task_attempts"
    }

    fn description(&self) -> &str {
        "List the attempts of one task (failed tasks are retried, each retry is an attempt)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "task_id": { "type": "string", "description": "Task id" },
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
                &format!(
                    "mapreduce/jobs/{}/tasks/{}/attempts",
                    input.job_id, input.task_id
                ),
                &[],
            )
            .await?;
        let attempts = data["taskAttempts"]["taskAttempt"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        if input.response_format == ResponseFormat::Json {
            return pretty(&json!({"total": attempts.len(), "attempts": attempts}));
        }

        if attempts.is_empty() {
            return Ok("No task attempts recorded.".into());
        }

        let mut lines = vec![
            "# Task attempts".to_string(),
            format!("**Task ID**: `{}`", input.task_id),
            format!("**{}** attempt(s)", attempts.len()),
            String::new(),
        ];
        for attempt in &attempts {
            let state = attempt["state"].as_str().unwrap_or("N/A");
            lines.push(format!(
                "## {} {}",
                state_icon(state),
                attempt["id"].as_str().unwrap_or("N/A")
            ));
            lines.push(String::new());
            lines.push("| Field | Value |".into());
            lines.push("|-------|-------|".into());
            lines.push(format!("| State | {state} |"));
            lines.push(format!(
                "| Type | {} |",
                attempt["type"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Progress | {:.1}% |",
                attempt["progress"].as_f64().unwrap_or(0.0)
            ));
            lines.push(format!(
                "| Container ID | `{}` |",
                attempt["assignedContainerId"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Node | {} |",
                attempt["nodeHttpAddress"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Rack | {} |",
                attempt["rack"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!(
                "| Started | {} |",
                format_timestamp(attempt["startTime"].as_i64().unwrap_or(0))
            ));
            lines.push(format!(
                "| Finished | {} |",
                format_timestamp(attempt["finishTime"].as_i64().unwrap_or(0))
            ));
            lines.push(format!(
                "| Elapsed | {} |",
                format_duration(attempt["elapsedTime"].as_i64().unwrap_or(0))
            ));
            if let Some(diagnostics) = attempt["diagnostics"].as_str().filter(|d| !d.is_empty()) {
                lines.push(format!("| Diagnostics | {diagnostics} |"));
            }
            lines.push(String::new());
        }
        Ok(lines.join("\n"))
    }
}

pub struct GetTaskAttempt;

#[async_trait]
impl HistoryTool for GetTaskAttempt {
    fn name(&self) -> &str {
        "jobhistory_get_task_attempt"
    }

    fn description(&self) -> &str {
        "Get detail for one task attempt; reduce attempts include shuffle and merge phases"
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
        let input: AttemptInput = parse_input(args)?;
        let data = client
            .get_json(
                &format!(
                    "mapreduce/jobs/{}/tasks/{}/attempts/{}",
                    input.job_id, input.task_id, input.attempt_id
                ),
                &[],
            )
            .await?;
        let attempt = &data["taskAttempt"];

        if input.response_format == ResponseFormat::Json {
            return pretty(attempt);
        }

        let state = attempt["state"].as_str().unwrap_or("N/A");
        let int = |key: &str| attempt[key].as_i64().unwrap_or(0);

        let mut lines = vec![
            format!("# {} Task attempt", state_icon(state)),
            format!("**Attempt ID**: `{}`", attempt["id"].as_str().unwrap_or("N/A")),
            String::new(),
            "## Overview".into(),
            "| Field | Value |".into(),
            "|-------|-------|".into(),
            format!("| State | {state} |"),
            format!("| Type | {} |", attempt["type"].as_str().unwrap_or("N/A")),
            format!(
                "| Progress | {:.1}% |",
                attempt["progress"].as_f64().unwrap_or(0.0)
            ),
            String::new(),
            "## Placement".into(),
            "| Field | Value |".into(),
            "|-------|-------|".into(),
            format!(
                "| Container ID | `{}` |",
                attempt["assignedContainerId"].as_str().unwrap_or("N/A")
            ),
            format!(
                "| Node | {} |",
                attempt["nodeHttpAddress"].as_str().unwrap_or("N/A")
            ),
            format!("| Rack | {} |", attempt["rack"].as_str().unwrap_or("N/A")),
            String::new(),
            "## Times".into(),
            "| Phase | Time |".into(),
            "|-------|------|".into(),
            format!("| Started | {} |", format_timestamp(int("startTime"))),
            format!("| Finished | {} |", format_timestamp(int("finishTime"))),
            format!("| Elapsed | {} |", format_duration(int("elapsedTime"))),
        ];

        // Shuffle and merge phases exist only for reduce attempts.
        if attempt["type"] == "REDUCE" {
            lines.push(format!(
                "| Shuffle finished | {} |",
                format_timestamp(int("shuffleFinishTime"))
            ));
            lines.push(format!(
                "| Merge finished | {} |",
                format_timestamp(int("mergeFinishTime"))
            ));
            lines.push(format!(
                "| Shuffle elapsed | {} |",
                format_duration(int("elapsedShuffleTime"))
            ));
            lines.push(format!(
                "| Merge elapsed | {} |",
                format_duration(int("elapsedMergeTime"))
            ));
            lines.push(format!(
                "| Reduce elapsed | {} |",
                format_duration(int("elapsedReduceTime"))
            ));
        }

        if let Some(diagnostics) = attempt["diagnostics"].as_str().filter(|d| !d.is_empty()) {
            lines.push(String::new());
            lines.push("## Diagnostics".into());
            lines.push("```".into());
            lines.push(diagnostics.to_string());
            lines.push("```".into());
        }

        Ok(lines.join("\n"))
    }
}
