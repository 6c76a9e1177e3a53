//! Tool: list finished jobs with filters and a result cap.

use async_trait::async_trait;
use jh_protocol::{ListJobsInput, ResponseFormat, parse_input, state_icon};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::format_timestamp;
use crate::tools::pretty;
use crate::types::HistoryTool;

pub struct ListJobs;

#[async_trait]
impl HistoryTool for ListJobs {
    fn name(&self) -> &str {
        "jobhistory_list_jobs"
    }

    fn description(&self) -> &str {
        "List finished MapReduce jobs, filterable by user, state, queue, and time range"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "user": { "type": "string", "description": "Filter by submitting user, e.g. 'hadoop'" },
                "state": {
                    "type": "string",
                    "enum": ["NEW", "INITED", "RUNNING", "SUCCEEDED", "FAILED", "KILL_WAIT", "KILLED", "ERROR"],
                    "description": "Filter by job state"
                },
                "queue": { "type": "string", "description": "Filter by queue name, e.g. 'default'" },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 100,
                    "default": 20,
                    "description": "Maximum number of jobs to return"
                },
                "started_time_begin": { "type": "integer", "description": "Earliest start time (ms since epoch)" },
                "started_time_end": { "type": "integer", "description": "Latest start time (ms since epoch)" },
                "finished_time_begin": { "type": "integer", "description": "Earliest finish time (ms since epoch)" },
                "finished_time_end": { "type": "integer", "description": "Latest finish time (ms since epoch)" },
                "response_format": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown",
                    "description": "'markdown' for a readable listing, 'json' for the raw payload"
                }
            }
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String> {
        let input: ListJobsInput = parse_input(args)?;

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(user) = &input.user {
            query.push(("user", user.clone()));
        }
        if let Some(state) = input.state {
            query.push(("state", state.as_str().to_string()));
        }
        if let Some(queue) = &input.queue {
            query.push(("queue", queue.clone()));
        }
        query.push(("limit", input.limit.to_string()));
        if let Some(ms) = input.started_time_begin {
            query.push(("startedTimeBegin", ms.to_string()));
        }
        if let Some(ms) = input.started_time_end {
            query.push(("startedTimeEnd", ms.to_string()));
        }
        if let Some(ms) = input.finished_time_begin {
            query.push(("finishedTimeBegin", ms.to_string()));
        }
        if let Some(ms) = input.finished_time_end {
            query.push(("finishedTimeEnd", ms.to_string()));
        }

        let data = client.get_json("mapreduce/jobs", &query).await?;
        let jobs = data["jobs"]["job"].as_array().cloned().unwrap_or_default();

        if jobs.is_empty() {
            return Ok("No jobs matched the query.".into());
        }

        if input.response_format == ResponseFormat::Json {
            return pretty(&json!({"total": jobs.len(), "jobs": jobs}));
        }

        let mut lines = vec![
            "# MapReduce jobs".to_string(),
            format!("Found **{}** job(s)", jobs.len()),
            String::new(),
        ];
        for job in &jobs {
            let state = job["state"].as_str().unwrap_or("N/A");
            lines.push(format!(
                "## {} {}",
                state_icon(state),
                job["name"].as_str().unwrap_or("N/A")
            ));
            lines.push(format!("**ID**: `{}`", job["id"].as_str().unwrap_or("N/A")));
            lines.push(String::new());
            lines.push("| Field | Value |".into());
            lines.push("|-------|-------|".into());
            lines.push(format!("| User | {} |", job["user"].as_str().unwrap_or("N/A")));
            lines.push(format!("| Queue | {} |", job["queue"].as_str().unwrap_or("N/A")));
            lines.push(format!("| State | {state} |"));
            lines.push(format!(
                "| Started | {} |",
                format_timestamp(job["startTime"].as_i64().unwrap_or(0))
            ));
            lines.push(format!(
                "| Finished | {} |",
                format_timestamp(job["finishTime"].as_i64().unwrap_or(0))
            ));
            lines.push(format!(
                "| Maps | {}/{} |",
                job["mapsCompleted"].as_i64().unwrap_or(0),
                job["mapsTotal"].as_i64().unwrap_or(0)
            ));
            lines.push(format!(
                "| Reduces | {}/{} |",
                job["reducesCompleted"].as_i64().unwrap_or(0),
                job["reducesTotal"].as_i64().unwrap_or(0)
            ));
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

    #[tokio::test]
    async fn markdown_lists_job_with_icon() {
        let client = MockHistoryClient::with_sample_job();
        let out = ListJobs.execute(json!({}), &client).await.unwrap();
        assert!(out.contains("job_1_1"));
        assert!(out.contains("✅"));
        assert!(out.contains("| User | hadoop |"));
    }

    #[tokio::test]
    async fn json_mode_wraps_with_total() {
        let client = MockHistoryClient::with_sample_job();
        let out = ListJobs
            .execute(json!({"response_format": "json"}), &client)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["total"], 1);
        assert_eq!(parsed["jobs"][0]["id"], "job_1_1");
    }

    #[tokio::test]
    async fn empty_listing_has_sentence() {
        let mut client = MockHistoryClient::new();
        client.add_json("mapreduce/jobs", json!({"jobs": null}));
        let out = ListJobs.execute(json!({}), &client).await.unwrap();
        assert_eq!(out, "No jobs matched the query.");
    }

    #[tokio::test]
    async fn invalid_limit_rejected_before_fetch() {
        // Nothing registered: a fetch would 404, but validation fires first.
        let client = MockHistoryClient::new();
        let err = ListJobs
            .execute(json!({"limit": 0}), &client)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::HistoryError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn json_string_args_accepted() {
        let client = MockHistoryClient::with_sample_job();
        let out = ListJobs
            .execute(Value::String(r#"{"limit": 5}"#.into()), &client)
            .await
            .unwrap();
        assert!(out.contains("job_1_1"));
    }
}
