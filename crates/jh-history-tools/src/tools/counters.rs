//! Tools: counter queries at job, task, and attempt level.
//!
//! The three levels differ only in the resource path, the field the
//! payload nests under, and the title; the group flattening is shared
//! with `format::format_counters`.

use async_trait::async_trait;
use jh_protocol::{AttemptInput, JobInput, ResponseFormat, TaskInput, parse_input};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::format_counters;
use crate::tools::pretty;
use crate::types::HistoryTool;

pub struct JobCounters;

#[async_trait]
impl HistoryTool for JobCounters {
    fn name(&self) -> &str {
        "jobhistory_get_job_counters"
    }

    fn description(&self) -> &str {
        "Get all counters of a job, grouped by subsystem"
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
            .get_json(&format!("mapreduce/jobs/{}/counters", input.job_id), &[])
            .await?;
        let counters = &data["jobCounters"];

        if input.response_format == ResponseFormat::Json {
            return pretty(counters);
        }
        let id = counters["id"].as_str().unwrap_or(&input.job_id);
        Ok(format_counters(counters, &format!("Job counters: {id}")))
    }
}

pub struct TaskCounters;

#[async_trait]
impl HistoryTool for TaskCounters {
    fn name(&self) -> &str {
        "jobhistory_get_task_counters"
    }

    fn description(&self) -> &str {
        "Get all counters of one task"
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
                    "mapreduce/jobs/{}/tasks/{}/counters",
                    input.job_id, input.task_id
                ),
                &[],
            )
            .await?;
        let counters = &data["jobTaskCounters"];

        if input.response_format == ResponseFormat::Json {
            return pretty(counters);
        }
        let id = counters["id"].as_str().unwrap_or(&input.task_id);
        Ok(format_counters(counters, &format!("Task counters: {id}")))
    }
}

pub struct TaskAttemptCounters;

#[async_trait]
impl HistoryTool for TaskAttemptCounters {
    fn name(&self) -> &str {
        "jobhistory_get_task_attempt_counters"
    }

    fn description(&self) -> &str {
        "Get all counters of one task attempt"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "task_id": { "type": "string", "description": "Task id" },
                "attempt_id": { "type": "string", "description": "Attempt id" },
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
                    "mapreduce/jobs/{}/tasks/{}/attempts/{}/counters",
                    input.job_id, input.task_id, input.attempt_id
                ),
                &[],
            )
            .await?;
        let counters = &data["jobTaskAttemptCounters"];

        if input.response_format == ResponseFormat::Json {
            return pretty(counters);
        }
        let id = counters["id"].as_str().unwrap_or(&input.attempt_id);
        Ok(format_counters(
            counters,
            &format!("Task attempt counters: {id}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHistoryClient;
    use serde_json::Value;

    fn sample_counters(field: &str, group_key: &str) -> Value {
        json!({field: {
            "id": "some_id",
            group_key: [{
                "counterGroupName": "org.apache.hadoop.mapreduce.TaskCounter",
                "counter": [{
                    "name": "MAP_INPUT_RECORDS",
                    "totalCounterValue": 100000,
                    "mapCounterValue": 100000,
                    "reduceCounterValue": 0,
                }],
            }],
        }})
    }

    #[tokio::test]
    async fn job_counters_markdown() {
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/counters",
            sample_counters("jobCounters", "counterGroup"),
        );
        let out = JobCounters
            .execute(json!({"job_id": "job_1_1"}), &client)
            .await
            .unwrap();
        assert!(out.contains("# Job counters: some_id"));
        assert!(out.contains("## TaskCounter"));
        assert!(out.contains("100,000"));
    }

    #[tokio::test]
    async fn task_counters_use_task_group_key() {
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/counters",
            sample_counters("jobTaskCounters", "taskCounterGroup"),
        );
        let out = TaskCounters
            .execute(
                json!({"job_id": "job_1_1", "task_id": "task_1_1_m_0"}),
                &client,
            )
            .await
            .unwrap();
        assert!(out.contains("## TaskCounter"));
    }

    #[tokio::test]
    async fn attempt_counters_json_passthrough() {
        let mut client = MockHistoryClient::new();
        client.add_json(
            "mapreduce/jobs/job_1_1/tasks/task_1_1_m_0/attempts/attempt_1_1_m_0_0/counters",
            sample_counters("jobTaskAttemptCounters", "taskAttemptCounterGroup"),
        );
        let out = TaskAttemptCounters
            .execute(
                json!({
                    "job_id": "job_1_1",
                    "task_id": "task_1_1_m_0",
                    "attempt_id": "attempt_1_1_m_0_0",
                    "response_format": "json"
                }),
                &client,
            )
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["id"], "some_id");
    }

    #[tokio::test]
    async fn title_falls_back_to_input_id() {
        let mut client = MockHistoryClient::new();
        client.add_json("mapreduce/jobs/job_1_1/counters", json!({"jobCounters": {}}));
        let out = JobCounters
            .execute(json!({"job_id": "job_1_1"}), &client)
            .await
            .unwrap();
        assert!(out.contains("# Job counters: job_1_1"));
    }
}
