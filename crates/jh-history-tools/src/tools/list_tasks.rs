//! Tool: list the tasks of a job, grouped by type.

use async_trait::async_trait;
use jh_protocol::{ListTasksInput, ResponseFormat, parse_input};
use serde_json::{Value, json};

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::format_duration;
use crate::tools::pretty;
use crate::types::HistoryTool;

pub struct ListTasks;

fn task_row(task: &Value) -> String {
    format!(
        "| `{}` | {} | {:.1}% | {} |",
        task["id"].as_str().unwrap_or("N/A"),
        task["state"].as_str().unwrap_or("N/A"),
        task["progress"].as_f64().unwrap_or(0.0),
        format_duration(task["elapsedTime"].as_i64().unwrap_or(0))
    )
}

#[async_trait]
impl HistoryTool for ListTasks {
    fn name(&self) -> &str {
        "jobhistory_list_tasks"
    }

    fn description(&self) -> &str {
        "List the tasks of a job, optionally only maps ('m') or reduces ('r')"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "task_type": {
                    "type": "string",
                    "enum": ["m", "r"],
                    "description": "'m' for map tasks, 'r' for reduce tasks"
                },
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
        let input: ListTasksInput = parse_input(args)?;

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(task_type) = input.task_type {
            query.push(("type", task_type.query_letter().to_string()));
        }

        let data = client
            .get_json(&format!("mapreduce/jobs/{}/tasks", input.job_id), &query)
            .await?;
        let tasks = data["tasks"]["task"].as_array().cloned().unwrap_or_default();

        if input.response_format == ResponseFormat::Json {
            return pretty(&json!({"total": tasks.len(), "tasks": tasks}));
        }

        if tasks.is_empty() {
            return Ok("No tasks found.".into());
        }

        let map_tasks: Vec<&Value> = tasks.iter().filter(|t| t["type"] == "MAP").collect();
        let reduce_tasks: Vec<&Value> = tasks.iter().filter(|t| t["type"] == "REDUCE").collect();

        let mut lines = vec![
            format!("# Tasks: {}", input.job_id),
            format!("**{}** task(s)", tasks.len()),
            String::new(),
        ];

        if !map_tasks.is_empty() {
            lines.push(format!("## Map tasks ({})", map_tasks.len()));
            lines.push(String::new());
            lines.push("| Task ID | State | Progress | Elapsed |".into());
            lines.push("|---------|-------|----------|---------|".into());
            for task in &map_tasks {
                lines.push(task_row(task));
            }
            lines.push(String::new());
        }

        if !reduce_tasks.is_empty() {
            lines.push(format!("## Reduce tasks ({})", reduce_tasks.len()));
            lines.push(String::new());
            lines.push("| Task ID | State | Progress | Elapsed |".into());
            lines.push("|---------|-------|----------|---------|".into());
            for task in &reduce_tasks {
                lines.push(task_row(task));
            }
            lines.push(String::new());
        }

        Ok(lines.join("\n"))
    }
}
