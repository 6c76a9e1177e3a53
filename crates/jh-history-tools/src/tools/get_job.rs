//! Tool: full detail for one job.

use async_trait::async_trait;
use jh_protocol::{JobInput, ResponseFormat, parse_input, state_icon};
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::{format_duration, format_timestamp};
use crate::tools::pretty;
use crate::types::HistoryTool;

pub struct GetJob;

#[async_trait]
impl HistoryTool for GetJob {
    fn name(&self) -> &str {
        "jobhistory_get_job"
    }

    fn description(&self) -> &str {
        "Get full detail for one MapReduce job: metadata, task stats, phase averages, diagnostics, ACLs"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": {
                    "type": "string",
                    "description": "Job id, e.g. 'job_1326381300833_2_2'"
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
        let input: JobInput = parse_input(args)?;

        let data = client
            .get_json(&format!("mapreduce/jobs/{}", input.job_id), &[])
            .await?;
        let job = &data["job"];

        if input.response_format == ResponseFormat::Json {
            return pretty(job);
        }

        let state = job["state"].as_str().unwrap_or("N/A");
        let int = |key: &str| job[key].as_i64().unwrap_or(0);

        let mut lines = vec![
            format!(
                "# {} Job: {}",
                state_icon(state),
                job["name"].as_str().unwrap_or("N/A")
            ),
            String::new(),
            "## Overview".into(),
            "| Field | Value |".into(),
            "|-------|-------|".into(),
            format!("| Job ID | `{}` |", job["id"].as_str().unwrap_or("N/A")),
            format!("| Name | {} |", job["name"].as_str().unwrap_or("N/A")),
            format!("| User | {} |", job["user"].as_str().unwrap_or("N/A")),
            format!("| Queue | {} |", job["queue"].as_str().unwrap_or("N/A")),
            format!("| State | {state} |"),
            format!(
                "| Uber mode | {} |",
                if job["uberized"].as_bool().unwrap_or(false) { "yes" } else { "no" }
            ),
            String::new(),
            "## Times".into(),
            "| Phase | Time |".into(),
            "|-------|------|".into(),
            format!("| Submitted | {} |", format_timestamp(int("submitTime"))),
            format!("| Started | {} |", format_timestamp(int("startTime"))),
            format!("| Finished | {} |", format_timestamp(int("finishTime"))),
            String::new(),
            "## Tasks".into(),
            "| Type | Completed/Total | Successful | Failed | Killed |".into(),
            "|------|-----------------|------------|--------|--------|".into(),
            format!(
                "| Map | {}/{} | {} | {} | {} |",
                int("mapsCompleted"),
                int("mapsTotal"),
                int("successfulMapAttempts"),
                int("failedMapAttempts"),
                int("killedMapAttempts")
            ),
            format!(
                "| Reduce | {}/{} | {} | {} | {} |",
                int("reducesCompleted"),
                int("reducesTotal"),
                int("successfulReduceAttempts"),
                int("failedReduceAttempts"),
                int("killedReduceAttempts")
            ),
            String::new(),
            "## Phase averages".into(),
            "| Phase | Duration |".into(),
            "|-------|----------|".into(),
            format!("| Map | {} |", format_duration(int("avgMapTime"))),
            format!("| Reduce | {} |", format_duration(int("avgReduceTime"))),
            format!("| Shuffle | {} |", format_duration(int("avgShuffleTime"))),
            format!("| Merge | {} |", format_duration(int("avgMergeTime"))),
        ];

        if let Some(diagnostics) = job["diagnostics"].as_str().filter(|d| !d.is_empty()) {
            lines.push(String::new());
            lines.push("## Diagnostics".into());
            lines.push("```".into());
            lines.push(diagnostics.to_string());
            lines.push("```".into());
        }

        if let Some(acls) = job["acls"].as_array().filter(|a| !a.is_empty()) {
            lines.push(String::new());
            lines.push("## Access control".into());
            lines.push("| ACL | Value |".into());
            lines.push("|-----|-------|".into());
            for acl in acls {
                lines.push(format!(
                    "| {} | {} |",
                    acl["name"].as_str().unwrap_or("N/A"),
                    acl["value"].as_str().unwrap_or("N/A")
                ));
            }
        }

        Ok(lines.join("\n"))
    }
}
