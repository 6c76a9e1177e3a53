//! Tool: job configuration, optionally filtered, grouped by key prefix.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jh_protocol::{JobConfInput, ResponseFormat, parse_input};
use serde_json::{Value, json};

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::tools::pretty;
use crate::types::HistoryTool;

/// Values longer than this are cut in the markdown rendering; job configs
/// routinely carry multi-kilobyte classpath entries.
const MAX_VALUE_LEN: usize = 100;

pub struct JobConf;

#[async_trait]
impl HistoryTool for JobConf {
    fn name(&self) -> &str {
        "jobhistory_get_job_conf"
    }

    fn description(&self) -> &str {
        "Get the configuration a job ran with, filterable by key substring"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": { "type": "string", "description": "Job id" },
                "filter_key": {
                    "type": "string",
                    "description": "Case-insensitive substring filter on property names, e.g. 'mapreduce'"
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
        let input: JobConfInput = parse_input(args)?;
        let data = client
            .get_json(&format!("mapreduce/jobs/{}/conf", input.job_id), &[])
            .await?;
        let conf = &data["conf"];

        if input.response_format == ResponseFormat::Json {
            return pretty(conf);
        }

        let path = conf["path"].as_str().unwrap_or("N/A");
        let mut properties: Vec<&Value> = conf["property"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .collect();

        if let Some(filter) = input.filter_key.as_deref().filter(|f| !f.is_empty()) {
            let needle = filter.to_lowercase();
            properties.retain(|p| {
                p["name"]
                    .as_str()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            });
        }

        let mut lines = vec![
            format!("# Job configuration: {}", input.job_id),
            format!("**Config file**: `{path}`"),
            String::new(),
            match input.filter_key.as_deref().filter(|f| !f.is_empty()) {
                Some(filter) => format!(
                    "**{}** propert(ies) (filter: '{filter}')",
                    properties.len()
                ),
                None => format!("**{}** propert(ies)", properties.len()),
            },
            String::new(),
        ];

        // Group by the leading dotted segment of the property name.
        let mut groups: BTreeMap<&str, Vec<&Value>> = BTreeMap::new();
        for prop in &properties {
            let name = prop["name"].as_str().unwrap_or("");
            let prefix = match name.split_once('.') {
                Some((head, _)) => head,
                None => "other",
            };
            groups.entry(prefix).or_default().push(*prop);
        }

        for (prefix, props) in &groups {
            lines.push(format!("## {prefix} ({} entries)", props.len()));
            lines.push(String::new());
            for prop in props {
                let name = prop["name"].as_str().unwrap_or("N/A");
                let mut value = prop["value"].as_str().unwrap_or("N/A").to_string();
                if value.len() > MAX_VALUE_LEN {
                    let cut = value
                        .char_indices()
                        .nth(MAX_VALUE_LEN)
                        .map(|(i, _)| i)
                        .unwrap_or(value.len());
                    value.truncate(cut);
                    value.push_str("...");
                }
                lines.push(format!("- `{name}` = `{value}`"));
            }
            lines.push(String::new());
        }

        Ok(lines.join("\n"))
    }
}
