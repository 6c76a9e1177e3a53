//! The single invocation boundary around every tool call.
//!
//! Binds a short request id to a span, logs call and outcome with timing,
//! and converts upstream failures into their user-facing diagnostic. The
//! host always receives a successful call carrying either the data or the
//! diagnostic; only input violations and unknown tool names surface as
//! rejected calls.

use std::time::Instant;

use jh_history_tools::{HistoryClient, HistoryError};
use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;

use crate::registry::ToolRegistry;

/// A call the transport should report as a protocol-level error instead
/// of a tool result.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// How many characters of the argument preview make it into the log.
const PARAMS_PREVIEW_LEN: usize = 500;

fn preview(args: &Value) -> String {
    let mut rendered = serde_json::to_string(args).unwrap_or_else(|_| "<unserializable>".into());
    if rendered.len() > PARAMS_PREVIEW_LEN {
        let cut = rendered
            .char_indices()
            .nth(PARAMS_PREVIEW_LEN)
            .map(|(i, _)| i)
            .unwrap_or(rendered.len());
        rendered.truncate(cut);
        rendered.push_str("...");
    }
    rendered
}

/// Execute one tool call end to end.
pub async fn dispatch(
    registry: &ToolRegistry,
    client: &dyn HistoryClient,
    tool_name: &str,
    args: Value,
) -> Result<String, DispatchError> {
    let request_id = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
    let span = tracing::info_span!("tool_call", request_id = %request_id, tool = tool_name);

    async move {
        let Some(tool) = registry.get(tool_name) else {
            tracing::warn!("unknown tool requested");
            return Err(DispatchError::UnknownTool(tool_name.to_string()));
        };

        tracing::info!(params = %preview(&args), "tool call");
        let start = Instant::now();

        match tool.execute(args, client).await {
            Ok(text) => {
                tracing::info!(
                    bytes = text.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool response"
                );
                Ok(text)
            }
            Err(HistoryError::InvalidInput(message)) => {
                tracing::warn!(error = %message, "input rejected");
                Err(DispatchError::InvalidInput(message))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool error"
                );
                Ok(err.user_message())
            }
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jh_history_tools::MockHistoryClient;
    use serde_json::json;

    #[tokio::test]
    async fn dispatch_returns_tool_output() {
        let registry = ToolRegistry::with_defaults();
        let client = MockHistoryClient::with_sample_job();
        let out = dispatch(&registry, &client, "jobhistory_list_jobs", json!({}))
            .await
            .unwrap();
        assert!(out.contains("job_1_1"));
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let registry = ToolRegistry::with_defaults();
        let client = MockHistoryClient::new();
        let err = dispatch(&registry, &client, "do_magic", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_not_described() {
        let registry = ToolRegistry::with_defaults();
        let client = MockHistoryClient::with_sample_job();
        let err = dispatch(
            &registry,
            &client,
            "jobhistory_get_job",
            json!({"job_id": ""}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn upstream_failure_becomes_diagnostic_payload() {
        let registry = ToolRegistry::with_defaults();
        // Nothing registered: every fetch 404s.
        let client = MockHistoryClient::new();
        let out = dispatch(
            &registry,
            &client,
            "jobhistory_get_job",
            json!({"job_id": "job_9_9"}),
        )
        .await
        .unwrap();
        assert!(out.contains("not found"));
    }

    #[tokio::test]
    async fn preview_truncates_large_args() {
        let args = json!({"job_id": "x".repeat(2000)});
        let rendered = preview(&args);
        assert!(rendered.len() <= PARAMS_PREVIEW_LEN + 3);
        assert!(rendered.ends_with("..."));
    }
}
