//! The HistoryTool trait every query tool implements.

use async_trait::async_trait;

use crate::client::HistoryClient;
use crate::error::HistoryResult;

/// A callable query against the history server.
///
/// Tools are pure request/response translators: decode and validate the
/// arguments, issue the upstream fetches through the client seam, render
/// a single string. Input violations and upstream failures surface as
/// `HistoryError`; the dispatch boundary decides how each is reported.
#[async_trait]
pub trait HistoryTool: Send + Sync {
    /// Tool name (e.g., "jobhistory_list_jobs").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments against a history client.
    async fn execute(
        &self,
        args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String>;
}
