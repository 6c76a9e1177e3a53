//! Tool: history server banner (health-check style).

use async_trait::async_trait;
use serde_json::json;

use crate::client::HistoryClient;
use crate::error::HistoryResult;
use crate::format::format_timestamp;
use crate::types::HistoryTool;

/// Reports the history server's start time, Hadoop version, and build
/// info. Doubles as a connectivity check.
pub struct ServerInfo;

#[async_trait]
impl HistoryTool for ServerInfo {
    fn name(&self) -> &str {
        "jobhistory_get_info"
    }

    fn description(&self) -> &str {
        "Get the JobHistory Server banner: start time, Hadoop version, build info"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _args: serde_json::Value,
        client: &dyn HistoryClient,
    ) -> HistoryResult<String> {
        let data = client.get_json("info", &[]).await?;
        let info = &data["historyInfo"];

        let text = format!(
            "# JobHistory Server\n\
             \n\
             ## Status\n\
             - **Started**: {}\n\
             - **State**: up\n\
             \n\
             ## Hadoop\n\
             - **Version**: {}\n\
             - **Build**: {}\n\
             - **Built on**: {}\n\
             \n\
             ## Connection\n\
             - **Address**: {}\n",
            format_timestamp(info["startedOn"].as_i64().unwrap_or(0)),
            info["hadoopVersion"].as_str().unwrap_or("N/A"),
            info["hadoopBuildVersion"].as_str().unwrap_or("N/A"),
            info["hadoopVersionBuiltOn"].as_str().unwrap_or("N/A"),
            client.base_url(),
        );
        Ok(text)
    }
}
