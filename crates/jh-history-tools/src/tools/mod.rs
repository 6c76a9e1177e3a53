//! Tool implementations, one callable per queryable resource.
//!
//! - server_info: history server banner
//! - list_jobs / get_job / job_conf / job_attempts: job-level queries
//! - counters: counter queries at job, task, and attempt level
//! - list_tasks / get_task: task-level queries
//! - task_attempts: attempt listing and detail
//! - fetch_logs: container log retrieval, full and byte-range

mod counters;
mod fetch_logs;
mod get_job;
mod get_task;
mod job_attempts;
mod job_conf;
mod list_jobs;
mod list_tasks;
mod server_info;
mod task_attempts;

pub use counters::{JobCounters, TaskAttemptCounters, TaskCounters};
pub use fetch_logs::{TaskAttemptLogs, TaskAttemptLogsPartial};
pub use get_job::GetJob;
pub use get_task::GetTask;
pub use job_attempts::JobAttempts;
pub use job_conf::JobConf;
pub use list_jobs::ListJobs;
pub use list_tasks::ListTasks;
pub use server_info::ServerInfo;
pub use task_attempts::{GetTaskAttempt, ListTaskAttempts};

use crate::error::{HistoryError, HistoryResult};
use crate::types::HistoryTool;

/// All 14 tools, in the order they are listed to the host.
pub fn all_tools() -> Vec<Box<dyn HistoryTool>> {
    vec![
        Box::new(ServerInfo),
        Box::new(ListJobs),
        Box::new(GetJob),
        Box::new(JobCounters),
        Box::new(JobConf),
        Box::new(JobAttempts),
        Box::new(ListTasks),
        Box::new(GetTask),
        Box::new(TaskCounters),
        Box::new(ListTaskAttempts),
        Box::new(GetTaskAttempt),
        Box::new(TaskAttemptCounters),
        Box::new(TaskAttemptLogs),
        Box::new(TaskAttemptLogsPartial),
    ]
}

/// Pretty-print a JSON payload for `response_format = "json"` output.
pub(crate) fn pretty(value: &serde_json::Value) -> HistoryResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| HistoryError::Upstream(format!("failed to serialize response: {e}")))
}
