//! Typed tool inputs with validation and the JSON-string alternate encoding.
//!
//! Some hosts double-serialize tool arguments: the whole parameter object
//! arrives as one JSON-encoded string instead of a structured value.
//! [`parse_input`] accepts both encodings identically, then normalizes and
//! validates before anything touches the network.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::states::{JobState, LogType, ResponseFormat, TaskType};

/// A schema or range violation in a tool's parameters.
///
/// Raised before any upstream call; the transport reports it as a rejected
/// call rather than a diagnostic payload.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InputError(pub String);

/// Per-input normalization and validation hooks.
pub trait ValidateInput {
    /// In-place cleanup (identifier trimming) before validation.
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), InputError> {
        Ok(())
    }
}

/// Decode tool arguments into a typed input.
///
/// A `Value::String` argument is first parsed as JSON; if it is not valid
/// JSON it is kept as-is and fails the subsequent structural decode, which
/// produces the same class of error a malformed object would.
pub fn parse_input<T>(args: Value) -> Result<T, InputError>
where
    T: DeserializeOwned + ValidateInput,
{
    let value = match args {
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(raw),
        },
        other => other,
    };
    let mut input: T =
        serde_json::from_value(value).map_err(|e| InputError(format!("invalid parameters: {e}")))?;
    input.normalize();
    input.validate()?;
    Ok(input)
}

const MAX_ID_LEN: usize = 100;

fn check_id(field: &str, value: &str) -> Result<(), InputError> {
    if value.is_empty() {
        return Err(InputError(format!("{field} must not be empty")));
    }
    if value.len() > MAX_ID_LEN {
        return Err(InputError(format!(
            "{field} exceeds {MAX_ID_LEN} characters"
        )));
    }
    Ok(())
}

fn check_time(field: &str, value: Option<i64>) -> Result<(), InputError> {
    match value {
        Some(ms) if ms < 0 => Err(InputError(format!(
            "{field} must be a non-negative millisecond timestamp"
        ))),
        _ => Ok(()),
    }
}

fn trim(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

// ── Job-level inputs ──────────────────────────────────────────

/// Parameters for `jobhistory_list_jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListJobsInput {
    pub user: Option<String>,
    pub state: Option<JobState>,
    pub queue: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub started_time_begin: Option<i64>,
    pub started_time_end: Option<i64>,
    pub finished_time_begin: Option<i64>,
    pub finished_time_end: Option<i64>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_limit() -> u32 {
    20
}

impl ValidateInput for ListJobsInput {
    fn normalize(&mut self) {
        if let Some(user) = &mut self.user {
            trim(user);
        }
        if let Some(queue) = &mut self.queue {
            trim(queue);
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        if !(1..=100).contains(&self.limit) {
            return Err(InputError("limit must be between 1 and 100".into()));
        }
        check_time("started_time_begin", self.started_time_begin)?;
        check_time("started_time_end", self.started_time_end)?;
        check_time("finished_time_begin", self.finished_time_begin)?;
        check_time("finished_time_end", self.finished_time_end)?;
        Ok(())
    }
}

/// Parameters for `jobhistory_get_job`, `jobhistory_get_job_counters`,
/// and `jobhistory_get_job_attempts`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    pub job_id: String,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ValidateInput for JobInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)
    }
}

/// Parameters for `jobhistory_get_job_conf`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfInput {
    pub job_id: String,
    pub filter_key: Option<String>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ValidateInput for JobConfInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
        if let Some(filter) = &mut self.filter_key {
            trim(filter);
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)
    }
}

// ── Task-level inputs ─────────────────────────────────────────

/// Parameters for `jobhistory_list_tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListTasksInput {
    pub job_id: String,
    pub task_type: Option<TaskType>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ValidateInput for ListTasksInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)
    }
}

/// Parameters for `jobhistory_get_task`, `jobhistory_get_task_counters`,
/// and `jobhistory_list_task_attempts`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub job_id: String,
    pub task_id: String,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ValidateInput for TaskInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
        trim(&mut self.task_id);
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)?;
        check_id("task_id", &self.task_id)
    }
}

// ── Attempt-level inputs ──────────────────────────────────────

/// Parameters for `jobhistory_get_task_attempt` and
/// `jobhistory_get_task_attempt_counters`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptInput {
    pub job_id: String,
    pub task_id: String,
    pub attempt_id: String,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ValidateInput for AttemptInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
        trim(&mut self.task_id);
        trim(&mut self.attempt_id);
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)?;
        check_id("task_id", &self.task_id)?;
        check_id("attempt_id", &self.attempt_id)
    }
}

/// Parameters for `jobhistory_get_task_attempt_logs` (full content).
#[derive(Debug, Clone, Deserialize)]
pub struct LogsInput {
    pub job_id: String,
    pub task_id: String,
    pub attempt_id: String,
    #[serde(default = "default_full_log_type")]
    pub log_type: LogType,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_full_log_type() -> LogType {
    LogType::Stdout
}

impl ValidateInput for LogsInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
        trim(&mut self.task_id);
        trim(&mut self.attempt_id);
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)?;
        check_id("task_id", &self.task_id)?;
        check_id("attempt_id", &self.attempt_id)
    }
}

/// Parameters for `jobhistory_get_task_attempt_logs_partial`.
///
/// `start`/`end` are forwarded to the log server verbatim: a negative
/// `start` reads from the end of the file, `end == 0` reads to the end.
/// No local clamping.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsPartialInput {
    pub job_id: String,
    pub task_id: String,
    pub attempt_id: String,
    #[serde(default = "default_partial_log_type")]
    pub log_type: LogType,
    #[serde(default = "default_partial_start")]
    pub start: i64,
    #[serde(default)]
    pub end: i64,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_partial_log_type() -> LogType {
    LogType::Syslog
}

fn default_partial_start() -> i64 {
    -4096
}

impl ValidateInput for LogsPartialInput {
    fn normalize(&mut self) {
        trim(&mut self.job_id);
        trim(&mut self.task_id);
        trim(&mut self.attempt_id);
    }

    fn validate(&self) -> Result<(), InputError> {
        check_id("job_id", &self.job_id)?;
        check_id("task_id", &self.task_id)?;
        check_id("attempt_id", &self.attempt_id)
    }
}
