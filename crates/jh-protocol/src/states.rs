//! Closed enums for the string-literal vocabularies of the JobHistory API.

use serde::{Deserialize, Serialize};

// ── Response format ───────────────────────────────────────────

/// How a tool renders its result string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable markdown (tables, headings). The default.
    #[default]
    Markdown,
    /// Machine-readable JSON passthrough of the upstream payload.
    Json,
}

// ── Job state ─────────────────────────────────────────────────

/// Lifecycle state of a MapReduce job as reported by the history server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    New,
    Inited,
    Running,
    Succeeded,
    Failed,
    KillWait,
    Killed,
    Error,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Inited => "INITED",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::KillWait => "KILL_WAIT",
            Self::Killed => "KILLED",
            Self::Error => "ERROR",
        }
    }

    /// Icon used in markdown renderings.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Succeeded => "✅",
            Self::Failed => "❌",
            Self::Killed => "⚠️",
            Self::Running => "🔄",
            Self::New | Self::Inited | Self::KillWait | Self::Error => "❓",
        }
    }
}

impl std::str::FromStr for JobState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NEW" => Self::New,
            "INITED" => Self::Inited,
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "KILL_WAIT" => Self::KillWait,
            "KILLED" => Self::Killed,
            "ERROR" => Self::Error,
            _ => return Err(()),
        })
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Task state ────────────────────────────────────────────────

/// Lifecycle state of a task within a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    New,
    Scheduled,
    Running,
    Succeeded,
    Failed,
    KillWait,
    Killed,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Scheduled => "SCHEDULED",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::KillWait => "KILL_WAIT",
            Self::Killed => "KILLED",
        }
    }

    /// Icon used in markdown renderings.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Succeeded => "✅",
            Self::Failed => "❌",
            Self::Killed => "⚠️",
            Self::Running => "🔄",
            Self::New | Self::Scheduled | Self::KillWait => "❓",
        }
    }
}

impl std::str::FromStr for TaskState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NEW" => Self::New,
            "SCHEDULED" => Self::Scheduled,
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "KILL_WAIT" => Self::KillWait,
            "KILLED" => Self::Killed,
            _ => return Err(()),
        })
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Task type ─────────────────────────────────────────────────

/// Map or Reduce. The wire form is the single query letter the
/// `tasks?type=` filter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "m")]
    Map,
    #[serde(rename = "r")]
    Reduce,
}

impl TaskType {
    /// Letter used by the `tasks?type=` query parameter.
    pub fn query_letter(&self) -> &'static str {
        match self {
            Self::Map => "m",
            Self::Reduce => "r",
        }
    }
}

// ── Log type ──────────────────────────────────────────────────

/// Container log file served by the NodeManager log viewer.
///
/// The wire form doubles as the URL path segment of the log page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogType {
    #[serde(rename = "stdout")]
    Stdout,
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "syslog")]
    Syslog,
    #[serde(rename = "syslog.shuffle")]
    SyslogShuffle,
    #[serde(rename = "prelaunch.out")]
    PrelaunchOut,
    #[serde(rename = "prelaunch.err")]
    PrelaunchErr,
    #[serde(rename = "container-localizer-syslog")]
    ContainerLocalizerSyslog,
}

impl LogType {
    /// URL path segment of this log file on the log viewer.
    pub fn url_segment(&self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Syslog => "syslog",
            Self::SyslogShuffle => "syslog.shuffle",
            Self::PrelaunchOut => "prelaunch.out",
            Self::PrelaunchErr => "prelaunch.err",
            Self::ContainerLocalizerSyslog => "container-localizer-syslog",
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url_segment())
    }
}

/// Icon for a raw upstream state string.
///
/// Responses are rendered best-effort without schema validation, so the
/// string is parsed into the closed job or task state enum first; states
/// of neither vocabulary get the unknown icon.
pub fn state_icon(state: &str) -> &'static str {
    if let Ok(s) = state.parse::<JobState>() {
        return s.icon();
    }
    if let Ok(s) = state.parse::<TaskState>() {
        return s.icon();
    }
    "❓"
}
