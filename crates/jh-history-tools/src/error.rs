//! Error taxonomy for upstream queries and log retrieval.

use thiserror::Error;

/// Errors that can occur while querying the history server or log viewer.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("connection to {base_url} failed: {message}")]
    Connect { base_url: String, message: String },

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("task attempt has no assigned container id")]
    MissingContainerId,

    #[error("task attempt has no node HTTP address")]
    MissingNodeAddress,

    #[error("job has no owning user")]
    MissingUser,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias for history query results.
pub type HistoryResult<T> = Result<T, HistoryError>;

impl HistoryError {
    /// Single-line, user-facing diagnostic for this error.
    ///
    /// Tool callers receive this string as the call payload instead of a
    /// raised error, so it names what to check rather than internals.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status: 404 } => {
                "Error: resource not found. Check the identifier; the job or task may already \
                 have been purged from the history server."
                    .into()
            }
            Self::Status { status: 403 } => {
                "Error: insufficient permission to access this resource.".into()
            }
            Self::Status { status: 401 } => {
                "Error: authentication failed. Check the authentication configuration if the \
                 cluster runs in secure mode."
                    .into()
            }
            Self::Status { status: 500 } => {
                "Error: the history server reported an internal error. Check its logs.".into()
            }
            Self::Status { status: 503 } => {
                "Error: the history server is unavailable. It may be starting up or overloaded."
                    .into()
            }
            Self::Status { status } => {
                format!("Error: API request failed with HTTP status {status}.")
            }
            Self::Timeout { timeout_secs } => format!(
                "Error: request timed out after {timeout_secs}s. Check the network connection \
                 or raise REQUEST_TIMEOUT."
            ),
            Self::Connect { base_url, .. } => format!(
                "Error: cannot connect to the history server at {base_url}. Check that the \
                 service is running, the address and port are correct, and the network is \
                 reachable."
            ),
            Self::Upstream(message) => format!("Error: {message}"),
            Self::MissingContainerId => {
                "Error: could not determine the container id. Check that the attempt id is \
                 correct."
                    .into()
            }
            Self::MissingNodeAddress => {
                "Error: could not determine the node address. Check that the attempt id is \
                 correct."
                    .into()
            }
            Self::MissingUser => {
                "Error: could not determine the job's owning user. Check that the job id is \
                 correct."
                    .into()
            }
            Self::InvalidInput(message) => format!("Error: invalid input: {message}"),
        }
    }
}

impl From<jh_protocol::InputError> for HistoryError {
    fn from(e: jh_protocol::InputError) -> Self {
        Self::InvalidInput(e.0)
    }
}
