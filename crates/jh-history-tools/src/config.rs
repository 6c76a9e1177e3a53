//! Upstream connection configuration, loadable from the environment.

/// Where and how to reach the JobHistory Server.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// JobHistory REST base URL, e.g. `http://host:19888/ws/v1/history`.
    pub base_url: String,
    /// Port the NodeManager log viewer listens on.
    pub nodemanager_port: u16,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:19888/ws/v1/history".to_string()
}

fn default_nodemanager_port() -> u16 {
    8052
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            nodemanager_port: default_nodemanager_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HistoryConfig {
    /// Load from `JOBHISTORY_URL`, `NODEMANAGER_PORT`, and `REQUEST_TIMEOUT`.
    ///
    /// Unset or unparseable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("JOBHISTORY_URL")
            .ok()
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_base_url);
        let nodemanager_port = std::env::var("NODEMANAGER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_nodemanager_port);
        let timeout_secs = std::env::var("REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);
        Self {
            base_url,
            nodemanager_port,
            timeout_secs,
        }
    }

    /// Base URL of the log viewer, derived from the history base URL by
    /// keeping scheme and network location and replacing the path with
    /// `/jobhistory/logs`.
    pub fn logs_base_url(&self) -> String {
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) => {
                let scheme = url.scheme();
                let host = url.host_str().unwrap_or("localhost");
                match url.port() {
                    Some(port) => format!("{scheme}://{host}:{port}/jobhistory/logs"),
                    None => format!("{scheme}://{host}/jobhistory/logs"),
                }
            }
            // Unparseable base: keep it whole so the failure surfaces as a
            // connect error naming the configured value.
            Err(_) => format!(
                "{}/jobhistory/logs",
                self.base_url.trim_end_matches('/')
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HistoryConfig::default();
        assert_eq!(config.base_url, "http://localhost:19888/ws/v1/history");
        assert_eq!(config.nodemanager_port, 8052);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn logs_base_keeps_scheme_and_netloc() {
        let config = HistoryConfig {
            base_url: "http://jobhistory.example.com:19888/ws/v1/history".into(),
            ..Default::default()
        };
        assert_eq!(
            config.logs_base_url(),
            "http://jobhistory.example.com:19888/jobhistory/logs"
        );
    }

    #[test]
    fn logs_base_without_explicit_port() {
        let config = HistoryConfig {
            base_url: "https://jobhistory.example.com/ws/v1/history".into(),
            ..Default::default()
        };
        assert_eq!(
            config.logs_base_url(),
            "https://jobhistory.example.com/jobhistory/logs"
        );
    }
}
