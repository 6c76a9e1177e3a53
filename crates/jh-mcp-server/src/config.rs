//! Server configuration, loaded from environment variables at startup.

use jh_history_tools::HistoryConfig;

/// Logging sink settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset (`LOG_LEVEL`).
    pub level: String,
    /// Directory the rolling log files land in (`LOG_DIR`).
    pub dir: String,
    /// Also log to stderr (`LOG_TO_STDERR`). Stdout stays reserved for
    /// stdio protocol traffic.
    pub to_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            dir: "./logs".into(),
            to_stderr: true,
        }
    }
}

/// Which transport serves tool calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportMode {
    /// Newline-delimited JSON-RPC over stdin/stdout. The default.
    Stdio,
    /// HTTP API, for remote deployment.
    Http { host: String, port: u16 },
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub history: HistoryConfig,
    pub log: LogConfig,
    pub transport: TransportMode,
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

impl ServerConfig {
    /// Load everything from the environment; unset variables fall back to
    /// defaults. `force_http` comes from the `--http` CLI flag.
    pub fn from_env(force_http: bool) -> Self {
        let log = LogConfig {
            level: std::env::var("LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|_| "info".into()),
            dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".into()),
            to_stderr: env_bool("LOG_TO_STDERR", true),
        };

        let use_http = force_http
            || std::env::var("MCP_TRANSPORT")
                .map(|v| v.eq_ignore_ascii_case("http"))
                .unwrap_or(false);
        let transport = if use_http {
            TransportMode::Http {
                host: std::env::var("MCP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
                port: std::env::var("MCP_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(8080),
            }
        } else {
            TransportMode::Stdio
        };

        Self {
            history: HistoryConfig::from_env(),
            log,
            transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.dir, "./logs");
        assert!(config.to_stderr);
    }

    #[test]
    fn force_http_overrides_default_transport() {
        let config = ServerConfig::from_env(true);
        assert!(matches!(config.transport, TransportMode::Http { .. }));
    }
}
