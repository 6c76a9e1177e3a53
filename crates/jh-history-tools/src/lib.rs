//! Query tools for the Hadoop JobHistory Server REST API.
//!
//! Provides the upstream HTTP client behind a `HistoryClient` seam for
//! testability, pure response formatters, the HTML log-page extractor,
//! the two-hop container-log locator, and 14 `HistoryTool` implementations
//! covering jobs, tasks, attempts, counters, configuration, and logs.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod html;
pub mod locate;
pub mod mock;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use client::{HistoryClient, HttpHistoryClient};
pub use config::HistoryConfig;
pub use error::{HistoryError, HistoryResult};
pub use locate::{LogRange, LogTarget};
pub use mock::MockHistoryClient;
pub use types::HistoryTool;
