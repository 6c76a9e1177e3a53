//! MCP server wiring for the JobHistory tool suite.
//!
//! Hosts the tools from `jh-history-tools` behind a registry and a single
//! dispatch boundary, reachable over newline-delimited JSON-RPC on stdio
//! (the default) or a small HTTP API.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod logging;
pub mod registry;
pub mod stdio;
