//! Shared domain types for the JobHistory tool suite.
//!
//! Closed enumerations for everything the upstream REST API expresses as
//! string literals (job/task state, task type, log type, response format)
//! plus the typed input model for every tool, including the JSON-string
//! alternate encoding some clients send.

pub mod inputs;
pub mod states;

pub use inputs::*;
pub use states::*;
