//! Tool registry: name-indexed lookup and listing.

use std::collections::HashMap;

use jh_history_tools::HistoryTool;

/// Metadata about a registered tool (used by the tool listing surface).
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

/// Holds the tool set, indexed by name for O(1) dispatch.
pub struct ToolRegistry {
    tools: Vec<Box<dyn HistoryTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn HistoryTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with the full JobHistory tool set.
    pub fn with_defaults() -> Self {
        Self::new(jh_history_tools::tools::all_tools())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn HistoryTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// List all registered tools with metadata.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_with_defaults() {
        let reg = ToolRegistry::with_defaults();
        assert_eq!(reg.len(), 14);
    }

    #[test]
    fn lookup_by_name() {
        let reg = ToolRegistry::with_defaults();
        let tool = reg.get("jobhistory_list_jobs").unwrap();
        assert_eq!(tool.name(), "jobhistory_list_jobs");
    }

    #[test]
    fn lookup_unknown_returns_none() {
        let reg = ToolRegistry::with_defaults();
        assert!(reg.get("nonexistent_tool").is_none());
    }

    #[test]
    fn list_tools_has_all() {
        let reg = ToolRegistry::with_defaults();
        let tools = reg.list_tools();
        assert_eq!(tools.len(), 14);
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"jobhistory_get_info"));
        assert!(names.contains(&"jobhistory_list_jobs"));
        assert!(names.contains(&"jobhistory_get_job"));
        assert!(names.contains(&"jobhistory_get_job_counters"));
        assert!(names.contains(&"jobhistory_get_job_conf"));
        assert!(names.contains(&"jobhistory_get_job_attempts"));
        assert!(names.contains(&"jobhistory_list_tasks"));
        assert!(names.contains(&"jobhistory_get_task"));
        assert!(names.contains(&"jobhistory_get_task_counters"));
        assert!(names.contains(&"jobhistory_list_task_attempts"));
        assert!(names.contains(&"jobhistory_get_task_attempt"));
        assert!(names.contains(&"jobhistory_get_task_attempt_counters"));
        assert!(names.contains(&"jobhistory_get_task_attempt_logs"));
        assert!(names.contains(&"jobhistory_get_task_attempt_logs_partial"));
    }
}
