//! Tool categories.
//!
//! Every backend tool belongs to at most one category. Category membership is
//! static and decides which `view:<category>:update` event a tool result is
//! routed to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed grouping of tool names.
///
/// Declaration order is the lookup order: if a tool name ever appeared in two
/// lists, the earlier category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Neural,
    Memory,
    Monitoring,
    Workflow,
    Github,
    Daa,
    System,
}

impl ToolCategory {
    /// All categories in lookup order.
    pub const ALL: [ToolCategory; 7] = [
        ToolCategory::Neural,
        ToolCategory::Memory,
        ToolCategory::Monitoring,
        ToolCategory::Workflow,
        ToolCategory::Github,
        ToolCategory::Daa,
        ToolCategory::System,
    ];

    /// Lower-case name used in event names and view ids.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolCategory::Neural => "neural",
            ToolCategory::Memory => "memory",
            ToolCategory::Monitoring => "monitoring",
            ToolCategory::Workflow => "workflow",
            ToolCategory::Github => "github",
            ToolCategory::Daa => "daa",
            ToolCategory::System => "system",
        }
    }

    /// Tool names that belong to this category.
    pub fn tools(self) -> &'static [&'static str] {
        match self {
            ToolCategory::Neural => NEURAL_TOOLS,
            ToolCategory::Memory => MEMORY_TOOLS,
            ToolCategory::Monitoring => MONITORING_TOOLS,
            ToolCategory::Workflow => WORKFLOW_TOOLS,
            ToolCategory::Github => GITHUB_TOOLS,
            ToolCategory::Daa => DAA_TOOLS,
            ToolCategory::System => SYSTEM_TOOLS,
        }
    }

    /// Parses a category name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NEURAL_TOOLS: &[&str] = &[
    "neural_train",
    "neural_predict",
    "neural_status",
    "neural_patterns",
    "model_load",
    "model_save",
    "pattern_recognize",
    "cognitive_analyze",
    "learning_adapt",
    "neural_compress",
    "ensemble_create",
    "transfer_learn",
    "neural_explain",
    "wasm_optimize",
    "inference_run",
];

const MEMORY_TOOLS: &[&str] = &[
    "memory_usage",
    "memory_backup",
    "memory_restore",
    "memory_compress",
    "memory_sync",
    "cache_manage",
    "state_snapshot",
    "context_restore",
    "memory_analytics",
    "memory_persist",
    "memory_namespace",
];

const MONITORING_TOOLS: &[&str] = &[
    "performance_report",
    "bottleneck_analyze",
    "token_usage",
    "benchmark_run",
    "metrics_collect",
    "trend_analysis",
    "cost_analysis",
    "quality_assess",
    "error_analysis",
    "usage_stats",
    "health_check",
    "swarm_monitor",
    "agent_metrics",
];

const WORKFLOW_TOOLS: &[&str] = &[
    "workflow_create",
    "workflow_execute",
    "automation_setup",
    "pipeline_create",
    "scheduler_manage",
    "trigger_setup",
    "workflow_template",
    "batch_process",
    "parallel_execute",
    "sparc_mode",
    "task_orchestrate",
];

const GITHUB_TOOLS: &[&str] = &[
    "github_repo_analyze",
    "github_pr_manage",
    "github_issue_track",
    "github_release_coord",
    "github_workflow_auto",
    "github_code_review",
    "github_sync_coord",
    "github_metrics",
];

const DAA_TOOLS: &[&str] = &[
    "daa_agent_create",
    "daa_capability_match",
    "daa_resource_alloc",
    "daa_lifecycle_manage",
    "daa_communication",
    "daa_consensus",
    "daa_fault_tolerance",
    "daa_optimization",
];

const SYSTEM_TOOLS: &[&str] = &[
    "security_scan",
    "backup_create",
    "restore_system",
    "log_analysis",
    "diagnostic_run",
    "config_manage",
    "features_detect",
    "terminal_execute",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_sizes() {
        let sizes: Vec<usize> = ToolCategory::ALL
            .iter()
            .map(|category| category.tools().len())
            .collect();
        assert_eq!(sizes, vec![15, 11, 13, 11, 8, 8, 8]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ToolCategory::parse("GitHub"), Some(ToolCategory::Github));
        assert_eq!(ToolCategory::parse(" daa "), Some(ToolCategory::Daa));
        assert_eq!(ToolCategory::parse("overview"), None);
    }

    #[test]
    fn test_display_matches_as_str() {
        for category in ToolCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
