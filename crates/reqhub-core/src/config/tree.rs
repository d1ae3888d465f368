//! Tree assembly configuration.

use serde::{Deserialize, Serialize};

/// Which closure rows become parent/child edges when a tree is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Only `depth == 1` rows: every folder appears once, under its parent.
    #[default]
    Direct,
    /// Every non-self row: a folder is repeated under each of its ancestors.
    AllAncestors,
}

/// Tree assembly settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Edge selection policy.
    #[serde(default)]
    pub edge_policy: EdgePolicy,
}
