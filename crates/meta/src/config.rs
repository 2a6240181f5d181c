//! Aggregation configuration
//!
//! Defaults reproduce the lenient reporting behavior: malformed nodes are
//! skipped and zero net changes are kept.

use serde::{Deserialize, Serialize};

/// Configuration for `BalanceChangeAggregator`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Fail on a node whose fields do not match its entry type instead of skipping it
    #[serde(default = "default_strict_node_shapes")]
    pub strict_node_shapes: bool,

    /// Drop currencies whose merged change nets out to exactly zero
    #[serde(default = "default_omit_zero_changes")]
    pub omit_zero_changes: bool,
}

fn default_strict_node_shapes() -> bool {
    false
}

fn default_omit_zero_changes() -> bool {
    false
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            strict_node_shapes: default_strict_node_shapes(),
            omit_zero_changes: default_omit_zero_changes(),
        }
    }
}

impl MetaConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_node_shapes = strict;
        self
    }

    pub fn omit_zero(mut self, omit: bool) -> Self {
        self.omit_zero_changes = omit;
        self
    }
}
