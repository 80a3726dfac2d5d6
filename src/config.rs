//! Configuration for huffpack

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// How `MinHeap::pop` picks a child while sifting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiftRule {
    /// Prefer the left child if `left <= current`, otherwise the right child
    /// only if `right < current`. Produces the reference byte layout.
    #[default]
    Reference,
    /// Swap with the strictly smaller child.
    SmallestChild,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub max_input_size: usize,
    pub sift_rule: SiftRule,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            sift_rule: SiftRule::Reference,
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CodecConfig::from_json_str(r#"{ "sift_rule": "smallest_child" }"#).unwrap();
        assert_eq!(config.sift_rule, SiftRule::SmallestChild);
        assert_eq!(config.max_input_size, CodecConfig::default().max_input_size);
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let result = CodecConfig::from_json_str(r#"{ "sift_rule": "random" }"#);
        assert!(matches!(result, Err(CodecError::Config(_))));
    }
}
