/*!
 * Agent Configuration
 * Cache sizing, enabled categories, and built-in rules
 */

use crate::checkable::CheckCategory;
use crate::core::errors::AgentError;
use crate::core::limits::{DEFAULT_CACHE_ENTRIES, DEFAULT_CACHE_TTL};
use crate::core::types::AgentResult;
use crate::policy::Rule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Verdict cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_ENTRIES,
            ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

/// Agent configuration
///
/// Deserializable from JSON; unknown categories in a document are a hard
/// error rather than silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AgentConfig {
    pub cache: CacheConfig,
    /// Categories the dispatcher actually evaluates; others are allowed
    /// through without touching the engine
    pub enabled_categories: HashSet<CheckCategory>,
    /// Rules for the built-in engine
    pub rules: Vec<Rule>,
}

impl AgentConfig {
    /// Parse from a JSON document
    pub fn from_json(doc: &str) -> AgentResult<Self> {
        serde_json::from_str(doc).map_err(|e| AgentError::InvalidConfig(e.to_string()))
    }

    pub fn is_enabled(&self, category: CheckCategory) -> bool {
        self.enabled_categories.contains(&category)
    }

    /// Disable a category
    pub fn disable(&mut self, category: CheckCategory) {
        self.enabled_categories.remove(&category);
    }

    /// Enable a category
    pub fn enable(&mut self, category: CheckCategory) {
        self.enabled_categories.insert(category);
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            enabled_categories: CheckCategory::ALL.into_iter().collect(),
            rules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RuleAction;

    #[test]
    fn test_default_enables_all() {
        let config = AgentConfig::default();
        for category in CheckCategory::ALL {
            assert!(config.is_enabled(category));
        }
    }

    #[test]
    fn test_disable_enable() {
        let mut config = AgentConfig::default();
        config.disable(CheckCategory::Ssrf);
        assert!(!config.is_enabled(CheckCategory::Ssrf));
        config.enable(CheckCategory::Ssrf);
        assert!(config.is_enabled(CheckCategory::Ssrf));
    }

    #[test]
    fn test_from_json() {
        let doc = r#"{
            "cache": { "max_entries": 64, "ttl_secs": 5 },
            "enabled_categories": ["sql", "command"],
            "rules": [{
                "name": "no-drop",
                "category": "sql",
                "key": "query",
                "pattern": "DROP TABLE",
                "action": "block"
            }]
        }"#;

        let config = AgentConfig::from_json(doc).unwrap();
        assert_eq!(config.cache.max_entries, 64);
        assert_eq!(config.cache.ttl(), Duration::from_secs(5));
        assert!(config.is_enabled(CheckCategory::Sql));
        assert!(!config.is_enabled(CheckCategory::Mongo));
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].action, RuleAction::Block);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = AgentConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, AgentError::InvalidConfig(_)));
    }
}
