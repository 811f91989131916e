/*!
 * Check Verdicts
 * Outcome of evaluating one intercepted operation
 */

use crate::checkable::CheckCategory;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::time::SystemTime;

/// What the agent should do with the intercepted operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictAction {
    /// Let the operation proceed
    Allow,
    /// Let it proceed but record it
    Log,
    /// Abort the operation
    Block,
}

/// Verdict for one checked operation
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckVerdict {
    /// Policy domain that was evaluated
    pub category: CheckCategory,
    /// Decided action
    pub action: VerdictAction,
    /// Reason for the decision
    pub reason: String,
    /// Name of the rule or policy that decided, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Decision time
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub decided_at: SystemTime,
    /// Whether the verdict came from the cache
    #[serde(default)]
    pub cached: bool,
}

impl CheckVerdict {
    fn new(
        category: CheckCategory,
        action: VerdictAction,
        reason: impl Into<String>,
        policy: Option<String>,
    ) -> Self {
        Self {
            category,
            action,
            reason: reason.into(),
            policy,
            decided_at: SystemTime::now(),
            cached: false,
        }
    }

    /// Create an allow verdict
    pub fn allow(category: CheckCategory, reason: impl Into<String>) -> Self {
        Self::new(category, VerdictAction::Allow, reason, None)
    }

    /// Create a log verdict attributed to a policy
    pub fn log(
        category: CheckCategory,
        reason: impl Into<String>,
        policy: impl Into<String>,
    ) -> Self {
        Self::new(category, VerdictAction::Log, reason, Some(policy.into()))
    }

    /// Create a block verdict attributed to a policy
    pub fn block(
        category: CheckCategory,
        reason: impl Into<String>,
        policy: impl Into<String>,
    ) -> Self {
        Self::new(category, VerdictAction::Block, reason, Some(policy.into()))
    }

    /// Mark as served from cache
    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    /// Whether the operation must be aborted
    pub fn is_blocking(&self) -> bool {
        self.action == VerdictAction::Block
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_verdict() {
        let verdict = CheckVerdict::allow(CheckCategory::Mongo, "no rule matched");
        assert!(!verdict.is_blocking());
        assert!(!verdict.cached);
        assert_eq!(verdict.policy, None);
        assert_eq!(verdict.reason(), "no rule matched");
    }

    #[test]
    fn test_block_verdict() {
        let verdict = CheckVerdict::block(CheckCategory::Command, "matched deny rule", "no-shells");
        assert!(verdict.is_blocking());
        assert_eq!(verdict.policy.as_deref(), Some("no-shells"));
    }

    #[test]
    fn test_with_cached() {
        let verdict = CheckVerdict::allow(CheckCategory::Sql, "ok").with_cached(true);
        assert!(verdict.cached);
    }
}
