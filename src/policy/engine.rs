/*!
 * Policy Engine
 * Evaluator seam plus the built-in rule-based engine
 *
 * The embedded script evaluator lives behind the `PolicyEngine` trait; the
 * built-in `RulesEngine` implements the same contract over a flat list of
 * substring rules so the agent is usable and testable without an embedded
 * engine.
 */

use super::verdict::CheckVerdict;
use crate::checkable::CheckCategory;
use crate::params::JsonParams;
use log::debug;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type for engine evaluation
pub type EngineResult<T> = Result<T, EngineError>;

/// Evaluation-engine errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum EngineError {
    #[error("Policy evaluation failed: {reason}")]
    #[diagnostic(
        code(policy::evaluation_failed),
        help("The evaluator rejected the check. Inspect the engine logs for the underlying cause.")
    )]
    EvaluationFailed { reason: String },
}

/// Policy evaluator interface
///
/// One evaluation per intercepted operation; implementations must not retain
/// the parameter collection beyond the call.
pub trait PolicyEngine: Send + Sync {
    /// Evaluate populated parameters against the rules for a category
    fn evaluate(&self, category: CheckCategory, params: &JsonParams) -> EngineResult<CheckVerdict>;

    /// Engine name, for logs and verdict attribution
    fn name(&self) -> &str;
}

/// What a matching rule does to the operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    Log,
    Block,
}

/// A single substring rule
///
/// Matches when the named parameter contains `pattern`. For list parameters
/// (e.g. `stack`), matches when any element contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rule {
    pub name: String,
    pub category: CheckCategory,
    /// Parameter key the pattern is matched against
    pub key: String,
    /// Substring the parameter must contain
    pub pattern: String,
    pub action: RuleAction,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        category: CheckCategory,
        key: impl Into<String>,
        pattern: impl Into<String>,
        action: RuleAction,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            key: key.into(),
            pattern: pattern.into(),
            action,
        }
    }

    fn matches(&self, params: &JsonParams) -> bool {
        match params.get(&self.key) {
            Some(Value::String(s)) => s.contains(&self.pattern),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .any(|s| s.contains(&self.pattern)),
            _ => false,
        }
    }
}

/// Built-in rule-based engine; first matching rule wins
pub struct RulesEngine {
    rules: Vec<Rule>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule; later rules lose to earlier ones on overlap
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyEngine for RulesEngine {
    fn evaluate(&self, category: CheckCategory, params: &JsonParams) -> EngineResult<CheckVerdict> {
        for rule in self.rules.iter().filter(|r| r.category == category) {
            if rule.matches(params) {
                debug!("Rule '{}' matched {} check", rule.name, category);
                let reason = format!("Matched rule '{}'", rule.name);
                return Ok(match rule.action {
                    RuleAction::Block => CheckVerdict::block(category, reason, rule.name.clone()),
                    RuleAction::Log => CheckVerdict::log(category, reason, rule.name.clone()),
                });
            }
        }

        Ok(CheckVerdict::allow(category, "No rule matched"))
    }

    fn name(&self) -> &str {
        "rules"
    }
}
