/*!
 * Policy Module
 * Verdict types, the evaluator seam, and the built-in rules engine
 */

mod engine;
mod verdict;

pub use engine::{EngineError, EngineResult, PolicyEngine, Rule, RuleAction, RulesEngine};
pub use verdict::{CheckVerdict, VerdictAction};
