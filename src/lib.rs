/*!
 * RASP Agent Library
 * Policy-check subsystem of a runtime application-security agent
 *
 * Interception hooks package each monitored operation (a MongoDB query, a
 * SQL statement, a process execution, an outbound request) into an immutable
 * checkable object and pass it to the dispatcher, which evaluates it against
 * configured policy rules, caches verdicts by a derived lookup key, and
 * records blocks in the audit trail.
 *
 * ## Usage
 * ```ignore
 * use rasp_agent::{AgentConfig, CheckDispatcher, CheckHandler, SqlObject};
 *
 * let dispatcher = CheckDispatcher::new(AgentConfig::default());
 *
 * let obj = SqlObject::new("mysql://db:3306", "SELECT * FROM users", "app");
 * let verdict = dispatcher.check_and_audit(&obj)?;
 * if verdict.is_blocking() {
 *     // Abort the intercepted operation
 * }
 * ```
 */

pub mod audit;
pub mod cache;
pub mod checkable;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod params;
pub mod policy;

// Re-exports
pub use audit::{AuditEvent, AuditLogger, AuditSeverity, AuditStats};
pub use cache::{CacheStats, VerdictCache};
pub use checkable::{
    CheckCategory, Checkable, CommandObject, MongoObject, SqlObject, SsrfObject,
};
pub use config::{AgentConfig, CacheConfig};
pub use core::errors::AgentError;
pub use core::types::{AgentResult, LookupKey};
pub use dispatch::{CheckDispatcher, CheckHandler};
pub use params::{JsonParams, ParamError, ParamResult, ParamSink};
pub use policy::{
    CheckVerdict, EngineError, EngineResult, PolicyEngine, Rule, RuleAction, RulesEngine,
    VerdictAction,
};
