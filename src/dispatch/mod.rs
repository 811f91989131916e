/*!
 * Check Dispatcher
 * Central entry point for all policy checks on intercepted operations
 *
 * The hook layer constructs a checkable object and hands it here. The
 * dispatcher gates on configuration and well-formedness, deduplicates via
 * the verdict cache, and only then pays for parameter population and engine
 * evaluation.
 */

use crate::audit::{AuditEvent, AuditLogger, AuditStats};
use crate::cache::{CacheStats, VerdictCache};
use crate::checkable::{CheckCategory, Checkable};
use crate::config::AgentConfig;
use crate::core::types::AgentResult;
use crate::params::JsonParams;
use crate::policy::{CheckVerdict, PolicyEngine, RulesEngine};
use log::{debug, warn};
use std::sync::Arc;

/// Check interface the hook layer depends on
pub trait CheckHandler: Send + Sync {
    /// Check one intercepted operation
    fn check(&self, object: &dyn Checkable) -> AgentResult<CheckVerdict>;

    /// Check with audit logging
    fn check_and_audit(&self, object: &dyn Checkable) -> AgentResult<CheckVerdict>;
}

/// Central check dispatcher
#[derive(Clone)]
pub struct CheckDispatcher {
    /// Policy evaluator
    engine: Arc<dyn PolicyEngine>,
    /// Verdict cache
    cache: Arc<VerdictCache>,
    /// Audit logger
    audit: Arc<AuditLogger>,
    /// Agent configuration
    config: Arc<AgentConfig>,
}

impl CheckDispatcher {
    /// Create a dispatcher backed by the built-in rules engine
    pub fn new(config: AgentConfig) -> Self {
        debug!("Initializing check dispatcher with built-in rules engine");
        let engine = RulesEngine::with_rules(config.rules.clone());
        Self::with_engine(config, Arc::new(engine))
    }

    /// Create with a custom policy engine (e.g. an embedded evaluator bridge)
    pub fn with_engine(config: AgentConfig, engine: Arc<dyn PolicyEngine>) -> Self {
        let cache = VerdictCache::new(config.cache.max_entries, config.cache.ttl());
        Self {
            engine,
            cache: Arc::new(cache),
            audit: Arc::new(AuditLogger::new()),
            config: Arc::new(config),
        }
    }

    /// Get audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Invalidate cached verdicts for a category (after a rule change)
    pub fn invalidate_cache(&self, category: CheckCategory) {
        self.cache.invalidate_category(category);
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Get audit statistics
    pub fn audit_stats(&self) -> AuditStats {
        self.audit.stats()
    }

    /// Internal check without caching
    fn check_internal(&self, object: &dyn Checkable) -> AgentResult<CheckVerdict> {
        let category = object.category();

        // Materialize fields for the evaluator; sink errors propagate as-is
        let mut params = JsonParams::new();
        object.populate_params(&mut params)?;

        let verdict = self.engine.evaluate(category, &params)?;
        Ok(verdict)
    }
}

impl CheckHandler for CheckDispatcher {
    fn check(&self, object: &dyn Checkable) -> AgentResult<CheckVerdict> {
        let category = object.category();

        if !self.config.is_enabled(category) {
            debug!("Category '{category}' disabled, skipping check");
            return Ok(CheckVerdict::allow(
                category,
                format!("Category '{category}' disabled"),
            ));
        }

        // Degenerate objects short-circuit before any engine work
        if !object.is_well_formed() {
            debug!("Skipping malformed {category} object");
            return Ok(CheckVerdict::allow(category, "Nothing to check"));
        }

        // Try cache first
        let key = object.lookup_key();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Cache hit for {category} check");
            return Ok(cached);
        }

        let verdict = self.check_internal(object)?;
        if verdict.is_blocking() {
            warn!("Blocked {category} operation: {}", verdict.reason());
        }

        // Cache the result
        self.cache.put(key, verdict.clone());

        Ok(verdict)
    }

    fn check_and_audit(&self, object: &dyn Checkable) -> AgentResult<CheckVerdict> {
        let verdict = self.check(object)?;

        // Log to audit trail
        let event = AuditEvent::new(object.lookup_key(), verdict.clone());
        self.audit.log(event);

        Ok(verdict)
    }
}
