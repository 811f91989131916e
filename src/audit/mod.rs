/*!
 * Audit Trail
 * Tracks check verdicts and blocks for security monitoring
 */

use crate::checkable::CheckCategory;
use crate::core::limits::MAX_AUDIT_EVENTS;
use crate::core::types::LookupKey;
use crate::policy::{CheckVerdict, VerdictAction};
use ahash::RandomState;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::time::SystemTime;

/// Audit event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Warning,
    Critical,
}

/// One audited check
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditEvent {
    /// Lookup key of the checked object (fields are not retained)
    pub lookup_key: LookupKey,
    pub verdict: CheckVerdict,
    pub severity: AuditSeverity,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(lookup_key: LookupKey, verdict: CheckVerdict) -> Self {
        let severity = match verdict.action {
            // Blocked command execution and SQL are the attacks RASP exists for
            VerdictAction::Block => match verdict.category {
                CheckCategory::Command | CheckCategory::Sql => AuditSeverity::Critical,
                _ => AuditSeverity::Warning,
            },
            VerdictAction::Log => AuditSeverity::Warning,
            VerdictAction::Allow => AuditSeverity::Info,
        };

        Self {
            lookup_key,
            verdict,
            severity,
            logged_at: SystemTime::now(),
        }
    }

    pub fn with_severity(mut self, severity: AuditSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Audit logger for check verdicts
pub struct AuditLogger {
    /// Global event log (ring buffer)
    events: parking_lot::RwLock<VecDeque<AuditEvent>>,
    /// Per-category check counters
    category_counts: DashMap<CheckCategory, u64, RandomState>,
    /// Per-category block counters
    block_counts: DashMap<CheckCategory, u64, RandomState>,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(VecDeque::with_capacity(MAX_AUDIT_EVENTS)),
            category_counts: DashMap::with_hasher(RandomState::new()),
            block_counts: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Log a checked operation
    pub fn log(&self, event: AuditEvent) {
        let category = event.verdict.category;
        let is_blocked = event.verdict.is_blocking();

        // Add to global log
        {
            let mut events = self.events.write();
            if events.len() >= MAX_AUDIT_EVENTS {
                events.pop_front();
            }
            events.push_back(event);
        }

        self.category_counts
            .entry(category)
            .and_modify(|count| *count += 1)
            .or_insert(1);

        if is_blocked {
            self.block_counts
                .entry(category)
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
    }

    /// Get recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        let events = self.events.read();
        events.iter().rev().take(limit).cloned().collect()
    }

    /// Get block count for a category
    pub fn block_count(&self, category: CheckCategory) -> u64 {
        self.block_counts.get(&category).map(|e| *e).unwrap_or(0)
    }

    /// Get all categories that have produced blocks
    pub fn categories_with_blocks(&self) -> Vec<(CheckCategory, u64)> {
        self.block_counts
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }

    /// Clear all logs
    pub fn clear_all(&self) {
        self.events.write().clear();
        self.category_counts.clear();
        self.block_counts.clear();
    }

    /// Get statistics
    pub fn stats(&self) -> AuditStats {
        let total_events = self.events.read().len();
        let total_blocks: u64 = self.block_counts.iter().map(|e| *e.value()).sum();
        let categories_tracked = self.category_counts.len();

        AuditStats {
            total_events,
            total_blocks,
            categories_tracked,
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub total_blocks: u64,
    pub categories_tracked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_logging() {
        let logger = AuditLogger::new();
        let verdict = CheckVerdict::block(CheckCategory::Command, "matched", "no-shells");

        logger.log(AuditEvent::new("command|2:sh".to_string(), verdict));

        let recent = logger.recent(10);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].severity, AuditSeverity::Critical);
        assert_eq!(logger.block_count(CheckCategory::Command), 1);
    }

    #[test]
    fn test_severity_derivation() {
        let allow = AuditEvent::new(
            "k".to_string(),
            CheckVerdict::allow(CheckCategory::Mongo, "ok"),
        );
        assert_eq!(allow.severity, AuditSeverity::Info);

        let ssrf_block = AuditEvent::new(
            "k".to_string(),
            CheckVerdict::block(CheckCategory::Ssrf, "matched", "no-metadata"),
        );
        assert_eq!(ssrf_block.severity, AuditSeverity::Warning);

        let sql_block = AuditEvent::new(
            "k".to_string(),
            CheckVerdict::block(CheckCategory::Sql, "matched", "no-drop"),
        );
        assert_eq!(sql_block.severity, AuditSeverity::Critical);
    }

    #[test]
    fn test_audit_stats() {
        let logger = AuditLogger::new();

        for i in 0..5 {
            let verdict = if i % 2 == 0 {
                CheckVerdict::block(CheckCategory::Sql, "matched", "rule")
            } else {
                CheckVerdict::allow(CheckCategory::Sql, "ok")
            };
            logger.log(AuditEvent::new(format!("sql|{i}"), verdict));
        }

        let stats = logger.stats();
        assert_eq!(stats.total_events, 5);
        assert_eq!(stats.total_blocks, 3); // 0, 2, 4
        assert_eq!(stats.categories_tracked, 1);
    }

    #[test]
    fn test_ring_buffer() {
        let logger = AuditLogger::new();

        // Add more than MAX_AUDIT_EVENTS
        for i in 0..(MAX_AUDIT_EVENTS + 100) {
            let verdict = CheckVerdict::allow(CheckCategory::Mongo, "ok");
            logger.log(AuditEvent::new(format!("mongo|{i}"), verdict));
        }

        let stats = logger.stats();
        assert_eq!(stats.total_events, MAX_AUDIT_EVENTS);
    }
}
