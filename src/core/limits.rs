/*!
 * Agent Limits and Constants
 *
 * Centralized location for agent-wide limits and thresholds.
 * All values include rationale comments explaining WHY they exist.
 */

use std::time::Duration;

// =============================================================================
// VERDICT CACHE
// =============================================================================

/// Default verdict cache capacity (1024 entries)
/// Sized for the working set of distinct operations a busy process issues;
/// identical calls dominate, so a small cache still absorbs most checks
/// [PERF] Checked on EVERY intercepted operation
pub const DEFAULT_CACHE_ENTRIES: usize = 1024;

/// Default verdict TTL (60 seconds)
/// Bounds staleness after a rule reload without forcing re-evaluation of
/// hot operations on every request
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

// =============================================================================
// AUDIT TRAIL
// =============================================================================

/// Maximum audit events kept in the global ring buffer
/// [SECURITY] Bounded so a flood of intercepted calls cannot exhaust memory
pub const MAX_AUDIT_EVENTS: usize = 10_000;

// =============================================================================
// INTERCEPTION
// =============================================================================

/// Maximum call-stack frames captured on a command interception
/// Deep frameworks produce hundreds of frames; rules only inspect the top
pub const MAX_STACK_FRAMES: usize = 100;
