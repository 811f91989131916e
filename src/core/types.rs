/*!
 * Core Types
 * Common types used across the agent
 */

/// Cache key derived from a checkable object's fields
pub type LookupKey = String;

/// Common result type for agent operations
pub type AgentResult<T> = Result<T, super::errors::AgentError>;
