/*!
 * Core Module
 * Shared types, errors, and limits for the agent
 */

pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use errors::AgentError;
pub use types::{AgentResult, LookupKey};
