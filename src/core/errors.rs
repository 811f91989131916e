/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export ParamError from the params module
pub use crate::params::ParamError;

// Re-export EngineError from the policy module
pub use crate::policy::EngineError;

/// Top-level agent errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AgentError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(agent::invalid_config),
        help("Check the configuration document for syntax errors and unknown fields.")
    )]
    InvalidConfig(String),
}
