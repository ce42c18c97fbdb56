//! Error types for the role manager

use thiserror::Error;

/// Role manager errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RbacError {
    /// Invalid argument (e.g. more than one domain token)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A role referenced by `delete_link` does not exist in the domain
    #[error("Role '{name}' not found in domain '{domain}'")]
    NotFound {
        name: String,
        domain: String,
    },

    /// Domain has no registry
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RbacError {
    fn from(err: serde_json::Error) -> Self {
        RbacError::Config(err.to_string())
    }
}

/// Result type for role manager operations
pub type Result<T> = std::result::Result<T, RbacError>;
