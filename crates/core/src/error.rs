//! Error types for the Handoff domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Everything here is a caller mistake: nothing is retried.

use thiserror::Error;

/// The top-level error type for Handoff data-model operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An agent definition that can never run to completion.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A configuration names a function that is not registered.
    #[error("Unknown agent function: {0}")]
    UnknownFunction(String),

    /// A value cannot be written back to a configuration.
    #[error("Not serializable: {0}")]
    NotSerializable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for the construction-time validation failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_displays_message() {
        let err = Error::configuration("agent has no functions");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Configuration error: agent has no functions"
        );
    }

    #[test]
    fn unknown_function_is_not_configuration() {
        let err = Error::UnknownFunction("transfer_to_sales".into());
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("transfer_to_sales"));
    }
}
