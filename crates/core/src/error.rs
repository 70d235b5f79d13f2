//! Error types for run log retrieval
//!
//! The taxonomy separates outcomes a poller must treat differently:
//!
//! | Variant | Meaning | Caller action |
//! |---------|---------|---------------|
//! | `MissingResource` | Log stream not created yet | Poll again later |
//! | `Backend` | Any unclassified store failure | Surface / abort |
//! | `Configuration` | Required setting absent at startup | Fix config |
//! | `NotSupported` | Client lacks the capability | Use another path |
//! | `RunNotFound` / `ExecutableNotFound` | State lookup miss | Surface |
//!
//! Throttling and "no logs yet" are deliberately absent: both are reported as
//! empty successes so that polling loops need no special casing.

use thiserror::Error;

/// Result type for run log operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by run log retrieval
#[derive(Debug, Error)]
pub enum Error {
    /// The computed log stream does not exist in the backend yet
    #[error("missing resource: {message}")]
    MissingResource {
        /// Backend message describing the missing resource
        message: String,
    },

    /// Unclassified backend failure (auth, network, malformed request)
    #[error("{operation}: {message}")]
    Backend {
        /// What was being attempted, with identifiers
        operation: String,
        /// Backend-provided description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Required settings were absent during initialization
    #[error("{client} needs {} set in config", .missing.join(" and "))]
    Configuration {
        /// Client being initialized
        client: &'static str,
        /// One entry per missing setting; alternatives are joined with " or "
        missing: Vec<String>,
    },

    /// The client does not implement this operation
    #[error("{client} does not support {operation}")]
    NotSupported {
        /// Name of the client
        client: &'static str,
        /// Operation that was requested
        operation: &'static str,
    },

    /// No run with this identifier
    #[error("run not found: {run_id}")]
    RunNotFound {
        /// Identifier that was looked up
        run_id: String,
    },

    /// No executable for this (type, id) pair
    #[error("executable not found: {executable_type} {executable_id}")]
    ExecutableNotFound {
        /// Executable type that was looked up
        executable_type: String,
        /// Executable id that was looked up
        executable_id: String,
    },

    /// Writing to an output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a backend failure with the operation that was being attempted.
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Backend {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a backend failure and keep its cause.
    pub fn backend_with_source(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Backend {
            operation: operation.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this is a missing-resource error.
    pub fn is_missing_resource(&self) -> bool {
        matches!(self, Error::MissingResource { .. })
    }

    /// Check if this is a not-found error for a run or executable.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::RunNotFound { .. } | Error::ExecutableNotFound { .. }
        )
    }

    /// Check if this error is retryable.
    ///
    /// A missing stream is usually created by the shipping agent shortly
    /// after the container starts, so a later poll may succeed.
    pub fn is_retryable(&self) -> bool {
        self.is_missing_resource()
    }
}
