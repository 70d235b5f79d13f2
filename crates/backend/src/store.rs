//! Log store wire contract
//!
//! [`LogStore`] is the seam to the managed log store SDK. Requests name a
//! namespace (log group) and a stream; responses carry events in whatever
//! order the store delivers them plus a forward token that must be echoed
//! back verbatim.
//!
//! Errors are carried as [`StoreError`] with the store's error code so that
//! clients can classify not-found, already-exists and throttling without
//! knowing the transport.

use std::sync::Arc;

use runlogs_core::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code returned when a namespace or stream does not exist
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Code returned when creating a namespace that already exists
pub const RESOURCE_ALREADY_EXISTS: &str = "ResourceAlreadyExistsException";

/// Error codes the store uses to signal rate limiting
pub const THROTTLE_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "TransactionInProgressException",
    "RequestLimitExceeded",
    "BandwidthLimitExceeded",
    "LimitExceededException",
    "RequestThrottled",
    "SlowDown",
    "PriorRequestNotComplete",
    "EC2ThrottledException",
];

/// HTTP statuses that signal rate limiting regardless of code
pub const THROTTLE_STATUSES: &[u16] = &[429, 509];

/// One log line as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Milliseconds since epoch
    pub timestamp: i64,
    /// Message text
    pub message: String,
}

impl LogEvent {
    /// Create an event
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        LogEvent {
            timestamp,
            message: message.into(),
        }
    }
}

/// A namespace as listed by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDescription {
    /// Namespace name
    pub name: String,
    /// Retention in days, if a policy is set
    pub retention_days: Option<u32>,
}

/// Fetch request for one page of a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLogEventsRequest {
    /// Namespace (log group) name
    pub namespace: String,
    /// Stream name
    pub stream: String,
    /// Read forward from the oldest event
    pub start_from_head: bool,
    /// Continuation token from a previous response
    pub next_token: Option<String>,
}

/// One page of a stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLogEventsResponse {
    /// Events, in store delivery order
    pub events: Vec<LogEvent>,
    /// Token for the next forward read; unchanged when no new events exist
    pub next_forward_token: Option<String>,
}

/// Error returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct StoreError {
    /// Store error code
    pub code: String,
    /// Store message
    pub message: String,
    /// HTTP status, if the transport reported one
    pub status: Option<u16>,
}

impl StoreError {
    /// Create an error with a code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError {
            code: code.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Attach an HTTP status
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Resource-not-found error
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        StoreError::new(RESOURCE_NOT_FOUND, message)
    }

    /// Already-exists error
    pub fn already_exists(message: impl Into<String>) -> Self {
        StoreError::new(RESOURCE_ALREADY_EXISTS, message)
    }

    /// Rate limiting error
    pub fn throttled(message: impl Into<String>) -> Self {
        StoreError::new("ThrottlingException", message).with_status(400)
    }

    /// Check if the namespace or stream does not exist
    pub fn is_resource_not_found(&self) -> bool {
        self.code == RESOURCE_NOT_FOUND
    }

    /// Check if the resource being created already exists
    pub fn is_already_exists(&self) -> bool {
        self.code == RESOURCE_ALREADY_EXISTS
    }

    /// Check if the store rejected the request due to rate limiting
    pub fn is_throttle(&self) -> bool {
        THROTTLE_CODES.contains(&self.code.as_str())
            || self.status.map_or(false, |s| THROTTLE_STATUSES.contains(&s))
    }
}

/// Operations the log clients need from the store
///
/// Implementations must be safe to share across threads; clients hold one
/// handle for their whole lifetime and never mutate it.
pub trait LogStore: Send + Sync {
    /// List namespaces whose name starts with `prefix`
    fn describe_namespaces(&self, prefix: &str) -> std::result::Result<Vec<NamespaceDescription>, StoreError>;

    /// Create a namespace
    fn create_namespace(&self, name: &str) -> std::result::Result<(), StoreError>;

    /// Set the retention policy of a namespace
    fn put_retention_policy(&self, name: &str, retention_days: u32) -> std::result::Result<(), StoreError>;

    /// Fetch one page of events
    fn get_log_events(
        &self,
        request: &GetLogEventsRequest,
    ) -> std::result::Result<GetLogEventsResponse, StoreError>;
}

/// Opens a store connection for a region
///
/// Transport settings such as deadlines belong to the connector.
pub trait StoreConnector {
    /// Connect to the store in `region`
    fn connect(&self, region: &str) -> Result<Arc<dyn LogStore>>;
}

impl<F> StoreConnector for F
where
    F: Fn(&str) -> Result<Arc<dyn LogStore>>,
{
    fn connect(&self, region: &str) -> Result<Arc<dyn LogStore>> {
        self(region)
    }
}
