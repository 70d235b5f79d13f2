//! Log client trait and factory
//!
//! Defines the interface every log backend implements. The orchestrator only
//! talks to [`LogsClient`]; supporting another backend means adding an
//! implementation and a [`LogsClientKind`] variant.

use std::io::Write;

use runlogs_core::{Cursor, Executable, LogChunk, Result, Run};

use crate::cloudwatch::CloudWatchLogsClient;
use crate::config::ConfigProvider;
use crate::store::StoreConnector;

/// Trait for swappable log backends
///
/// Implementations hold only immutable settings and a shared store handle,
/// so one client serves any number of concurrent callers.
pub trait LogsClient: Send + Sync {
    /// Stable identifier for this backend
    fn name(&self) -> &'static str;

    /// Validate settings, connect, and provision the namespace
    ///
    /// A client that fails to initialize is never constructed.
    fn initialize(config: &dyn ConfigProvider, connector: &dyn StoreConnector) -> Result<Self>
    where
        Self: Sized;

    /// Fetch output after `last_seen`
    ///
    /// `None` (or an empty cursor) reads from the head of the stream. The
    /// returned cursor must be passed back unchanged on the next call for the
    /// same run.
    fn logs(&self, executable: &Executable, run: &Run, last_seen: Option<&Cursor>) -> Result<LogChunk>;

    /// Write the run's output directly to `sink`
    ///
    /// Backends that cannot stream return [`runlogs_core::Error::NotSupported`].
    fn logs_text(&self, executable: &Executable, run: &Run, sink: &mut dyn Write) -> Result<()>;
}

/// Factory for creating log clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogsClientKind {
    /// Managed container service logs in the managed cloud log store
    #[default]
    EcsCloudWatch,
}

impl LogsClientKind {
    /// All known backends
    pub const ALL: &'static [LogsClientKind] = &[LogsClientKind::EcsCloudWatch];

    /// Name the backend reports from [`LogsClient::name`]
    pub fn name(&self) -> &'static str {
        match self {
            LogsClientKind::EcsCloudWatch => CloudWatchLogsClient::NAME,
        }
    }

    /// Look up a backend by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Create and initialize a client
    pub fn create(
        &self,
        config: &dyn ConfigProvider,
        connector: &dyn StoreConnector,
    ) -> Result<Box<dyn LogsClient>> {
        match self {
            LogsClientKind::EcsCloudWatch => {
                let client = CloudWatchLogsClient::initialize(config, connector)?;
                Ok(Box::new(client))
            }
        }
    }
}

impl std::fmt::Display for LogsClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
