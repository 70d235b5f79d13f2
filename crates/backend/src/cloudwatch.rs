//! Managed cloud log store client
//!
//! Reads the output of runs on the managed container engine. The engine's
//! log shipping agent writes each container to its own stream named
//!
//! ```text
//! <stream prefix>/<container name>/<task id>
//! ```
//!
//! where the task id is the last `/`-separated segment of the run's task
//! handle. [`CloudWatchLogsClient::stream_name`] derives the same name; any
//! other derivation finds no logs.
//!
//! ## Fetch outcomes
//!
//! | Store result | Returned |
//! |--------------|----------|
//! | events | sorted by timestamp, joined with `\n`, store's next token |
//! | no events | `""`, store's next token |
//! | stream not found | `Error::MissingResource` |
//! | throttled | `""`, the caller's cursor unchanged |
//! | anything else | `Error::Backend` with stream context |

use std::io::Write;
use std::sync::Arc;

use runlogs_core::{Cursor, Error, Executable, LogChunk, Result, Run};
use tracing::{debug, info, warn};

use crate::client::LogsClient;
use crate::config::{ConfigProvider, LogSettings, OperatingMode};
use crate::memory::MemoryLogStore;
use crate::provision::Namespace;
use crate::store::{GetLogEventsRequest, LogEvent, LogStore, StoreConnector};

/// Log client for the managed cloud log store
pub struct CloudWatchLogsClient {
    settings: LogSettings,
    store: Arc<dyn LogStore>,
    memory: Option<Arc<MemoryLogStore>>,
}

impl CloudWatchLogsClient {
    /// Backend name
    pub const NAME: &'static str = "ecs-cloudwatch";

    /// Create a client over an existing store handle
    ///
    /// Provisions the namespace before returning.
    pub fn with_store(settings: LogSettings, store: Arc<dyn LogStore>) -> Result<Self> {
        Namespace::new(settings.namespace.clone(), settings.retention_days).ensure(store.as_ref())?;
        info!(
            client = Self::NAME,
            namespace = %settings.namespace,
            stream_prefix = %settings.stream_prefix,
            retention_days = settings.retention_days,
            "logs client initialized"
        );
        Ok(CloudWatchLogsClient {
            settings,
            store,
            memory: None,
        })
    }

    /// Create a client over an in-memory store
    ///
    /// The store stays reachable through [`CloudWatchLogsClient::memory_store`].
    pub fn with_memory_store(settings: LogSettings, store: Arc<MemoryLogStore>) -> Result<Self> {
        let mut client = Self::with_store(settings, store.clone())?;
        client.memory = Some(store);
        Ok(client)
    }

    /// The in-memory store backing a test-mode client
    ///
    /// `None` for clients connected to a live store.
    pub fn memory_store(&self) -> Option<&Arc<MemoryLogStore>> {
        self.memory.as_ref()
    }

    /// Settings this client was initialized with
    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Stream holding `run`'s output for `executable`'s container
    pub fn stream_name(&self, executable: &Executable, run: &Run) -> String {
        stream_name(&self.settings.stream_prefix, executable.container_name(), run)
    }
}

/// Derive a stream name the way the shipping agent does
pub fn stream_name(prefix: &str, container_name: &str, run: &Run) -> String {
    let task_id = run
        .task_arn
        .as_deref()
        .and_then(|arn| arn.rsplit('/').next())
        .unwrap_or("");
    format!("{}/{}/{}", prefix, container_name, task_id)
}

/// Order events by timestamp and join their messages
///
/// The store does not guarantee delivery order. Events with equal timestamps
/// keep their delivery order.
pub fn events_to_message(mut events: Vec<LogEvent>) -> String {
    events.sort_by_key(|event| event.timestamp);
    events
        .into_iter()
        .map(|event| event.message)
        .collect::<Vec<_>>()
        .join("\n")
}

impl LogsClient for CloudWatchLogsClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn initialize(config: &dyn ConfigProvider, connector: &dyn StoreConnector) -> Result<Self> {
        let settings = LogSettings::from_config(Self::NAME, config)?;
        match settings.mode {
            OperatingMode::Test => Self::with_memory_store(settings, Arc::new(MemoryLogStore::new())),
            OperatingMode::Live => {
                let store = connector.connect(&settings.region)?;
                Self::with_store(settings, store)
            }
        }
    }

    fn logs(&self, executable: &Executable, run: &Run, last_seen: Option<&Cursor>) -> Result<LogChunk> {
        let stream = self.stream_name(executable, run);
        let request = GetLogEventsRequest {
            namespace: self.settings.namespace.clone(),
            stream,
            start_from_head: true,
            next_token: last_seen
                .filter(|cursor| !cursor.is_empty())
                .map(|cursor| cursor.as_str().to_string()),
        };
        debug!(
            run_id = %run.run_id,
            stream = %request.stream,
            resume = request.next_token.is_some(),
            "fetching logs"
        );

        let response = match self.store.get_log_events(&request) {
            Ok(response) => response,
            Err(e) if e.is_resource_not_found() => {
                return Err(Error::MissingResource {
                    message: format!("{} (stream [{}])", e, request.stream),
                });
            }
            Err(e) if e.is_throttle() => {
                warn!(
                    executable_id = %executable.executable_id,
                    run_id = %run.run_id,
                    error = %e,
                    "throttled getting logs"
                );
                return Ok(LogChunk::unchanged(last_seen.cloned()));
            }
            Err(e) => {
                return Err(Error::backend_with_source(
                    format!(
                        "problem getting logs for run [{}] from stream [{}]",
                        run.run_id, request.stream
                    ),
                    e,
                ));
            }
        };

        let next = response.next_forward_token.map(Cursor::from);
        if response.events.is_empty() {
            return Ok(LogChunk::unchanged(next));
        }
        Ok(LogChunk {
            text: events_to_message(response.events),
            next,
        })
    }

    fn logs_text(&self, _executable: &Executable, _run: &Run, _sink: &mut dyn Write) -> Result<()> {
        Err(Error::NotSupported {
            client: Self::NAME,
            operation: "logs_text",
        })
    }
}
