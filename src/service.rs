//! Run log service.
//!
//! [`LogService`] is the caller-facing entry point. For a run id it:
//!
//! 1. loads the run (load failures are returned as-is)
//! 2. returns nothing unless the run is running or stopped
//! 3. resolves the run's executable, defaulting the type to task definition
//!    and the id to the run's definition id
//! 4. hands the run and executable to the [`LogsClient`]
//!
//! The service holds no per-run state. Positions travel in the caller's
//! [`Cursor`], so any number of runs can be polled concurrently through one
//! service. Nothing here retries; a throttled fetch already comes back from
//! the client as an empty chunk with the caller's cursor.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::LogsClient;
use crate::error::Result;
use crate::state::StateManager;
use crate::types::{Cursor, Executable, LogChunk, Run};

/// Fetches run output through a log client.
///
/// # Example
///
/// ```ignore
/// let service = LogService::new(state, client);
///
/// let mut cursor = None;
/// loop {
///     let chunk = service.logs("run-1", cursor.as_ref())?;
///     print!("{}", chunk.text);
///     cursor = chunk.next;
/// }
/// ```
#[derive(Clone)]
pub struct LogService {
    state: Arc<dyn StateManager>,
    client: Arc<dyn LogsClient>,
}

impl LogService {
    /// Create a service over a state manager and an initialized client.
    pub fn new(state: Arc<dyn StateManager>, client: Arc<dyn LogsClient>) -> Self {
        Self { state, client }
    }

    /// Name of the log client in use.
    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    /// Fetch output of `run_id` after `last_seen`.
    ///
    /// Runs that are not running or stopped yield an empty chunk with no
    /// cursor, without contacting the log store.
    pub fn logs(&self, run_id: &str, last_seen: Option<&Cursor>) -> Result<LogChunk> {
        match self.resolve(run_id)? {
            Some((run, executable)) => self.client.logs(&executable, &run, last_seen),
            None => Ok(LogChunk::empty()),
        }
    }

    /// Write output of `run_id` to `sink`.
    ///
    /// Runs that are not running or stopped write nothing.
    pub fn logs_text(&self, run_id: &str, sink: &mut dyn Write) -> Result<()> {
        match self.resolve(run_id)? {
            Some((run, executable)) => self.client.logs_text(&executable, &run, sink),
            None => Ok(()),
        }
    }

    fn resolve(&self, run_id: &str) -> Result<Option<(Run, Executable)>> {
        let run = self.state.get_run(run_id)?;
        if !run.status.may_have_logs() {
            debug!(run_id, status = %run.status, "run has no logs yet");
            return Ok(None);
        }

        let (executable_type, executable_id) = run.executable_key();
        let executable = match self
            .state
            .get_executable_by_type_and_id(executable_type, executable_id)
        {
            Ok(executable) => executable,
            // The managed-cloud stream name needs the container name.
            Err(e) if run.is_managed_cloud() => return Err(e),
            Err(e) => {
                // TODO: decide whether non-ecs engines should fail here as well;
                // continuing can hide a misconfigured executable.
                warn!(
                    run_id,
                    engine = run.engine.as_ref().map_or("none", |engine| engine.as_str()),
                    %executable_type,
                    executable_id,
                    error = %e,
                    "executable lookup failed, continuing without it"
                );
                Executable::placeholder()
            }
        };
        Ok(Some((run, executable)))
    }
}
