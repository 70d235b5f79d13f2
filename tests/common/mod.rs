//! Shared fixtures for integration tests.
//!
//! Builds a [`LogService`] over in-memory state and the managed cloud client
//! backed by a [`MemoryLogStore`], so tests can seed runs, executables and
//! log events directly.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use runlogs::backend::{CloudWatchLogsClient, LogEvent, LogSettings, MemoryLogStore, OperatingMode};
use runlogs::{Engine, Executable, ExecutableType, LogService, MemoryState, Run, RunStatus};

pub const NAMESPACE: &str = "flotilla-runs";
pub const PREFIX: &str = "flotilla";
pub const CONTAINER: &str = "main";

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub struct Harness {
    pub service: LogService,
    pub state: Arc<MemoryState>,
    pub store: Arc<MemoryLogStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryLogStore::new())
    }

    pub fn with_store(store: MemoryLogStore) -> Self {
        init_tracing();
        let store = Arc::new(store);
        let settings = LogSettings {
            region: "us-east-1".to_string(),
            namespace: NAMESPACE.to_string(),
            stream_prefix: PREFIX.to_string(),
            retention_days: 30,
            mode: OperatingMode::Live,
        };
        let client = CloudWatchLogsClient::with_store(settings, store.clone())
            .expect("client initializes against memory store");
        let state = Arc::new(MemoryState::new());
        let service = LogService::new(state.clone(), Arc::new(client));
        Harness {
            service,
            state,
            store,
        }
    }

    /// Register a task definition executable with the default container.
    pub fn definition(&self, definition_id: &str) {
        self.state.put_executable(Executable::new(
            ExecutableType::Definition,
            definition_id,
            CONTAINER,
        ));
    }

    /// Register a running ecs run for `definition_id` with task id `task_id`.
    pub fn ecs_run(&self, run_id: &str, definition_id: &str, task_id: &str) -> Run {
        let run = Run::new(run_id, definition_id, RunStatus::Running)
            .with_engine(Engine::Ecs)
            .with_task_arn(task_arn(task_id));
        self.state.put_run(run.clone());
        run
    }

    pub fn set_status(&self, run: &Run, status: RunStatus) {
        let mut run = run.clone();
        run.status = status;
        self.state.put_run(run);
    }

    /// Append events to the stream of a run on the default container.
    pub fn emit(&self, task_id: &str, events: &[(i64, &str)]) {
        self.store.append(
            NAMESPACE,
            &stream(task_id),
            events.iter().map(|(ts, msg)| LogEvent::new(*ts, *msg)),
        );
    }
}

pub fn task_arn(task_id: &str) -> String {
    format!("arn:aws:ecs:us-east-1:123456789012:task/default/{}", task_id)
}

pub fn stream(task_id: &str) -> String {
    format!("{}/{}/{}", PREFIX, CONTAINER, task_id)
}
