//! Run and executable types
//!
//! This module defines the records the log subsystem reads from the state
//! layer:
//! - [`Run`]: one execution instance, with its status and backend handles
//! - [`Executable`]: where a run's container executed
//!
//! Both are owned by the state layer. Log retrieval only reads them.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a run
///
/// Only [`RunStatus::Running`] and [`RunStatus::Stopped`] runs can have log
/// output; every other status means the container has not started yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Accepted, waiting for capacity
    Queued,
    /// Placed, container not started
    Pending,
    /// Failed placement, will be queued again
    NeedsRetry,
    /// Container running
    Running,
    /// Container exited
    Stopped,
}

impl RunStatus {
    /// Check if a run in this status may have produced log output
    pub fn may_have_logs(&self) -> bool {
        matches!(self, RunStatus::Running | RunStatus::Stopped)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "QUEUED",
            RunStatus::Pending => "PENDING",
            RunStatus::NeedsRetry => "NEEDS_RETRY",
            RunStatus::Running => "RUNNING",
            RunStatus::Stopped => "STOPPED",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution engine a run was launched on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Managed container service; logs live in the managed cloud log store
    Ecs,
    /// Kubernetes
    Eks,
    /// Any engine this crate has no special handling for
    #[serde(untagged)]
    Other(String),
}

impl Engine {
    /// Check if this is the managed-cloud engine
    pub fn is_managed_cloud(&self) -> bool {
        matches!(self, Engine::Ecs)
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Engine::Ecs => "ecs",
            Engine::Eks => "eks",
            Engine::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of executable a run was launched from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutableType {
    /// A registered task definition
    #[default]
    #[serde(rename = "task_definition")]
    Definition,
    /// A parameterised template
    #[serde(rename = "template")]
    Template,
}

impl ExecutableType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutableType::Definition => "task_definition",
            ExecutableType::Template => "template",
        }
    }
}

impl std::fmt::Display for ExecutableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One execution instance of a task
///
/// Runs written before executables were introduced carry neither
/// `executable_type` nor `executable_id`; [`Run::executable_key`] supplies
/// the defaults for those records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run identifier
    pub run_id: String,
    /// Current lifecycle status
    pub status: RunStatus,
    /// Kind of executable, if recorded
    #[serde(default)]
    pub executable_type: Option<ExecutableType>,
    /// Executable identifier, if recorded
    #[serde(default)]
    pub executable_id: Option<String>,
    /// Definition the run was launched from
    pub definition_id: String,
    /// Engine the run was launched on
    #[serde(default)]
    pub engine: Option<Engine>,
    /// Backend task handle, e.g. `arn:aws:ecs:us-east-1:123:task/cluster/abc123`
    #[serde(default)]
    pub task_arn: Option<String>,
}

impl Run {
    /// Create a run with only the required fields set
    pub fn new(run_id: impl Into<String>, definition_id: impl Into<String>, status: RunStatus) -> Self {
        Run {
            run_id: run_id.into(),
            status,
            executable_type: None,
            executable_id: None,
            definition_id: definition_id.into(),
            engine: None,
            task_arn: None,
        }
    }

    /// Set the engine
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Set the backend task handle
    pub fn with_task_arn(mut self, task_arn: impl Into<String>) -> Self {
        self.task_arn = Some(task_arn.into());
        self
    }

    /// Set the executable this run was launched from
    pub fn with_executable(mut self, executable_type: ExecutableType, executable_id: impl Into<String>) -> Self {
        self.executable_type = Some(executable_type);
        self.executable_id = Some(executable_id.into());
        self
    }

    /// The (type, id) pair used to look up this run's executable
    ///
    /// Missing type defaults to [`ExecutableType::Definition`]; missing id
    /// defaults to `definition_id`.
    pub fn executable_key(&self) -> (ExecutableType, &str) {
        let executable_type = self.executable_type.unwrap_or_default();
        let executable_id = self.executable_id.as_deref().unwrap_or(&self.definition_id);
        (executable_type, executable_id)
    }

    /// Check if this run executed on the managed-cloud engine
    pub fn is_managed_cloud(&self) -> bool {
        self.engine.as_ref().map_or(false, Engine::is_managed_cloud)
    }
}

/// Container resources of an executable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableResources {
    /// Container name the log shipping agent uses in stream names
    pub container_name: String,
}

/// Where a run's container executed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executable {
    /// Kind of executable
    pub executable_type: ExecutableType,
    /// Executable identifier
    pub executable_id: String,
    /// Container resources
    pub resources: ExecutableResources,
}

impl Executable {
    /// Create an executable
    pub fn new(
        executable_type: ExecutableType,
        executable_id: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Executable {
            executable_type,
            executable_id: executable_id.into(),
            resources: ExecutableResources {
                container_name: container_name.into(),
            },
        }
    }

    /// Placeholder passed to clients when resolution failed for an engine
    /// that does not need the executable to locate logs
    pub fn placeholder() -> Self {
        Executable::default()
    }

    /// Container name used in stream handles
    pub fn container_name(&self) -> &str {
        &self.resources.container_name
    }
}
