//! Run and executable lookups.
//!
//! The log service reads runs and executables through [`StateManager`]. The
//! persistence layer behind it is owned elsewhere; [`MemoryState`] is an
//! in-process implementation for embedding and tests.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::types::{Executable, ExecutableType, Run};

/// Read access to runs and executables.
pub trait StateManager: Send + Sync {
    /// Load a run by id.
    ///
    /// Returns [`Error::RunNotFound`] when no such run exists.
    fn get_run(&self, run_id: &str) -> Result<Run>;

    /// Load an executable by type and id.
    ///
    /// Returns [`Error::ExecutableNotFound`] when no such executable exists.
    fn get_executable_by_type_and_id(
        &self,
        executable_type: ExecutableType,
        executable_id: &str,
    ) -> Result<Executable>;
}

/// State held in memory.
#[derive(Default)]
pub struct MemoryState {
    runs: RwLock<HashMap<String, Run>>,
    executables: RwLock<HashMap<(ExecutableType, String), Executable>>,
    executable_lookups: Mutex<Vec<(ExecutableType, String)>>,
}

impl MemoryState {
    /// Create empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a run.
    pub fn put_run(&self, run: Run) {
        self.runs.write().insert(run.run_id.clone(), run);
    }

    /// Insert or replace an executable.
    pub fn put_executable(&self, executable: Executable) {
        let key = (executable.executable_type, executable.executable_id.clone());
        self.executables.write().insert(key, executable);
    }

    /// Every (type, id) pair looked up so far, oldest first.
    pub fn executable_lookups(&self) -> Vec<(ExecutableType, String)> {
        self.executable_lookups.lock().clone()
    }
}

impl StateManager for MemoryState {
    fn get_run(&self, run_id: &str) -> Result<Run> {
        self.runs
            .read()
            .get(run_id)
            .cloned()
            .ok_or_else(|| Error::RunNotFound {
                run_id: run_id.to_string(),
            })
    }

    fn get_executable_by_type_and_id(
        &self,
        executable_type: ExecutableType,
        executable_id: &str,
    ) -> Result<Executable> {
        self.executable_lookups
            .lock()
            .push((executable_type, executable_id.to_string()));
        self.executables
            .read()
            .get(&(executable_type, executable_id.to_string()))
            .cloned()
            .ok_or_else(|| Error::ExecutableNotFound {
                executable_type: executable_type.to_string(),
                executable_id: executable_id.to_string(),
            })
    }
}
