//! Convenient imports for Runlogs.
//!
//! ```ignore
//! use runlogs::prelude::*;
//!
//! let service = LogService::new(state, client);
//! let chunk = service.logs("run-1", None)?;
//! ```

// Main entry point
pub use crate::service::LogService;

// Error handling
pub use crate::error::{Error, Result};

// State lookups
pub use crate::state::{MemoryState, StateManager};

// Core types
pub use crate::types::{Cursor, Engine, Executable, ExecutableType, LogChunk, Run, RunStatus};

// Backends and configuration
pub use runlogs_backend::{
    ConfigProvider, LogsClient, LogsClientKind, MapConfig, StoreConnector, TomlConfig,
};
