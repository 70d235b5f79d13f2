//! # Runlogs
//!
//! Run log retrieval for the task execution platform.
//!
//! Given a run id, Runlogs locates the run's log stream, fetches output
//! written since a previously returned position, and hands back the text with
//! an opaque continuation cursor.
//!
//! ## Quick Start
//!
//! ```ignore
//! use runlogs::prelude::*;
//!
//! let config = TomlConfig::load("./runlogs.toml")?;
//! let client = LogsClientKind::EcsCloudWatch.create(&config, &connector)?;
//! let service = LogService::new(state, Arc::from(client));
//!
//! let chunk = service.logs("run-1", None)?;
//! print!("{}", chunk.text);
//! let more = service.logs("run-1", chunk.next.as_ref())?;
//! ```
//!
//! ## Polling outcomes
//!
//! | Situation | `logs` returns |
//! |-----------|----------------|
//! | Run queued or pending | `Ok`, empty text, no cursor |
//! | Stream not created yet | `Err(Error::MissingResource)` |
//! | Store throttled the call | `Ok`, empty text, the cursor passed in |
//! | New output | `Ok`, text oldest first, next cursor |
//! | No new output | `Ok`, empty text, next cursor |
//!
//! ## Components
//!
//! - [`LogService`] - status gate, executable resolution, delegation
//! - [`backend::LogsClient`] - one implementation per log backend
//! - [`StateManager`] - run and executable lookups

#![warn(missing_docs)]

mod error;
mod service;
mod state;
mod types;

pub mod prelude;

/// Log backends, store wire contract and configuration
pub use runlogs_backend as backend;

// Re-export main entry points
pub use error::{Error, Result};
pub use service::LogService;
pub use state::{MemoryState, StateManager};

// Re-export types
pub use types::*;
