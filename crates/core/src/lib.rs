//! Core types for run log retrieval
//!
//! This crate defines the shared vocabulary of the run log crates:
//! - [`Run`], [`RunStatus`], [`Engine`]: execution records read from state
//! - [`Executable`], [`ExecutableType`]: where a run's container executed
//! - [`Cursor`], [`LogChunk`]: positions and fetched text
//! - [`Error`]: the retrieval error taxonomy

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod types;

pub use cursor::{Cursor, LogChunk};
pub use error::{Error, Result};
pub use types::{Engine, Executable, ExecutableResources, ExecutableType, Run, RunStatus};
