//! Public types for the Runlogs API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Run types
pub use runlogs_core::Engine;
pub use runlogs_core::Run;
pub use runlogs_core::RunStatus;

// Executable types
pub use runlogs_core::Executable;
pub use runlogs_core::ExecutableResources;
pub use runlogs_core::ExecutableType;

// Positions and fetched text
pub use runlogs_core::Cursor;
pub use runlogs_core::LogChunk;
