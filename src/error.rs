//! Error types for Runlogs.
//!
//! One error type covers the whole crate. Classification helpers tell a
//! polling caller what to do next:
//!
//! - [`Error::is_retryable`]: poll again later (stream not created yet)
//! - [`Error::is_not_found`]: the run or its executable does not exist
//! - anything else is fatal for this request

pub use runlogs_core::error::{Error, Result};
