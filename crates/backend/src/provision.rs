//! Namespace provisioning
//!
//! Ensures the log namespace exists with a retention policy before a client
//! reads from it. Runs once at initialization; failures are returned, never
//! retried.
//!
//! The check-then-create sequence is not atomic. Two processes starting at
//! once may both see the namespace as absent; the loser's create fails with
//! already-exists, which is treated as success.

use runlogs_core::{Error, Result};
use tracing::{debug, info};

use crate::store::LogStore;

/// A log namespace and its retention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Namespace name
    pub name: String,
    /// Retention in days
    pub retention_days: u32,
}

impl Namespace {
    /// Create a namespace description
    pub fn new(name: impl Into<String>, retention_days: u32) -> Self {
        Namespace {
            name: name.into(),
            retention_days,
        }
    }

    /// Create the namespace if it does not exist
    pub fn ensure(&self, store: &dyn LogStore) -> Result<()> {
        ensure_namespace(store, &self.name, self.retention_days)
    }
}

/// Create `name` with `retention_days` unless a namespace with exactly that
/// name already exists
pub fn ensure_namespace(store: &dyn LogStore, name: &str, retention_days: u32) -> Result<()> {
    let exists = namespace_exists(store, name).map_err(|e| {
        Error::backend_with_source(
            format!("problem checking if log namespace [{}] exists", name),
            e,
        )
    })?;
    if exists {
        debug!(namespace = name, "log namespace exists");
        return Ok(());
    }

    match store.create_namespace(name) {
        Ok(()) => info!(namespace = name, "created log namespace"),
        Err(e) if e.is_already_exists() => {
            debug!(namespace = name, "log namespace created concurrently");
        }
        Err(e) => {
            return Err(Error::backend_with_source(
                format!("problem creating log group with log group name [{}]", name),
                e,
            ))
        }
    }

    store.put_retention_policy(name, retention_days).map_err(|e| {
        Error::backend_with_source(
            format!(
                "problem setting log group retention policy for log group name [{}]",
                name
            ),
            e,
        )
    })?;
    info!(namespace = name, retention_days, "set log namespace retention");
    Ok(())
}

/// Check whether a namespace named exactly `name` exists
///
/// The store lists by prefix, so `runs` also returns `runs-dev`; only an
/// exact match counts.
pub fn namespace_exists(store: &dyn LogStore, name: &str) -> Result<bool> {
    let namespaces = store.describe_namespaces(name).map_err(|e| {
        Error::backend_with_source(
            format!("problem describing log groups with prefix [{}]", name),
            e,
        )
    })?;
    Ok(namespaces.iter().any(|ns| ns.name == name))
}
