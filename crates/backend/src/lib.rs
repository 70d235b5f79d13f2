//! Log store clients for run log retrieval
//!
//! This crate provides:
//! - [`LogsClient`]: the backend trait, with [`CloudWatchLogsClient`] for the
//!   managed cloud log store and [`LogsClientKind`] as the factory
//! - [`LogStore`]: the wire contract to the store, with [`MemoryLogStore`]
//! - [`ensure_namespace`]: idempotent namespace provisioning
//! - [`LogSettings`] and [`ConfigProvider`]: validated client configuration

#![warn(missing_docs)]

pub mod client;
pub mod cloudwatch;
pub mod config;
pub mod memory;
pub mod provision;
pub mod store;

pub use client::{LogsClient, LogsClientKind};
pub use cloudwatch::CloudWatchLogsClient;
pub use config::{ConfigError, ConfigProvider, LogSettings, MapConfig, OperatingMode, TomlConfig};
pub use memory::MemoryLogStore;
pub use provision::{ensure_namespace, Namespace};
pub use store::{
    GetLogEventsRequest, GetLogEventsResponse, LogEvent, LogStore, NamespaceDescription,
    StoreConnector, StoreError,
};
