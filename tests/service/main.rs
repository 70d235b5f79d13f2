//! LogService Integration Tests
//!
//! Tests for runlogs: status gating, executable resolution, fetch outcomes
//! and concurrent polling against the in-memory log store.

#[path = "../common/mod.rs"]
mod common;

mod fetch;
mod polling;
