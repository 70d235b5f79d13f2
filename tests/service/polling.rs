//! Polling tests
//!
//! A caller polls by replaying each returned cursor. These tests check that
//! repeated and concurrent polling neither drops nor duplicates output.

use std::thread;

use crate::common::*;
use runlogs::backend::{MemoryLogStore, StoreError};
use runlogs::{Cursor, LogService, Result, RunStatus};

/// Poll until a page comes back empty, collecting every line.
fn drain(service: &LogService, run_id: &str, cursor: &mut Option<Cursor>) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let chunk = service.logs(run_id, cursor.as_ref())?;
        *cursor = chunk.next;
        if chunk.text.is_empty() {
            return Ok(lines);
        }
        lines.extend(chunk.text.split('\n').map(String::from));
    }
}

// =============================================================================
// Single Run
// =============================================================================

/// Output arriving between polls is delivered exactly once
#[test]
fn test_incremental_polling_no_duplicates() {
    let h = Harness::with_store(MemoryLogStore::with_page_size(2));
    h.definition("def");
    let run = h.ecs_run("r1", "def", "t1");

    let mut cursor = None;
    h.emit("t1", &[(1, "one"), (2, "two"), (3, "three")]);
    assert_eq!(drain(&h.service, "r1", &mut cursor).unwrap(), ["one", "two", "three"]);

    h.emit("t1", &[(4, "four")]);
    h.set_status(&run, RunStatus::Stopped);
    assert_eq!(drain(&h.service, "r1", &mut cursor).unwrap(), ["four"]);
    assert!(drain(&h.service, "r1", &mut cursor).unwrap().is_empty());
}

/// A throttled poll loses nothing; the next poll resumes where it left off
#[test]
fn test_throttle_mid_stream() {
    let h = Harness::with_store(MemoryLogStore::with_page_size(1));
    h.definition("def");
    h.ecs_run("r1", "def", "t1");
    h.emit("t1", &[(1, "a"), (2, "b")]);

    let first = h.service.logs("r1", None).unwrap();
    assert_eq!(first.text, "a");

    h.store.fail_next_fetch(StoreError::throttled("Rate exceeded"));
    let throttled = h.service.logs("r1", first.next.as_ref()).unwrap();
    assert!(throttled.is_empty());
    assert_eq!(throttled.next, first.next);

    let resumed = h.service.logs("r1", throttled.next.as_ref()).unwrap();
    assert_eq!(resumed.text, "b");
}

/// Polling before the run starts and after the stream appears
#[test]
fn test_poll_through_lifecycle() {
    let h = Harness::new();
    h.definition("def");
    let run = h.ecs_run("r1", "def", "t1");
    h.set_status(&run, RunStatus::Queued);

    let chunk = h.service.logs("r1", None).unwrap();
    assert!(chunk.is_empty() && chunk.next.is_none());

    h.set_status(&run, RunStatus::Running);
    assert!(h.service.logs("r1", None).unwrap_err().is_missing_resource());

    h.emit("t1", &[(10, "started")]);
    assert_eq!(h.service.logs("r1", None).unwrap().text, "started");
}

// =============================================================================
// Many Runs
// =============================================================================

/// Concurrent pollers of different runs each see only their own output
#[test]
fn test_concurrent_runs_are_isolated() {
    let h = Harness::with_store(MemoryLogStore::with_page_size(7));
    h.definition("def");

    let runs: Vec<String> = (0..8).map(|i| format!("run-{}", i)).collect();
    for (i, run_id) in runs.iter().enumerate() {
        let task_id = format!("task-{}", i);
        h.ecs_run(run_id, "def", &task_id);
        let events: Vec<(i64, String)> = (0..25)
            .rev()
            .map(|n| (n as i64, format!("{}:{}", run_id, n)))
            .collect();
        let borrowed: Vec<(i64, &str)> = events.iter().map(|(ts, m)| (*ts, m.as_str())).collect();
        h.emit(&task_id, &borrowed);
    }

    thread::scope(|scope| {
        for run_id in &runs {
            let service = h.service.clone();
            scope.spawn(move || {
                let mut cursor = None;
                let lines = drain(&service, run_id, &mut cursor).unwrap();
                assert_eq!(lines.len(), 25);
                assert!(lines.iter().all(|line| line.starts_with(&format!("{}:", run_id))));
            });
        }
    });
}
