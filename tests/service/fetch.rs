//! Fetch outcome tests
//!
//! Tests for what LogService::logs returns for each store outcome:
//! - runs that cannot have logs
//! - ordering and joining of events
//! - empty pages, missing streams, throttling, fatal errors

use crate::common::*;
use runlogs::backend::StoreError;
use runlogs::{Cursor, Error, LogChunk, RunStatus};

// =============================================================================
// Status Gate
// =============================================================================

/// Queued, pending and needs-retry runs return nothing and never reach the store
#[test]
fn test_not_started_runs_skip_store() {
    let h = Harness::new();
    h.definition("def");
    let run = h.ecs_run("r1", "def", "t1");
    h.emit("t1", &[(1, "should not be read")]);

    for status in [RunStatus::Queued, RunStatus::Pending, RunStatus::NeedsRetry] {
        h.set_status(&run, status);
        let chunk = h.service.logs("r1", Some(&Cursor::new("f/1"))).unwrap();
        assert_eq!(chunk, LogChunk::empty(), "status {}", status);
    }
    assert_eq!(h.store.fetch_calls(), 0);
    assert!(h.state.executable_lookups().is_empty());
}

/// Stopped runs still return their output
#[test]
fn test_stopped_run_has_logs() {
    let h = Harness::new();
    h.definition("def");
    let run = h.ecs_run("r1", "def", "t1");
    h.emit("t1", &[(1, "done")]);
    h.set_status(&run, RunStatus::Stopped);

    assert_eq!(h.service.logs("r1", None).unwrap().text, "done");
}

/// Unknown runs are an error, not an empty result
#[test]
fn test_unknown_run() {
    let h = Harness::new();
    let err = h.service.logs("nope", None).unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_retryable());
}

// =============================================================================
// Events
// =============================================================================

/// Events delivered out of order come back sorted by timestamp
#[test]
fn test_events_sorted_by_timestamp() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "abc123");
    h.emit("abc123", &[(3, "c"), (1, "a"), (2, "b")]);

    let chunk = h.service.logs("r1", None).unwrap();
    assert_eq!(chunk.text, "a\nb\nc");
    assert!(chunk.next.is_some());
}

/// No events is a normal outcome carrying the store's token
#[test]
fn test_empty_page_returns_store_token() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "t1");
    h.store.create_stream(NAMESPACE, &stream("t1"));

    let chunk = h.service.logs("r1", None).unwrap();
    assert_eq!(chunk.text, "");
    assert_eq!(chunk.next, Some(Cursor::new("f/00000000000000000000")));
}

// =============================================================================
// Errors
// =============================================================================

/// A stream the shipping agent has not created yet is a missing resource
#[test]
fn test_missing_stream() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "t1");

    let err = h.service.logs("r1", None).unwrap_err();
    assert!(matches!(err, Error::MissingResource { .. }));
    assert!(err.is_retryable());

    // Once the stream appears the same call succeeds.
    h.emit("t1", &[(1, "up")]);
    assert_eq!(h.service.logs("r1", None).unwrap().text, "up");
}

/// Throttling hands back the caller's cursor with no text
#[test]
fn test_throttle_keeps_cursor() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "t1");
    h.emit("t1", &[(1, "a")]);

    let first = h.service.logs("r1", None).unwrap();
    h.store.fail_next_fetch(StoreError::throttled("Rate exceeded"));

    let throttled = h.service.logs("r1", first.next.as_ref()).unwrap();
    assert_eq!(throttled, LogChunk::unchanged(first.next.clone()));
}

/// Throttling is also recognised by HTTP status alone
#[test]
fn test_throttle_by_status() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "t1");
    h.store
        .fail_next_fetch(StoreError::new("ServiceUnavailableException", "busy").with_status(429));

    let cursor = Cursor::new("f/00000000000000000003");
    let chunk = h.service.logs("r1", Some(&cursor)).unwrap();
    assert_eq!(chunk.next, Some(cursor));
    assert!(chunk.is_empty());
}

/// Unclassified store errors are fatal and carry context
#[test]
fn test_unclassified_error_is_fatal() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "t1");
    h.store
        .fail_next_fetch(StoreError::new("AccessDeniedException", "not authorized").with_status(403));

    let err = h.service.logs("r1", None).unwrap_err();
    assert!(!err.is_retryable());
    let msg = err.to_string();
    assert!(msg.contains("problem getting logs"));
    assert!(msg.contains("r1"));
    assert!(msg.contains(&stream("t1")));
}

/// The managed cloud client cannot stream and says so
#[test]
fn test_logs_text_not_supported() {
    let h = Harness::new();
    h.definition("def");
    h.ecs_run("r1", "def", "t1");
    h.emit("t1", &[(1, "a")]);

    let mut sink = Vec::new();
    let err = h.service.logs_text("r1", &mut sink).unwrap_err();
    assert!(matches!(err, Error::NotSupported { .. }));
    assert!(err.to_string().contains("does not support"));
    assert!(sink.is_empty());
}

/// Streaming a run that has not started writes nothing and succeeds
#[test]
fn test_logs_text_not_started() {
    let h = Harness::new();
    h.definition("def");
    let run = h.ecs_run("r1", "def", "t1");
    h.set_status(&run, RunStatus::Pending);

    let mut sink = Vec::new();
    h.service.logs_text("r1", &mut sink).unwrap();
    assert!(sink.is_empty());
}
