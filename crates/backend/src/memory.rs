//! In-memory log store
//!
//! Implements the [`LogStore`] wire contract without a network:
//! - prefix listing of namespaces
//! - head reads and forward tokens (`f/<offset>`) with a configurable page size
//! - not-found and already-exists errors with the store's codes
//!
//! Used when the operating mode is `test`, and by tests that need to seed
//! events or inject failures.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::store::{
    GetLogEventsRequest, GetLogEventsResponse, LogEvent, LogStore, NamespaceDescription,
    StoreError,
};

const DEFAULT_PAGE_SIZE: usize = 10_000;

/// Log store held entirely in memory
pub struct MemoryLogStore {
    namespaces: RwLock<BTreeMap<String, Option<u32>>>,
    streams: RwLock<HashMap<(String, String), Vec<LogEvent>>>,
    page_size: usize,
    fetch_failures: Mutex<VecDeque<StoreError>>,
    create_failures: Mutex<VecDeque<StoreError>>,
    create_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MemoryLogStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty store that returns at most `page_size` events per fetch
    pub fn with_page_size(page_size: usize) -> Self {
        MemoryLogStore {
            namespaces: RwLock::new(BTreeMap::new()),
            streams: RwLock::new(HashMap::new()),
            page_size: page_size.max(1),
            fetch_failures: Mutex::new(VecDeque::new()),
            create_failures: Mutex::new(VecDeque::new()),
            create_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Append events to a stream, creating it if needed
    ///
    /// Events are kept in append order; nothing is sorted.
    pub fn append(&self, namespace: &str, stream: &str, events: impl IntoIterator<Item = LogEvent>) {
        self.streams
            .write()
            .entry((namespace.to_string(), stream.to_string()))
            .or_default()
            .extend(events);
    }

    /// Create a stream with no events
    pub fn create_stream(&self, namespace: &str, stream: &str) {
        self.append(namespace, stream, std::iter::empty());
    }

    /// Fail the next fetch with `err`
    pub fn fail_next_fetch(&self, err: StoreError) {
        self.fetch_failures.lock().push_back(err);
    }

    /// Fail the next namespace creation with `err`
    pub fn fail_next_create(&self, err: StoreError) {
        self.create_failures.lock().push_back(err);
    }

    /// Retention of a namespace; `None` if it does not exist
    pub fn retention(&self, namespace: &str) -> Option<Option<u32>> {
        self.namespaces.read().get(namespace).copied()
    }

    /// Number of successful namespace creations
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of fetches attempted
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_token(token: &str) -> Result<usize, StoreError> {
    token
        .strip_prefix("f/")
        .and_then(|offset| offset.parse().ok())
        .ok_or_else(|| {
            StoreError::new(
                "InvalidParameterException",
                format!("The specified nextToken is invalid: {}", token),
            )
        })
}

fn forward_token(offset: usize) -> String {
    format!("f/{:020}", offset)
}

impl LogStore for MemoryLogStore {
    fn describe_namespaces(&self, prefix: &str) -> Result<Vec<NamespaceDescription>, StoreError> {
        Ok(self
            .namespaces
            .read()
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, retention)| NamespaceDescription {
                name: name.clone(),
                retention_days: *retention,
            })
            .collect())
    }

    fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        if let Some(err) = self.create_failures.lock().pop_front() {
            return Err(err);
        }
        let mut namespaces = self.namespaces.write();
        if namespaces.contains_key(name) {
            return Err(StoreError::already_exists(
                "The specified log group already exists",
            ));
        }
        namespaces.insert(name.to_string(), None);
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn put_retention_policy(&self, name: &str, retention_days: u32) -> Result<(), StoreError> {
        match self.namespaces.write().get_mut(name) {
            Some(retention) => {
                *retention = Some(retention_days);
                Ok(())
            }
            None => Err(StoreError::resource_not_found(
                "The specified log group does not exist.",
            )),
        }
    }

    fn get_log_events(&self, request: &GetLogEventsRequest) -> Result<GetLogEventsResponse, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fetch_failures.lock().pop_front() {
            return Err(err);
        }
        if !self.namespaces.read().contains_key(&request.namespace) {
            return Err(StoreError::resource_not_found(
                "The specified log group does not exist.",
            ));
        }

        let streams = self.streams.read();
        let events = streams
            .get(&(request.namespace.clone(), request.stream.clone()))
            .ok_or_else(|| {
                StoreError::resource_not_found("The specified log stream does not exist.")
            })?;

        let start = match &request.next_token {
            Some(token) => parse_token(token)?.min(events.len()),
            None if request.start_from_head => 0,
            None => events.len(),
        };
        let end = start.saturating_add(self.page_size).min(events.len());

        Ok(GetLogEventsResponse {
            events: events[start..end].to_vec(),
            next_forward_token: Some(forward_token(end)),
        })
    }
}
