//! In-memory storage of previous responses, queryable by responder and
//! addressee.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::base::types::{Response, Speaker};

/// A single sent response along with which responder produced it and who it
/// was for. Immutable once created.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub responder_name: String,
    pub response: Response,
    pub timestamp: DateTime<Utc>,
    /// The speaker who triggered the response.
    pub addressee: Speaker,
}

/// Optional constraints when searching history. `None` fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub responder_name: Option<String>,
    pub addressee_id: Option<String>,
}

impl HistoryQuery {
    /// A query constrained to one responder's entries.
    pub fn for_responder(name: impl Into<String>) -> Self {
        Self {
            responder_name: Some(name.into()),
            addressee_id: None,
        }
    }
}

impl HistoryEntry {
    /// Exact-equality match against the non-wildcard fields of the query.
    /// Addressees match on identity, not display name.
    fn matches(&self, query: &HistoryQuery) -> bool {
        if let Some(name) = &query.responder_name
            && name != &self.responder_name
        {
            return false;
        }
        if let Some(id) = &query.addressee_id
            && id != &self.addressee.id
        {
            return false;
        }
        true
    }
}

/// Append-only, size-bounded log of past responses.
///
/// Cheap to clone; all clones share the same backing log. Entries are never
/// mutated or removed individually, only truncated from the oldest end when
/// the capacity bound is exceeded. The single lock is held only for the
/// duration of an append or scan, never across a network send.
#[derive(Clone)]
pub struct HistoryStore {
    log: Arc<Mutex<VecDeque<HistoryEntry>>>,
    capacity: usize,
    max_results: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize, max_results: usize) -> Self {
        Self {
            log: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
            max_results,
        }
    }

    /// Adds an entry to the end of the log, dropping the oldest entries
    /// while the capacity bound is exceeded.
    pub fn append(&self, entry: HistoryEntry) {
        let mut log = self.log.lock().expect("history lock poisoned");
        log.push_back(entry);
        while log.len() > self.capacity {
            log.pop_front();
        }
    }

    /// Returns up to `limit` entries matching the query, newest first. The
    /// limit is clamped to the store's configured maximum.
    ///
    /// We could be more clever about this and actually index the history,
    /// but a linear scan bounded by the capacity is fast enough.
    pub fn query(&self, query: &HistoryQuery, limit: usize) -> Vec<HistoryEntry> {
        let limit = limit.min(self.max_results);
        let log = self.log.lock().expect("history lock poisoned");

        let mut results = Vec::new();
        for entry in log.iter().rev() {
            if results.len() >= limit {
                debug!("Terminating history search early.");
                break;
            }
            if entry.matches(query) {
                results.push(entry.clone());
            }
        }
        results
    }

    pub fn len(&self) -> usize {
        self.log.lock().expect("history lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
