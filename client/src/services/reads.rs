//! # Read Tracking
//!
//! Reads never throw at the caller. An adapter failure becomes
//! [`Loadable::Failed`] with a user-facing message, which pages can render as
//! an error banner with retry or degrade to an empty list.
//!
//! Overlapping reads for the same query key (switching between two project
//! pages quickly) are tagged with request tokens; only the response to the
//! latest request is kept and earlier ones are dropped on arrival.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use lib_core::Result;
use parking_lot::Mutex;
use tracing::{debug, warn};

/// State of a read as seen by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    /// User-facing failure message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(v) => Loadable::Loaded(f(v)),
            Loadable::Failed(msg) => Loadable::Failed(msg),
        }
    }
}

impl<T: Clone + Default> Loadable<T> {
    /// Loaded value, or the empty value while loading or after a failure.
    pub fn or_default(&self) -> T {
        self.value().cloned().unwrap_or_default()
    }
}

impl<T> From<Result<T>> for Loadable<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(v) => Loadable::Loaded(v),
            Err(e) => Loadable::Failed(e.user_message()),
        }
    }
}

/// Await an adapter read and turn its outcome into a [`Loadable`].
pub async fn load<T, F>(what: &str, read: F) -> Loadable<T>
where
    F: Future<Output = Result<T>>,
{
    match read.await {
        Ok(v) => Loadable::Loaded(v),
        Err(e) => {
            warn!(read = what, error = %e, "Contract read failed");
            Loadable::Failed(e.user_message())
        }
    }
}

/// Ticket for one in-flight read of `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken<K> {
    key: K,
    seq: u64,
}

impl<K> RequestToken<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Hands out request tokens and remembers the latest one per key.
pub struct RequestTracker<K> {
    state: Mutex<TrackerState<K>>,
}

struct TrackerState<K> {
    next_seq: u64,
    latest: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone> Default for RequestTracker<K> {
    fn default() -> Self {
        Self {
            state: Mutex::new(TrackerState {
                next_seq: 0,
                latest: HashMap::new(),
            }),
        }
    }
}

impl<K: Eq + Hash + Clone> RequestTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request for `key`, superseding any earlier one.
    pub fn begin(&self, key: K) -> RequestToken<K> {
        let mut state = self.state.lock();
        state.next_seq += 1;
        let seq = state.next_seq;
        state.latest.insert(key.clone(), seq);
        RequestToken { key, seq }
    }

    /// Whether `token` still belongs to the most recent request for its key.
    pub fn is_latest(&self, token: &RequestToken<K>) -> bool {
        self.state.lock().latest.get(&token.key) == Some(&token.seq)
    }

    /// Supersede every in-flight request for `key` without starting a new one.
    pub fn supersede(&self, key: K) {
        let _ = self.begin(key);
    }
}

/// Per-key cache of read results that only accepts the latest response.
pub struct QueryCache<K, T> {
    tracker: RequestTracker<K>,
    entries: Mutex<HashMap<K, Loadable<T>>>,
}

impl<K: Eq + Hash + Clone, T: Clone> Default for QueryCache<K, T> {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::new(),
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, T> QueryCache<K, T>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for `key`; `Loading` if it was never fetched.
    pub fn get(&self, key: &K) -> Loadable<T> {
        self.entries
            .lock()
            .get(key)
            .cloned()
            .unwrap_or(Loadable::Loading)
    }

    /// Run `read` for `key` and store its outcome if no newer request for the
    /// same key was started meanwhile.
    ///
    /// Returns `None` when the response was stale and discarded.
    pub async fn fetch<F>(&self, key: K, read: F) -> Option<Loadable<T>>
    where
        F: Future<Output = Result<T>>,
    {
        let token = {
            let mut entries = self.entries.lock();
            let token = self.tracker.begin(key.clone());
            entries.insert(key.clone(), Loadable::Loading);
            token
        };

        let outcome = load("query", read).await;

        let mut entries = self.entries.lock();
        if !self.tracker.is_latest(&token) {
            debug!(key = ?token.key(), "Discarding stale read response");
            return None;
        }
        entries.insert(key, outcome.clone());
        Some(outcome)
    }

    /// Drop the cached value so the next view refetches. In-flight reads for
    /// the key are superseded, since they may predate a write.
    pub fn invalidate(&self, key: &K) {
        let mut entries = self.entries.lock();
        self.tracker.supersede(key.clone());
        entries.remove(key);
    }
}
