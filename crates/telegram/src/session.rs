//! Per-user search sessions
//!
//! Stores the last search results of every user so that inline button
//! presses can refer to them by index. Entries expire after a TTL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::OwnedMutexGuard;
use torrent::SearchResult;

/// Last search of a user
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub results: Vec<SearchResult>,
    pub query: String,
    pub quality: Option<String>,
}

/// Storage backend for user sessions
///
/// Implementations only need to be internally consistent per call;
/// callers serialize read-modify sequences with [`UserLocks`].
pub trait SessionStore: Send + Sync {
    /// Get the live session of a user
    fn get(&self, user_id: u64) -> Option<UserSession>;

    /// Replace the session of a user
    fn put(&self, user_id: u64, session: UserSession);

    /// Drop the session of a user
    fn remove(&self, user_id: u64);

    /// Remove expired sessions, returning how many were dropped
    fn purge_expired(&self) -> usize;

    /// Number of stored sessions, expired ones included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Entry {
    session: UserSession,
    stored_at: Instant,
}

/// In-memory session store with a fixed time-to-live
pub struct InMemSessionStore {
    sessions: RwLock<HashMap<u64, Entry>>,
    ttl: Duration,
}

impl InMemSessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.stored_at) >= self.ttl
    }
}

impl SessionStore for InMemSessionStore {
    fn get(&self, user_id: u64) -> Option<UserSession> {
        let now = Instant::now();
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(&user_id)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.session.clone())
    }

    fn put(&self, user_id: u64, session: UserSession) {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(
            user_id,
            Entry {
                session,
                stored_at: Instant::now(),
            },
        );
    }

    fn remove(&self, user_id: u64) {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(&user_id);
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        before - sessions.len()
    }

    fn len(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }
}

/// One async mutex per user id
#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<u64, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lock of a user
    pub async fn acquire(&self, user_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(user_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Forget locks nobody holds or waits for
    pub fn prune(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Why a result could not be picked from a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// No live session for the user
    Expired,
    /// Index is past the end of the stored results
    OutOfRange { index: usize, len: usize },
}

/// Session service handed to the handlers
///
/// Bundles the store with per-user locks.
#[derive(Clone)]
pub struct Sessions {
    store: Arc<dyn SessionStore>,
    locks: Arc<UserLocks>,
}

impl Sessions {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            locks: Arc::new(UserLocks::new()),
        }
    }

    /// In-memory sessions expiring after `ttl`
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(Arc::new(InMemSessionStore::new(ttl)))
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Take the lock of a user for a read-modify sequence
    pub async fn lock(&self, user_id: u64) -> OwnedMutexGuard<()> {
        self.locks.acquire(user_id).await
    }

    /// Replace the session of a user under their lock
    pub async fn save(&self, user_id: u64, session: UserSession) {
        let _guard = self.lock(user_id).await;
        self.store.put(user_id, session);
    }

    /// Pick result `index` from the current session of a user
    pub async fn select(&self, user_id: u64, index: usize) -> Result<SearchResult, SelectionError> {
        let _guard = self.lock(user_id).await;
        select_result(self.store(), user_id, index)
    }

    /// Purge expired sessions and idle locks
    pub fn cleanup(&self) -> usize {
        let purged = self.store.purge_expired();
        self.locks.prune();
        purged
    }
}

/// Look up result `index` in the stored session of a user
pub fn select_result(
    store: &dyn SessionStore,
    user_id: u64,
    index: usize,
) -> Result<SearchResult, SelectionError> {
    let session = store.get(user_id).ok_or(SelectionError::Expired)?;
    let len = session.results.len();
    session
        .results
        .into_iter()
        .nth(index)
        .ok_or(SelectionError::OutOfRange { index, len })
}
