use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use vital_shared::{Action, Catalogue, DarkMode, SelectionState};

use crate::config::max_sessions;
use crate::prefs_store::JsonFileStore;

/// One browser session's selection plus its last activity time.
#[derive(Debug, Clone)]
pub struct Session {
    pub selection: SelectionState,
    pub touched_at: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            selection: SelectionState::new(),
            touched_at: now,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    pub sessions: Arc<DashMap<Uuid, Session>>,
    pub max_sessions: usize,
    pub dark_mode: Arc<RwLock<DarkMode<JsonFileStore>>>,
    pub static_dir: PathBuf,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    sessions_created_total: AtomicU64,
    sessions_evicted_total: AtomicU64,
    transitions_applied_total: AtomicU64,
    transitions_ignored_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct ObservabilitySnapshot {
    pub sessions_created_total: u64,
    pub sessions_evicted_total: u64,
    pub transitions_applied_total: u64,
    pub transitions_ignored_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            sessions_created_total: self.sessions_created_total.load(Ordering::Relaxed),
            sessions_evicted_total: self.sessions_evicted_total.load(Ordering::Relaxed),
            transitions_applied_total: self.transitions_applied_total.load(Ordering::Relaxed),
            transitions_ignored_total: self.transitions_ignored_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_session_created(&self) {
        self.sessions_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sessions_evicted(&self, count: u64) {
        self.sessions_evicted_total
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_transition(&self, changed: bool) {
        let counter = if changed {
            &self.transitions_applied_total
        } else {
            &self.transitions_ignored_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(catalogue: Catalogue, preferences_path: PathBuf, static_dir: PathBuf) -> Self {
        let dark_mode = DarkMode::load(JsonFileStore::new(preferences_path));
        Self {
            catalogue: Arc::new(catalogue),
            sessions: Arc::new(DashMap::new()),
            max_sessions: max_sessions(),
            dark_mode: Arc::new(RwLock::new(dark_mode)),
            static_dir,
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    /// Start a session, evicting the least recently used one when at capacity.
    pub fn create_session(&self) -> (Uuid, SelectionState) {
        if self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().touched_at)
                .map(|entry| *entry.key());
            if let Some(id) = oldest
                && self.sessions.remove(&id).is_some()
            {
                self.observability.record_sessions_evicted(1);
                info!(session = %id, "evicted least recently used session at capacity");
            }
        }

        let id = Uuid::new_v4();
        let session = Session::new(Utc::now());
        let selection = session.selection.clone();
        self.sessions.insert(id, session);
        self.observability.record_session_created();
        (id, selection)
    }

    /// Snapshot of a session's selection, refreshing its activity time.
    pub fn touch_session(&self, id: &Uuid) -> Option<SelectionState> {
        let mut session = self.sessions.get_mut(id)?;
        session.touched_at = Utc::now();
        Some(session.selection.clone())
    }

    /// Apply one action to a session. `None` when the session is unknown.
    pub fn apply(&self, id: &Uuid, action: &Action) -> Option<SelectionState> {
        let mut session = self.sessions.get_mut(id)?;
        session.touched_at = Utc::now();
        let changed = session.selection.apply(action);
        self.observability.record_transition(changed);
        Some(session.selection.clone())
    }

    pub fn end_session(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drop sessions idle for at least `ttl_secs`. Returns how many were removed.
    pub fn evict_idle_sessions(&self, now: DateTime<Utc>, ttl_secs: i64) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now.signed_duration_since(session.touched_at).num_seconds() < ttl_secs);
        let evicted = before.saturating_sub(self.sessions.len());
        self.observability.record_sessions_evicted(evicted as u64);
        evicted
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(
        Catalogue::builtin().clone(),
        dir.path().join("prefs.json"),
        dir.path().join("static"),
    );
    (state, dir)
}
