//! In-memory registry of HTTP client sessions.

use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Book-keeping for one client session.
#[derive(Debug, Clone, Copy)]
pub struct SessionInfo {
    pub created_at: Instant,
    pub last_seen: Instant,
    /// Requests served under this session, `initialize` included.
    pub requests: u64,
}

/// Process-wide map of live sessions, keyed by `Mcp-Session-Id`.
///
/// Sessions carry no protocol state; the registry only decides which
/// ids are accepted. It lives as long as the server that owns it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionInfo>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session under a fresh UUID v4 and returns its id.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Instant::now();
        self.sessions.write().await.insert(
            id.clone(),
            SessionInfo {
                created_at: now,
                last_seen: now,
                requests: 1,
            },
        );
        tracing::debug!(session = %id, "session created");
        id
    }

    /// Records activity on a session. Returns `false` if the id is unknown.
    pub async fn touch(&self, id: &str) -> bool {
        match self.sessions.write().await.get_mut(id) {
            Some(info) => {
                info.last_seen = Instant::now();
                info.requests += 1;
                true
            }
            None => false,
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    pub async fn get(&self, id: &str) -> Option<SessionInfo> {
        self.sessions.read().await.get(id).copied()
    }

    /// Ends a session. Returns `false` if the id is unknown.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "session closed");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session and returns how many there were.
    pub async fn clear(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let n = sessions.len();
        sessions.clear();
        n
    }
}
