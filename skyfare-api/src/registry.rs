//! In-memory search sessions with idle expiry.

use std::collections::HashMap;
use std::time::Duration;

use skyfare_offer::SearchSession;
use tokio::time::Instant;
use uuid::Uuid;

struct Tracked {
    session: SearchSession,
    last_seen: Instant,
}

/// Sessions keyed by id. Every lookup counts as activity; a session left
/// alone for `ttl` is dropped by the next [`SessionRegistry::cleanup_expired`].
pub struct SessionRegistry {
    sessions: HashMap<Uuid, Tracked>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: HashMap::new(), ttl }
    }

    pub fn insert(&mut self, id: Uuid, session: SearchSession) {
        self.sessions.insert(id, Tracked { session, last_seen: Instant::now() });
    }

    pub fn get(&mut self, id: &Uuid) -> Option<&SearchSession> {
        self.get_mut(id).map(|session| &*session)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut SearchSession> {
        let tracked = self.sessions.get_mut(id)?;
        tracked.last_seen = Instant::now();
        Some(&mut tracked.session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops sessions idle for at least `ttl` as of `now`. Returns how many went.
    pub fn cleanup_expired(&mut self, now: Instant) -> usize {
        let initial_count = self.sessions.len();
        let ttl = self.ttl;
        self.sessions
            .retain(|_, tracked| now.saturating_duration_since(tracked.last_seen) < ttl);
        initial_count - self.sessions.len()
    }
}
