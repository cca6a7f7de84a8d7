//! In-memory registry of live sessions.
//!
//! Different sessions proceed in parallel; turns of one session are
//! serialized by its own mutex.

use counsel_core::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` under its id and returns the shared handle.
    pub async fn insert(&self, session: Session) -> SharedSession {
        let id = session.id.clone();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        shared
    }

    pub async fn get(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions.write().await.remove(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let registry = SessionRegistry::new();
        let shared = registry.insert(Session::with_id("s-1")).await;
        registry.insert(Session::with_id("s-0")).await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get("s-0").await.is_some());

        let fetched = registry.get("s-1").await.unwrap();
        assert!(Arc::ptr_eq(&shared, &fetched));

        assert!(registry.remove("s-1").await.is_some());
        assert!(registry.get("s-1").await.is_none());
        assert!(registry.remove("s-1").await.is_none());
    }
}
