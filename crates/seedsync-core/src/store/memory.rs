// # Memory Session Store
//
// In-memory implementation of SessionStore.
//
// ## Purpose
//
// State store without persistence across restarts. Useful for tests and for
// deployments where a re-bootstrap after restart is acceptable (a fresh run
// simply takes the bootstrap path again).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::session::SessionState;
use crate::traits::session_store::SessionStore;

#[derive(Debug, Default)]
struct MemoryState {
    session: Option<SessionState>,
    markers: HashMap<String, String>,
}

/// In-memory session store
///
/// Clones share the same underlying state, which lets tests hold a handle
/// while the engine owns a boxed copy.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<MemoryState>>,
}

impl MemorySessionStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.session = None;
        guard.markers.clear();
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn exists(&self) -> bool {
        self.inner.read().await.session.is_some()
    }

    async fn load(&self) -> Result<Option<SessionState>, Error> {
        Ok(self.inner.read().await.session.clone())
    }

    async fn save(&self, session: &SessionState) -> Result<(), Error> {
        self.inner.write().await.session = Some(session.clone());
        Ok(())
    }

    async fn read_marker(&self, name: &str) -> Result<Option<String>, Error> {
        Ok(self.inner.read().await.markers.get(name).cloned())
    }

    async fn write_marker(&self, name: &str, value: &str) -> Result<(), Error> {
        self.inner
            .write()
            .await
            .markers
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}
