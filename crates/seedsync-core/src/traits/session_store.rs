// # Session Store Trait
//
// Defines the interface for durable session and marker persistence.
//
// ## Purpose
//
// The store keeps three independent records across invocations:
// - The session credential blob (existence discriminates bootstrap vs renewal)
// - The `last_ip` marker (IP-change detection)
// - The `last_update` marker (rate-limit gate)
//
// Absence of any record is a normal state, never an error. A record that is
// present but undecodable is a decode error and must be surfaced, not
// silently discarded.
//
// ## Implementations
//
// - File-based: one file per record under a data directory
// - In-memory: tests and ephemeral deployments
//
// Stores persist; they never decide. All update logic is owned by the
// `UpdateEngine`.

use async_trait::async_trait;

use crate::session::SessionState;

/// Trait for session store implementations
///
/// Writes must be atomic from the caller's perspective: a reader never
/// observes a half-written record. File-backed implementations should write
/// to a temporary location and rename into place.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Whether a session record is present on durable storage
    ///
    /// Absence is a normal, expected state and never an error.
    async fn exists(&self) -> bool;

    /// Load the session record
    ///
    /// # Returns
    ///
    /// - `Ok(Some(SessionState))`: Record present and decoded
    /// - `Ok(None)`: No record (not an error)
    /// - `Err(Error)`: Present but corrupt (decode), or read failure (store)
    async fn load(&self) -> Result<Option<SessionState>, crate::Error>;

    /// Replace the session record wholesale
    async fn save(&self, session: &SessionState) -> Result<(), crate::Error>;

    /// Read a named scalar marker
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Marker present
    /// - `Ok(None)`: Marker absent (not an error)
    /// - `Err(Error)`: Read failure
    async fn read_marker(&self, name: &str) -> Result<Option<String>, crate::Error>;

    /// Write a named scalar marker, replacing any prior value
    async fn write_marker(&self, name: &str, value: &str) -> Result<(), crate::Error>;
}
