// # IP Source Trait
//
// Defines the interface for resolving the machine's current public IP.
//
// ## Implementations
//
// - HTTP-based (plain-text IP endpoint): `seedsync-http` crate
// - Test doubles returning a fixed address
//
// The source is an observer only: it must not decide whether an update is
// needed and must not touch the session store.

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for public-IP resolution
///
/// `current()` performs at most one lookup and returns immediately; the
/// engine calls it exactly once per run, before any decision is made.
/// A failure here is fatal for the run and causes no writes.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The current public IP
    /// - `Err(Error)`: If resolution failed (transport or decode)
    async fn current(&self) -> Result<IpAddr, crate::Error>;
}
