// # Seedbox Client Trait
//
// Defines the interface for the remote dynamic-seedbox update call.
//
// ## Contract
//
// One invocation performs exactly one HTTP exchange: send the given session's
// credentials, decode the logical `{success, message}` payload, and capture
// the session cookies the response establishes. The client reports what the
// remote said; interpreting `success = false` as a failure is the engine's
// job, so that no decision logic leaks into transport code.
//
// Clients must not retry, must not cache state between calls, and must not
// touch the session store.

use async_trait::async_trait;

use crate::session::SessionState;

/// Decoded result of one remote update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReply {
    /// Logical success flag from the response payload
    pub success: bool,
    /// Remote-supplied message (diagnostic on failure)
    pub message: String,
    /// Session credentials established by the response. Persisted by the
    /// engine only together with a `success = true` confirmation.
    pub session: SessionState,
}

/// Trait for the dynamic-seedbox update collaborator
#[async_trait]
pub trait SeedboxClient: Send + Sync {
    /// Perform one update call carrying `session`'s credentials
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateReply)`: Well-formed response, success flag included
    /// - `Err(Error)`: Transport failure or undecodable response
    async fn update(&self, session: &SessionState) -> Result<UpdateReply, crate::Error>;
}
