// # seedsync-core
//
// Core library for the seedsync dynamic seedbox updater.
//
// ## Architecture Overview
//
// This library provides the update-decision core:
// - **IpSource**: Trait for resolving the machine's current public IP
// - **SeedboxClient**: Trait for the remote dynamic-seedbox update call
// - **SessionStore**: Trait for durable session and marker persistence
// - **UpdateEngine**: State machine that decides per run whether a remote
//   update is needed, performs it at most once, and commits the results
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from transport
//    and persistence implementations
// 2. **Single Pass**: One read-decide / call / commit sequence per invocation;
//    periodic execution is an external concern
// 3. **Idempotency**: Persisted markers make repeated invocations no-ops
//    until the public IP actually changes

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::EngineConfig;
pub use engine::{RunOutcome, UpdateEngine, LAST_IP_MARKER, LAST_UPDATE_MARKER};
pub use error::{Error, Result};
pub use session::{SessionCookie, SessionState};
pub use store::{FileSessionStore, MemorySessionStore};
pub use traits::{IpSource, SeedboxClient, SessionStore, UpdateReply};
