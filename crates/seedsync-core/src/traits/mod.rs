//! Core traits for the seedsync system
//!
//! These are the seams between the decision logic and its collaborators:
//!
//! - [`IpSource`]: Resolve the machine's current public IP
//! - [`SeedboxClient`]: Perform the remote dynamic-seedbox update call
//! - [`SessionStore`]: Durable persistence of the session and markers

pub mod ip_source;
pub mod seedbox;
pub mod session_store;

pub use ip_source::IpSource;
pub use seedbox::{SeedboxClient, UpdateReply};
pub use session_store::SessionStore;
