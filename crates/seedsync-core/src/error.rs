//! Error types for the seedsync core
//!
//! Every failure surfaces through this taxonomy; the two benign skip
//! outcomes (`Unchanged`, `RateLimited`) are not errors and are modeled
//! on [`crate::engine::RunOutcome`] instead.

use thiserror::Error;

/// Result type alias for seedsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the seedsync system
#[derive(Error, Debug)]
pub enum Error {
    /// No stored session exists and no bootstrap seed was supplied,
    /// or another startup-input problem
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/transport-level failure resolving the public IP or
    /// reaching the seedbox endpoint
    #[error("transport error: {0}")]
    Transport(String),

    /// A remote response or a persisted session record could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// The seedbox endpoint answered but reported the update as unsuccessful
    #[error("remote rejected update: {0}")]
    UpdateRejected(String),

    /// A session-store read or write failed
    #[error("session store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a rejected-update error carrying the remote-supplied message
    pub fn update_rejected(msg: impl Into<String>) -> Self {
        Self::UpdateRejected(msg.into())
    }

    /// Create a session-store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Stable short name for the error kind, used in terminal log events
    /// (`error:<kind>`)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::UpdateRejected(_) => "update-rejected",
            Self::Store(_) => "store",
        }
    }
}
