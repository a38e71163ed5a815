//! Session state exchanged with the seedbox endpoint
//!
//! The remote endpoint authenticates via cookies. A session starts from a
//! single seed cookie supplied out of band and is thereafter replaced
//! wholesale by whatever a successful update call returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cookie name carrying the bootstrap seed on the very first request
pub const SEED_COOKIE_NAME: &str = "mam_id";

/// One session cookie with its scoping metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl SessionCookie {
    /// Create a bare name/value cookie without scoping metadata
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
        }
    }
}

/// The full credential set for one seedbox session
///
/// Replaced wholesale on every successful update; never mutated in place.
/// Order and duplicate names are preserved exactly as received, so a
/// save/load round trip reproduces the credential set bit for bit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    cookies: Vec<SessionCookie>,
}

impl SessionState {
    /// Build the initial session from an externally supplied seed identifier
    ///
    /// This is the only way a session comes into existence without a prior
    /// successful remote update.
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            cookies: vec![SessionCookie::new(SEED_COOKIE_NAME, seed)],
        }
    }

    /// Build a session from cookies returned by the remote endpoint
    pub fn from_cookies(cookies: Vec<SessionCookie>) -> Self {
        Self { cookies }
    }

    pub fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Render the credentials as a `Cookie` request-header value
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
