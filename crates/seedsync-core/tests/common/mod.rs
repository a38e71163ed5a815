//! Test doubles shared by the contract tests
//!
//! These doubles stand in for the two network collaborators so the tests
//! can drive the engine through full durable runs against a real file store.

use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use seedsync_core::error::Result;
use seedsync_core::session::{SessionCookie, SessionState};
use seedsync_core::traits::{IpSource, SeedboxClient, UpdateReply};

/// IP source returning a fixed address
pub struct FixedIpSource(pub IpAddr);

#[async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<IpAddr> {
        Ok(self.0)
    }
}

/// Seedbox double counting calls and replying with a scripted outcome
pub struct CountingSeedbox {
    success: bool,
    message: String,
    returned: SessionState,
    calls: Arc<AtomicUsize>,
}

impl CountingSeedbox {
    pub fn accepting() -> Self {
        Self {
            success: true,
            message: "Completed".to_string(),
            returned: SessionState::from_cookies(vec![
                SessionCookie::new("mam_id", "server-rotated"),
                SessionCookie::new("uid", "42"),
            ]),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            returned: SessionState::default(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Session this double hands back on success
    pub fn returned_session(&self) -> SessionState {
        self.returned.clone()
    }

    /// Shared call counter, usable after the double is boxed away
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SeedboxClient for CountingSeedbox {
    async fn update(&self, _session: &SessionState) -> Result<UpdateReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UpdateReply {
            success: self.success,
            message: self.message.clone(),
            session: self.returned.clone(),
        })
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid test ip")
}
