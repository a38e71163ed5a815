//! Core update engine
//!
//! The UpdateEngine decides, once per invocation, whether the remote
//! seedbox endpoint must be told about a new public IP, performs the call
//! at most once, and commits the resulting session and markers.
//!
//! ## Run states (derived each run, never stored)
//!
//! - **Uninitialized**: no session record exists; a bootstrap seed is required
//! - **Unchanged**: current IP equals the `last_ip` marker; benign no-op
//! - **RateLimited**: IP changed but the last successful update is too
//!   recent and no force override is set; benign no-op
//! - **Eligible**: IP changed and the wait elapsed (or force is set)
//!
//! ## Phases
//!
//! One run is an explicit read-decide / call / commit sequence:
//!
//! 1. `plan`: read store records once, derive a [`RunPlan`]
//! 2. call: perform the remote update with the planned session
//! 3. `commit`: persist the returned session plus both markers
//!
//! A failed run writes nothing; the next invocation re-derives the same
//! decision from the untouched persisted state.

use chrono::{DateTime, Utc};
use std::net::IpAddr;
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::traits::{IpSource, SeedboxClient, SessionStore};

/// Marker name for the IP recorded at the last successful update
pub const LAST_IP_MARKER: &str = "last_ip";

/// Marker name for the RFC 3339 instant of the last successful update
pub const LAST_UPDATE_MARKER: &str = "last_update";

/// Why a run decided to do nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    /// Current IP equals the recorded one
    Unchanged,
    /// IP changed but the minimum wait since the last update has not elapsed
    RateLimited,
}

/// The decision derived from persisted state, before any remote call
#[derive(Debug, Clone, PartialEq, Eq)]
enum RunPlan {
    /// First contact: construct a session from the seed
    Bootstrap { seed: String },
    /// Reuse the persisted session
    Renew { session: SessionState },
    /// No remote call, no writes
    Skip(SkipReason),
}

/// Terminal outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// First-ever update succeeded and created the session
    Bootstrapped,
    /// Update succeeded using the persisted session
    Renewed,
    /// IP unchanged; nothing to do
    SkippedUnchanged,
    /// IP changed but updated too recently; nothing done
    SkippedRateLimited,
}

impl RunOutcome {
    /// Stable event name for terminal-branch logging
    pub fn event(&self) -> &'static str {
        match self {
            Self::Bootstrapped => "bootstrapped",
            Self::Renewed => "renewed",
            Self::SkippedUnchanged => "unchanged-skip",
            Self::SkippedRateLimited => "rate-limited-skip",
        }
    }
}

/// Update-decision state machine
///
/// Holds boxed collaborators so the decision logic can be exercised with
/// fakes. All configuration is resolved by the caller up front; the engine
/// never reads the environment.
pub struct UpdateEngine {
    store: Box<dyn SessionStore>,
    ip_source: Box<dyn IpSource>,
    client: Box<dyn SeedboxClient>,
    config: EngineConfig,
}

impl UpdateEngine {
    pub fn new(
        store: Box<dyn SessionStore>,
        ip_source: Box<dyn IpSource>,
        client: Box<dyn SeedboxClient>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            ip_source,
            client,
            config,
        }
    }

    /// Perform one full run: read-decide, call, commit
    ///
    /// Exactly one remote update call is made when the plan requires one,
    /// and store writes happen only after that call confirmed success.
    pub async fn run(&self) -> Result<RunOutcome> {
        debug!("resolving public ip");
        let current_ip = self.ip_source.current().await?;
        debug!(ip = %current_ip, "resolved public ip");

        let plan = self.plan(current_ip).await?;

        let session = match plan {
            RunPlan::Skip(SkipReason::Unchanged) => {
                info!(event = "unchanged-skip", ip = %current_ip, "ip unchanged, skipping update");
                return Ok(RunOutcome::SkippedUnchanged);
            }
            RunPlan::Skip(SkipReason::RateLimited) => {
                info!(event = "rate-limited-skip", ip = %current_ip, "last update too recent, skipping update");
                return Ok(RunOutcome::SkippedRateLimited);
            }
            RunPlan::Bootstrap { seed } => {
                debug!("no session found, bootstrapping from seed");
                let renewed = self.call(&SessionState::from_seed(seed)).await?;
                self.commit(&renewed, current_ip).await?;
                info!(event = "bootstrapped", ip = %current_ip, "session bootstrapped and ip registered");
                return Ok(RunOutcome::Bootstrapped);
            }
            RunPlan::Renew { session } => session,
        };

        let renewed = self.call(&session).await?;
        self.commit(&renewed, current_ip).await?;
        info!(event = "renewed", ip = %current_ip, "ip registered with renewed session");
        Ok(RunOutcome::Renewed)
    }

    /// Read-decide phase: derive the plan from persisted state
    ///
    /// Reads each record at most once and performs no writes.
    async fn plan(&self, current_ip: IpAddr) -> Result<RunPlan> {
        if !self.store.exists().await {
            let seed = self
                .config
                .seed()
                .ok_or_else(|| Error::config("no stored session and no bootstrap seed supplied"))?;
            return Ok(RunPlan::Bootstrap {
                seed: seed.to_string(),
            });
        }

        let last_ip = self.store.read_marker(LAST_IP_MARKER).await?;
        if last_ip.as_deref() == Some(current_ip.to_string().as_str()) {
            return Ok(RunPlan::Skip(SkipReason::Unchanged));
        }
        debug!(last_ip = ?last_ip, ip = %current_ip, "ip changed since last update");

        if !self.config.force && self.too_recent().await? {
            return Ok(RunPlan::Skip(SkipReason::RateLimited));
        }

        let session = self
            .store
            .load()
            .await?
            .ok_or_else(|| Error::store("session record vanished during run"))?;

        Ok(RunPlan::Renew { session })
    }

    /// Whether the last successful update is inside the minimum wait window
    async fn too_recent(&self) -> Result<bool> {
        let Some(raw) = self.store.read_marker(LAST_UPDATE_MARKER).await? else {
            return Ok(false);
        };

        let last_update = DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|e| Error::decode(format!("last_update marker is corrupt: {}", e)))?
            .with_timezone(&Utc);

        Ok(Utc::now().signed_duration_since(last_update) < self.config.min_wait)
    }

    /// Call phase: one remote exchange, logical failure surfaced as an error
    async fn call(&self, session: &SessionState) -> Result<SessionState> {
        let reply = self.client.update(session).await?;
        if !reply.success {
            return Err(Error::update_rejected(reply.message));
        }
        debug!(message = %reply.message, "remote update accepted");
        Ok(reply.session)
    }

    /// Commit phase: persist the renewed session and both markers
    ///
    /// Only reached after the remote call confirmed success. The IP written
    /// is the one resolved before the call, not re-fetched afterward. A
    /// failure here leaves the remote side updated while local records are
    /// stale, so it is logged distinctly before propagating.
    async fn commit(&self, session: &SessionState, current_ip: IpAddr) -> Result<()> {
        let result = self.commit_records(session, current_ip).await;
        if let Err(e) = &result {
            error!(
                error = %e,
                "remote endpoint was updated but local state could not be recorded; \
                 records are stale until the next successful run"
            );
        }
        result
    }

    async fn commit_records(&self, session: &SessionState, current_ip: IpAddr) -> Result<()> {
        self.store.save(session).await?;
        self.store
            .write_marker(LAST_UPDATE_MARKER, &Utc::now().to_rfc3339())
            .await?;
        self.store
            .write_marker(LAST_IP_MARKER, &current_ip.to_string())
            .await?;
        Ok(())
    }
}
