//! Engine configuration
//!
//! Resolved once at startup (flag > environment > built-in default is the
//! caller's concern) and passed into [`crate::UpdateEngine`] so the decision
//! logic never reads the environment itself.

use chrono::Duration;

/// Minimum elapsed time between successful remote updates
pub const MIN_WAIT_SECS: i64 = 60 * 60;

/// Configuration for one engine run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Bootstrap seed identifier, required only when no session exists yet.
    /// Consumed once; never persisted.
    pub seed: Option<String>,

    /// Bypass the rate-limit gate (and only that gate)
    pub force: bool,

    /// Minimum wait between successful updates
    pub min_wait: Duration,
}

impl EngineConfig {
    pub fn new(seed: Option<String>, force: bool) -> Self {
        Self {
            seed,
            force,
            min_wait: Duration::seconds(MIN_WAIT_SECS),
        }
    }

    /// Seed value, treating an empty string the same as absent
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref().filter(|s| !s.is_empty())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(None, false)
    }
}
