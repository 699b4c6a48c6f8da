//! engine.rs — the roster engine: injected stores plus tuning config.
//!
//! All three operations (profiling, gap detection, fit assessment) hang off
//! [`RosterEngine`]; their implementations live in `profile.rs`, `gaps.rs`
//! and `fit.rs`. The engine performs no writes anywhere.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::{CandidateStore, RosterMember, RosterStore};

/// Read-only roster intelligence engine over injected stores.
pub struct RosterEngine {
    pub(crate) rosters: Arc<dyn RosterStore>,
    pub(crate) candidates: Arc<dyn CandidateStore>,
    pub(crate) config: EngineConfig,
}

impl RosterEngine {
    pub fn new(
        rosters: Arc<dyn RosterStore>,
        candidates: Arc<dyn CandidateStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            rosters,
            candidates,
            config,
        }
    }

    /// Engine with default fan-out/timeout tuning.
    pub fn with_defaults(
        rosters: Arc<dyn RosterStore>,
        candidates: Arc<dyn CandidateStore>,
    ) -> Self {
        Self::new(rosters, candidates, EngineConfig::default())
    }

    /// Membership records for a roster; `None` when the roster is unknown.
    /// Store failures surface as [`EngineError::Lookup`].
    pub(crate) async fn load_members(
        &self,
        roster_id: &str,
    ) -> Result<Option<Vec<RosterMember>>, EngineError> {
        self.rosters
            .roster_members(roster_id)
            .await
            .map_err(EngineError::Lookup)
    }
}
