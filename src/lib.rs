// src/lib.rs
// Public library surface for integration tests (and embedding dashboards/APIs).

pub mod config;
pub mod engine;
pub mod error;
pub mod fit;
pub mod gaps;
pub mod memory;
pub mod numeric;
pub mod profile;
pub mod scoring;
pub mod signals;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::EngineConfig;
pub use crate::engine::RosterEngine;
pub use crate::error::EngineError;
pub use crate::fit::{CandidateRosterFit, FitRecommendation};
pub use crate::gaps::{GapType, RosterGap};
pub use crate::memory::MemoryStore;
pub use crate::profile::{BreakdownEntry, RosterProfile};
pub use crate::scoring::{
    breakout_score, confidence_score, momentum_score, opportunity_score, press_quality_score,
    reply_quality_score, risk_score,
};
pub use crate::signals::{
    BreakoutSignals, ConfidenceSignals, CoverageItem, MomentumSignals, OpportunitySignals,
    RiskSignals,
};
pub use crate::store::{
    Candidate, CandidateStore, MemberStatus, RosterMember, RosterStore, ScoreSnapshot,
};
