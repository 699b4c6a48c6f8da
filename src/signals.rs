//! signals.rs — raw signal vectors consumed by the scoring functions.
//!
//! Plain serde structs, one per score type. Each field documents its expected
//! domain; values outside it are clamped during scoring, never rejected
//! (only non-finite values are an error).

use serde::{Deserialize, Serialize};

/// Inputs to the momentum score. Velocity/change fields are growth ratios,
/// typically in [-0.5, 2.0]; `creative_shift` is already normalized to [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MomentumSignals {
    pub campaign_velocity: f64,
    pub coverage_velocity: f64,
    pub creative_shift: f64,
    pub audience_change: f64,
    pub playlist_velocity: f64,
}

/// Inputs to the breakout score. `momentum` and `scene_hotness` arrive on their
/// native 0–100 scale and are divided down internally; the rest are [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BreakoutSignals {
    /// Momentum score, 0–100.
    pub momentum: f64,
    /// Music-industry-graph connectivity, [0,1].
    pub mig_connectivity: f64,
    pub press_quality: f64,
    pub creative_shift: f64,
    /// Scene hotness, 0–100.
    pub scene_hotness: f64,
    pub identity_alignment: f64,
}

/// Inputs to the risk score. Same scales as [`BreakoutSignals`]; the velocity
/// fields are growth ratios where only the negative side contributes risk.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskSignals {
    /// Momentum score, 0–100.
    pub momentum: f64,
    pub coverage_velocity: f64,
    pub creative_shift: f64,
    pub identity_alignment: f64,
    /// Scene hotness, 0–100.
    pub scene_hotness: f64,
    pub audience_change: f64,
}

/// One piece of press coverage (or one reply thread) to be quality-scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageItem {
    /// Outlet tier, 1 (top) to 5 (long tail).
    pub tier: u8,
    /// Depth of the piece — word count for press, character count for replies.
    pub depth: f64,
    /// Sentiment in [-1,1].
    pub sentiment: f64,
}

impl CoverageItem {
    pub fn new(tier: u8, depth: f64, sentiment: f64) -> Self {
        Self {
            tier,
            depth,
            sentiment,
        }
    }
}

/// Inputs to the opportunity score, all pre-normalized to [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OpportunitySignals {
    pub scene_alignment: f64,
    pub momentum_match: f64,
    pub creative_alignment: f64,
    pub network_fit: f64,
}

/// Inputs to the confidence score, all pre-normalized to [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConfidenceSignals {
    pub data_completeness: f64,
    pub signal_strength: f64,
    pub signal_agreement: f64,
    pub recency: f64,
}
