//! scoring.rs — the seven talent signal scores.
//!
//! Stateless pipeline: normalize each raw input to [0,1], blend with a fixed
//! weight vector, optionally sharpen, then clamp/round. Momentum is an integer
//! on 0–100; every other score is a float in [0,1] rounded to 3 decimals.
//!
//! Non-finite inputs fail fast with `InvalidInput`; finite out-of-domain
//! values clamp to their documented range.

use crate::error::EngineError;
use crate::numeric::{clamp01, ensure_finite, normalize, round3, sharpen_composite, weighted_average};
use crate::signals::{
    BreakoutSignals, ConfidenceSignals, CoverageItem, MomentumSignals, OpportunitySignals,
    RiskSignals,
};

/// Growth-ratio domain shared by the velocity/change signals.
const VELOCITY_MIN: f64 = -0.5;
const VELOCITY_MAX: f64 = 2.0;

const MOMENTUM_WEIGHTS: [f64; 5] = [0.25, 0.25, 0.20, 0.15, 0.15];
const BREAKOUT_WEIGHTS: [f64; 6] = [0.3, 0.2, 0.2, 0.1, 0.1, 0.1];
const RISK_WEIGHTS: [f64; 6] = [0.25, 0.20, 0.15, 0.15, 0.15, 0.10];
const PRESS_ITEM_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
const REPLY_ITEM_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];
const OPPORTUNITY_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.2, 0.2];
const CONFIDENCE_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.2, 0.2];

/// Press articles are depth-scored against a 2000-word ceiling.
const PRESS_DEPTH_MAX: f64 = 2000.0;
/// Replies are shorter; 500 characters saturates depth.
const REPLY_DEPTH_MAX: f64 = 500.0;

/// Composite rate-of-change signal across campaign, coverage, creative,
/// audience, and playlist dimensions. Integer in [0,100].
pub fn momentum_score(s: &MomentumSignals) -> Result<u8, EngineError> {
    let values = [
        normalize(
            ensure_finite("campaign_velocity", s.campaign_velocity)?,
            VELOCITY_MIN,
            VELOCITY_MAX,
        ),
        normalize(
            ensure_finite("coverage_velocity", s.coverage_velocity)?,
            VELOCITY_MIN,
            VELOCITY_MAX,
        ),
        clamp01(ensure_finite("creative_shift", s.creative_shift)?),
        normalize(
            ensure_finite("audience_change", s.audience_change)?,
            VELOCITY_MIN,
            VELOCITY_MAX,
        ),
        normalize(
            ensure_finite("playlist_velocity", s.playlist_velocity)?,
            VELOCITY_MIN,
            VELOCITY_MAX,
        ),
    ];
    let avg = weighted_average(&values, &MOMENTUM_WEIGHTS)?;
    Ok((avg * 100.0).round() as u8)
}

/// Sigmoid-sharpened probability-like estimate (0–1) of imminent audience
/// breakthrough. The sharpening step deliberately pushes mid-range composites
/// toward a decisive 0/1 classification; see [`crate::numeric::sharpen_composite`].
pub fn breakout_score(s: &BreakoutSignals) -> Result<f64, EngineError> {
    let values = [
        clamp01(ensure_finite("momentum", s.momentum)? / 100.0),
        clamp01(ensure_finite("mig_connectivity", s.mig_connectivity)?),
        clamp01(ensure_finite("press_quality", s.press_quality)?),
        clamp01(ensure_finite("creative_shift", s.creative_shift)?),
        clamp01(ensure_finite("scene_hotness", s.scene_hotness)? / 100.0),
        clamp01(ensure_finite("identity_alignment", s.identity_alignment)?),
    ];
    let raw = weighted_average(&values, &BREAKOUT_WEIGHTS)?;
    Ok(round3(sharpen_composite(raw)))
}

/// Composite estimate (0–1) of stagnation, decline, or misalignment. Each
/// sub-factor is one-sided: only the risky direction of a signal contributes.
pub fn risk_score(s: &RiskSignals) -> Result<f64, EngineError> {
    let values = [
        1.0 - clamp01(ensure_finite("momentum", s.momentum)? / 100.0),
        clamp01((-ensure_finite("coverage_velocity", s.coverage_velocity)?).max(0.0)),
        1.0 - clamp01(ensure_finite("creative_shift", s.creative_shift)?),
        1.0 - clamp01(ensure_finite("identity_alignment", s.identity_alignment)?),
        1.0 - clamp01(ensure_finite("scene_hotness", s.scene_hotness)? / 100.0),
        clamp01((-ensure_finite("audience_change", s.audience_change)?).max(0.0)),
    ];
    let avg = weighted_average(&values, &RISK_WEIGHTS)?;
    Ok(round3(clamp01(avg)))
}

/// Mean per-item quality of press coverage: outlet tier, article depth, and
/// sentiment blended 0.5/0.3/0.2. Zero when there is nothing to score.
pub fn press_quality_score(items: &[CoverageItem]) -> Result<f64, EngineError> {
    coverage_quality(items, PRESS_ITEM_WEIGHTS, PRESS_DEPTH_MAX, false)
}

/// Mean per-item quality of reply threads. Sentiment matters as much as tier
/// here (0.4/0.4/0.2) and depth saturates at 500 characters.
pub fn reply_quality_score(items: &[CoverageItem]) -> Result<f64, EngineError> {
    coverage_quality(items, REPLY_ITEM_WEIGHTS, REPLY_DEPTH_MAX, true)
}

/// Shared tier/depth/sentiment item scorer. `sentiment_second` switches the
/// weight order between the press blend (tier, depth, sentiment) and the reply
/// blend (tier, sentiment, depth).
fn coverage_quality(
    items: &[CoverageItem],
    weights: [f64; 3],
    depth_max: f64,
    sentiment_second: bool,
) -> Result<f64, EngineError> {
    if items.is_empty() {
        return Ok(0.0);
    }
    let mut sum = 0.0;
    for item in items {
        let tier = item.tier.clamp(1, 5) as f64;
        let tier_score = (6.0 - tier) / 5.0;
        let depth_score = normalize(ensure_finite("depth", item.depth)?, 0.0, depth_max);
        let sentiment = ensure_finite("sentiment", item.sentiment)?;
        let sentiment_score = clamp01((sentiment + 1.0) / 2.0);
        let values = if sentiment_second {
            [tier_score, sentiment_score, depth_score]
        } else {
            [tier_score, depth_score, sentiment_score]
        };
        sum += weighted_average(&values, &weights)?;
    }
    Ok(round3(sum / items.len() as f64))
}

/// How well an external opportunity (slot, bill, playlist, collab) matches an
/// artist. All inputs pre-normalized to [0,1].
pub fn opportunity_score(s: &OpportunitySignals) -> Result<f64, EngineError> {
    let values = [
        clamp01(ensure_finite("scene_alignment", s.scene_alignment)?),
        clamp01(ensure_finite("momentum_match", s.momentum_match)?),
        clamp01(ensure_finite("creative_alignment", s.creative_alignment)?),
        clamp01(ensure_finite("network_fit", s.network_fit)?),
    ];
    let avg = weighted_average(&values, &OPPORTUNITY_WEIGHTS)?;
    Ok(round3(clamp01(avg)))
}

/// How much the other scores can be trusted, given data coverage and
/// signal agreement. All inputs pre-normalized to [0,1].
pub fn confidence_score(s: &ConfidenceSignals) -> Result<f64, EngineError> {
    let values = [
        clamp01(ensure_finite("data_completeness", s.data_completeness)?),
        clamp01(ensure_finite("signal_strength", s.signal_strength)?),
        clamp01(ensure_finite("signal_agreement", s.signal_agreement)?),
        clamp01(ensure_finite("recency", s.recency)?),
    ];
    let avg = weighted_average(&values, &CONFIDENCE_WEIGHTS)?;
    Ok(round3(clamp01(avg)))
}
