//! fit.rs — candidate-roster fit assessment.
//!
//! Unlike profiling, this operation is all-or-nothing: an unknown roster or
//! candidate is a hard `NotFound`, never a best-guess default. The profile
//! and the candidate record+score load concurrently; the fit computation
//! itself is pure ([`compute_fit`]).

use serde::{Deserialize, Serialize};

use crate::engine::RosterEngine;
use crate::error::EngineError;
use crate::numeric::{clamp01, round3, weighted_average};
use crate::profile::RosterProfile;
use crate::store::{Candidate, ScoreSnapshot};

/// Bonus applied to strategic fit when the candidate fills a scene the
/// roster does not cover yet.
const NOVEL_SCENE_BONUS: f64 = 0.15;
/// Uniqueness contribution of the candidate's scene: novel vs already signed.
const NOVEL_SCENE_UNIQUENESS: f64 = 0.8;
const KNOWN_SCENE_UNIQUENESS: f64 = 0.4;
/// Redundancy floor when the candidate's scene is absent from the roster.
const ABSENT_SCENE_REDUNDANCY: f64 = 0.1;
/// Fallbacks for genuinely missing data (a present 0.0 is used as 0.0).
const DEFAULT_COMPOSITE: f64 = 0.5;
const DEFAULT_UNIQUENESS: f64 = 0.5;

const PORTFOLIO_WEIGHTS: [f64; 2] = [0.6, 0.4];
const COMPOSITE_FIT_WEIGHTS: [f64; 4] = [0.3, 0.25, 0.2, 0.25];

/// Categorical signing recommendation derived from the composite fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitRecommendation {
    #[serde(rename = "Strong fit")]
    Strong,
    #[serde(rename = "Good fit")]
    Good,
    #[serde(rename = "Moderate fit")]
    Moderate,
    #[serde(rename = "Low fit")]
    Low,
}

impl FitRecommendation {
    /// Exact threshold mapping: ≥0.75 strong, ≥0.6 good, ≥0.4 moderate.
    pub fn from_composite(composite_fit: f64) -> Self {
        if composite_fit >= 0.75 {
            Self::Strong
        } else if composite_fit >= 0.6 {
            Self::Good
        } else if composite_fit >= 0.4 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for FitRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Strong => "Strong fit",
            Self::Good => "Good fit",
            Self::Moderate => "Moderate fit",
            Self::Low => "Low fit",
        };
        f.write_str(s)
    }
}

/// How well a prospective artist would strengthen an existing roster.
/// Transient result; all component scores in [0,1], rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRosterFit {
    pub roster_id: String,
    pub artist_slug: String,
    pub strategic_fit: f64,
    pub uniqueness_vs_roster: f64,
    pub redundancy_risk: f64,
    pub portfolio_value: f64,
    pub composite_fit: f64,
    pub recommendation: FitRecommendation,
}

impl RosterEngine {
    /// Assess how a candidate would fit into a roster. Strict: a missing
    /// roster or candidate yields `Err(NotFound)`.
    pub async fn assess_candidate_fit(
        &self,
        roster_id: &str,
        artist_slug: &str,
    ) -> Result<CandidateRosterFit, EngineError> {
        let (profile, (candidate, score)) = tokio::try_join!(
            self.strict_profile(roster_id),
            self.load_candidate_with_score(artist_slug),
        )?;
        compute_fit(&profile, &candidate, score.as_ref())
    }

    /// Profile for fit assessment: unknown roster is `NotFound` here, not an
    /// empty profile.
    async fn strict_profile(&self, roster_id: &str) -> Result<RosterProfile, EngineError> {
        let members = self
            .load_members(roster_id)
            .await?
            .ok_or_else(|| EngineError::roster_not_found(roster_id))?;
        Ok(self.profile_members(roster_id, &members).await)
    }

    async fn load_candidate_with_score(
        &self,
        artist_slug: &str,
    ) -> Result<(Candidate, Option<ScoreSnapshot>), EngineError> {
        let candidate = self
            .candidates
            .candidate_by_slug(artist_slug)
            .await
            .map_err(EngineError::Lookup)?
            .ok_or_else(|| EngineError::candidate_not_found(artist_slug))?;
        let score = self
            .candidates
            .latest_score(&candidate.id)
            .await
            .map_err(EngineError::Lookup)?;
        Ok((candidate, score))
    }
}

/// Pure fit computation over an already-loaded profile and candidate.
pub fn compute_fit(
    profile: &RosterProfile,
    candidate: &Candidate,
    score: Option<&ScoreSnapshot>,
) -> Result<CandidateRosterFit, EngineError> {
    let scene = candidate.primary_scene.as_str();
    let scene_is_novel = !profile.has_scene(scene);

    let composite = score
        .map(|s| clamp01(s.composite_score))
        .unwrap_or(DEFAULT_COMPOSITE);

    // Reward gap-filling: a scene the roster lacks earns a capped bonus.
    let strategic_fit = if scene_is_novel {
        (composite + NOVEL_SCENE_BONUS).min(1.0)
    } else {
        composite
    };

    let scene_uniqueness = if scene_is_novel {
        NOVEL_SCENE_UNIQUENESS
    } else {
        KNOWN_SCENE_UNIQUENESS
    };
    let creative_uniqueness = candidate
        .creative_uniqueness_score
        .map(clamp01)
        .unwrap_or(DEFAULT_UNIQUENESS);
    let uniqueness_vs_roster = (scene_uniqueness + creative_uniqueness) / 2.0;

    let redundancy_risk = profile
        .scene_share(scene)
        .map(|pct| clamp01(pct / 100.0))
        .unwrap_or(ABSENT_SCENE_REDUNDANCY);

    let portfolio_value =
        weighted_average(&[1.0 - redundancy_risk, composite], &PORTFOLIO_WEIGHTS)?;

    let composite_fit = weighted_average(
        &[
            strategic_fit,
            uniqueness_vs_roster,
            1.0 - redundancy_risk,
            portfolio_value,
        ],
        &COMPOSITE_FIT_WEIGHTS,
    )?;

    // The recommendation comes off the unrounded composite so display
    // rounding can never flip the category.
    Ok(CandidateRosterFit {
        roster_id: profile.roster_id.clone(),
        artist_slug: candidate.slug.clone(),
        strategic_fit: round3(strategic_fit),
        uniqueness_vs_roster: round3(uniqueness_vs_roster),
        redundancy_risk: round3(redundancy_risk),
        portfolio_value: round3(portfolio_value),
        composite_fit: round3(composite_fit),
        recommendation: FitRecommendation::from_composite(composite_fit),
    })
}
