//! store.rs — data model and the two injected repository interfaces.
//!
//! The engine never writes: rosters and candidates are owned and mutated
//! elsewhere, this core only reads them. Store implementations return
//! `anyhow::Result`; the engine wraps failures into `EngineError::Lookup`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Membership status inside a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

/// One artist's membership record in a roster. `role` is an open set;
/// "core" and "development" are the values the gap rules care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    pub artist_slug: String,
    pub role: String,
    pub status: MemberStatus,
}

impl RosterMember {
    pub fn new(artist_slug: impl Into<String>, role: impl Into<String>, status: MemberStatus) -> Self {
        Self {
            artist_slug: artist_slug.into(),
            role: role.into(),
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// An artist under evaluation (roster member or prospect).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub slug: String,
    pub primary_scene: String,
    /// Distinct microgenre tags; a candidate can carry several.
    #[serde(default)]
    pub microgenres: BTreeSet<String>,
    pub country: String,
    /// How unlike its peers the candidate's output is, [0,1]. Absent when the
    /// creative analysis hasn't run yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creative_uniqueness_score: Option<f64>,
}

/// Latest computed score snapshot for a candidate. Absent entirely for
/// artists that have never been scored; never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// Overall composite in [0,1].
    pub composite_score: f64,
    /// Momentum on the 0–100 scale.
    pub momentum_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakout_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

/// Read-only access to roster membership.
#[async_trait::async_trait]
pub trait RosterStore: Send + Sync {
    /// All membership records for a roster, any status.
    /// `None` means the roster itself does not exist.
    async fn roster_members(&self, roster_id: &str) -> Result<Option<Vec<RosterMember>>>;
}

/// Read-only access to candidate records and their latest scores.
#[async_trait::async_trait]
pub trait CandidateStore: Send + Sync {
    async fn candidate_by_slug(&self, slug: &str) -> Result<Option<Candidate>>;
    async fn latest_score(&self, candidate_id: &str) -> Result<Option<ScoreSnapshot>>;
}
