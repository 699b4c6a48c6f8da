//! profile.rs — roster profiling: aggregate active members into a transient
//! statistical profile.
//!
//! Per-member candidate/score lookups fan out concurrently (bounded by
//! `EngineConfig::fan_out_limit`, each under `lookup_timeout`). A member whose
//! lookup fails or times out is excluded from the aggregates instead of
//! failing the whole profile — partial intelligence beats none. Role
//! headcounts come straight off the membership records and cover every
//! status; everything else covers active members only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::engine::RosterEngine;
use crate::error::EngineError;
use crate::numeric::{round1, round3};
use crate::store::{Candidate, CandidateStore, RosterMember, ScoreSnapshot};

/// One bucket of a scene/microgenre/country breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub count: usize,
    /// Share of resolved active members, percent, 1 decimal.
    pub percentage: f64,
}

/// Transient, recomputed-on-demand aggregate over a roster. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterProfile {
    pub roster_id: String,
    pub total_members: usize,
    pub active_members: usize,
    /// Active members by primary scene, descending by count.
    pub scenes: Vec<BreakdownEntry>,
    /// Active members by microgenre; a member appears once per tag, so
    /// percentages here can sum past 100.
    pub microgenres: Vec<BreakdownEntry>,
    /// Active members by country, descending by count.
    pub countries: Vec<BreakdownEntry>,
    /// Headcount per role, all members regardless of status.
    pub roles: BTreeMap<String, usize>,
    /// Omitted (not zeroed) when no active member has a score — "no data"
    /// must not read as "bad data".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_composite_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_momentum_score: Option<f64>,
}

impl RosterProfile {
    /// Percentage share of active members in the given scene, if represented.
    pub fn scene_share(&self, scene: &str) -> Option<f64> {
        self.scenes
            .iter()
            .find(|e| e.name == scene)
            .map(|e| e.percentage)
    }

    pub fn has_scene(&self, scene: &str) -> bool {
        self.scene_share(scene).is_some()
    }

    pub fn role_count(&self, role: &str) -> usize {
        self.roles.get(role).copied().unwrap_or(0)
    }
}

impl RosterEngine {
    /// Compute the profile for a roster. An unknown or empty roster yields a
    /// valid zero profile; only a membership lookup failure is an error.
    pub async fn roster_profile(&self, roster_id: &str) -> Result<RosterProfile, EngineError> {
        let members = self.load_members(roster_id).await?.unwrap_or_default();
        Ok(self.profile_members(roster_id, &members).await)
    }

    /// Resolve and aggregate an already-loaded membership list. Shared with
    /// fit assessment, which applies stricter existence checks first.
    pub(crate) async fn profile_members(
        &self,
        roster_id: &str,
        members: &[RosterMember],
    ) -> RosterProfile {
        let resolved = self.resolve_active(roster_id, members).await;
        build_profile(roster_id, members, &resolved)
    }

    /// Fan out candidate/score lookups for the active members. Failed or
    /// timed-out lookups are logged and dropped.
    async fn resolve_active(
        &self,
        roster_id: &str,
        members: &[RosterMember],
    ) -> Vec<(Candidate, Option<ScoreSnapshot>)> {
        let semaphore = Arc::new(Semaphore::new(self.config.fan_out_limit));
        let timeout = self.config.lookup_timeout();
        let mut set = JoinSet::new();

        for member in members.iter().filter(|m| m.is_active()) {
            let slug = member.artist_slug.clone();
            let store = Arc::clone(&self.candidates);
            let semaphore = Arc::clone(&semaphore);
            set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("fan-out semaphore closed");
                let outcome = tokio::time::timeout(timeout, resolve_member(&*store, &slug)).await;
                (slug, outcome)
            });
        }

        let mut resolved = Vec::new();
        while let Some(joined) = set.join_next().await {
            let Ok((slug, outcome)) = joined else {
                // A panicked lookup task only costs that one member.
                warn!(roster_id, "member lookup task panicked; member excluded");
                continue;
            };
            match outcome {
                Ok(Ok(Some(pair))) => resolved.push(pair),
                Ok(Ok(None)) => {
                    warn!(roster_id, %slug, "member has no candidate record; excluded");
                }
                Ok(Err(e)) => {
                    warn!(roster_id, %slug, error = %e, "member lookup failed; excluded");
                }
                Err(_) => {
                    warn!(roster_id, %slug, "member lookup timed out; excluded");
                }
            }
        }
        debug!(
            roster_id,
            resolved = resolved.len(),
            "roster profile lookups finished"
        );
        resolved
    }
}

async fn resolve_member(
    store: &dyn CandidateStore,
    slug: &str,
) -> anyhow::Result<Option<(Candidate, Option<ScoreSnapshot>)>> {
    let Some(candidate) = store.candidate_by_slug(slug).await? else {
        return Ok(None);
    };
    let score = store.latest_score(&candidate.id).await?;
    Ok(Some((candidate, score)))
}

/// Pure aggregation over membership records and resolved candidates.
fn build_profile(
    roster_id: &str,
    members: &[RosterMember],
    resolved: &[(Candidate, Option<ScoreSnapshot>)],
) -> RosterProfile {
    let active_members = members.iter().filter(|m| m.is_active()).count();

    // Role headcount is status-independent.
    let mut roles: BTreeMap<String, usize> = BTreeMap::new();
    for m in members {
        *roles.entry(m.role.clone()).or_default() += 1;
    }

    let mut scenes: BTreeMap<&str, usize> = BTreeMap::new();
    let mut microgenres: BTreeMap<&str, usize> = BTreeMap::new();
    let mut countries: BTreeMap<&str, usize> = BTreeMap::new();
    for (candidate, _) in resolved {
        *scenes.entry(candidate.primary_scene.as_str()).or_default() += 1;
        *countries.entry(candidate.country.as_str()).or_default() += 1;
        for genre in &candidate.microgenres {
            *microgenres.entry(genre.as_str()).or_default() += 1;
        }
    }

    // Percentages are shares of the members we could actually resolve, so a
    // partition always sums to ~100 even when some lookups were excluded.
    let denom = resolved.len();

    let mut composite_sum = 0.0;
    let mut momentum_sum = 0.0;
    let mut scored = 0usize;
    for (_, snapshot) in resolved {
        if let Some(s) = snapshot {
            composite_sum += s.composite_score;
            momentum_sum += s.momentum_score;
            scored += 1;
        }
    }
    let (avg_composite_score, avg_momentum_score) = if scored > 0 {
        (
            Some(round3(composite_sum / scored as f64)),
            Some(round1(momentum_sum / scored as f64)),
        )
    } else {
        (None, None)
    };

    RosterProfile {
        roster_id: roster_id.to_string(),
        total_members: members.len(),
        active_members,
        scenes: to_breakdown(scenes, denom),
        microgenres: to_breakdown(microgenres, denom),
        countries: to_breakdown(countries, denom),
        roles,
        avg_composite_score,
        avg_momentum_score,
    }
}

/// Turn a bucket map into a sorted breakdown: descending by count, ties by
/// name, percentages over `denom`.
fn to_breakdown(buckets: BTreeMap<&str, usize>, denom: usize) -> Vec<BreakdownEntry> {
    let mut out: Vec<BreakdownEntry> = buckets
        .into_iter()
        .map(|(name, count)| BreakdownEntry {
            name: name.to_string(),
            count,
            percentage: if denom == 0 {
                0.0
            } else {
                round1(count as f64 / denom as f64 * 100.0)
            },
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}
