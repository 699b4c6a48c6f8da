//! memory.rs — in-memory store backing unit and integration tests, and any
//! embedding caller that already holds its data.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::store::{Candidate, CandidateStore, RosterMember, RosterStore, ScoreSnapshot};

/// In-memory implementation of both store traits.
///
/// Rosters are keyed by id, candidates by slug, scores by candidate id.
/// Interior mutability keeps the type usable behind `Arc` in async tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rosters: RwLock<HashMap<String, Vec<RosterMember>>>,
    candidates: RwLock<HashMap<String, Candidate>>,
    scores: RwLock<HashMap<String, ScoreSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a roster with the given membership.
    pub fn put_roster(&self, roster_id: impl Into<String>, members: Vec<RosterMember>) {
        self.rosters
            .write()
            .expect("memory store lock poisoned")
            .insert(roster_id.into(), members);
    }

    pub fn put_candidate(&self, candidate: Candidate) {
        self.candidates
            .write()
            .expect("memory store lock poisoned")
            .insert(candidate.slug.clone(), candidate);
    }

    pub fn put_score(&self, candidate_id: impl Into<String>, score: ScoreSnapshot) {
        self.scores
            .write()
            .expect("memory store lock poisoned")
            .insert(candidate_id.into(), score);
    }
}

#[async_trait::async_trait]
impl RosterStore for MemoryStore {
    async fn roster_members(&self, roster_id: &str) -> Result<Option<Vec<RosterMember>>> {
        Ok(self
            .rosters
            .read()
            .expect("memory store lock poisoned")
            .get(roster_id)
            .cloned())
    }
}

#[async_trait::async_trait]
impl CandidateStore for MemoryStore {
    async fn candidate_by_slug(&self, slug: &str) -> Result<Option<Candidate>> {
        Ok(self
            .candidates
            .read()
            .expect("memory store lock poisoned")
            .get(slug)
            .cloned())
    }

    async fn latest_score(&self, candidate_id: &str) -> Result<Option<ScoreSnapshot>> {
        Ok(self
            .scores
            .read()
            .expect("memory store lock poisoned")
            .get(candidate_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemberStatus;

    #[tokio::test]
    async fn unknown_roster_is_none_empty_roster_is_some() {
        let store = MemoryStore::new();
        store.put_roster("empty", Vec::new());

        assert!(store.roster_members("missing").await.unwrap().is_none());
        let members = store.roster_members("empty").await.unwrap();
        assert_eq!(members, Some(Vec::new()));
    }

    #[tokio::test]
    async fn candidate_roundtrip() {
        let store = MemoryStore::new();
        store.put_candidate(Candidate {
            id: "c1".into(),
            slug: "neon-vultures".into(),
            primary_scene: "post-punk".into(),
            microgenres: ["coldwave".to_string()].into_iter().collect(),
            country: "DE".into(),
            creative_uniqueness_score: Some(0.7),
        });
        store.put_roster(
            "r1",
            vec![RosterMember::new("neon-vultures", "core", MemberStatus::Active)],
        );

        let c = store.candidate_by_slug("neon-vultures").await.unwrap().unwrap();
        assert_eq!(c.id, "c1");
        assert!(store.latest_score("c1").await.unwrap().is_none());
    }
}
