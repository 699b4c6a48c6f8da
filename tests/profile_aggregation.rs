// tests/profile_aggregation.rs
//
// Roster profiling end to end over the in-memory store: zero profiles,
// breakdown percentages, role headcounts, and best-effort exclusion of
// failing or slow member lookups.

use std::sync::Arc;

use chrono::Utc;
use talent_radar::{
    Candidate, CandidateStore, EngineConfig, MemberStatus, MemoryStore, RosterEngine,
    RosterMember, ScoreSnapshot,
};

fn candidate(slug: &str, scene: &str, country: &str, genres: &[&str]) -> Candidate {
    Candidate {
        id: format!("id-{slug}"),
        slug: slug.to_string(),
        primary_scene: scene.to_string(),
        microgenres: genres.iter().map(|g| g.to_string()).collect(),
        country: country.to_string(),
        creative_uniqueness_score: None,
    }
}

fn snapshot(composite: f64, momentum: f64) -> ScoreSnapshot {
    ScoreSnapshot {
        composite_score: composite,
        momentum_score: momentum,
        breakout_score: None,
        risk_score: None,
        captured_at: Utc::now(),
    }
}

fn engine(store: Arc<MemoryStore>) -> RosterEngine {
    RosterEngine::with_defaults(store.clone(), store)
}

#[tokio::test]
async fn zero_member_roster_yields_valid_zero_profile() {
    let store = Arc::new(MemoryStore::new());
    store.put_roster("fresh-label", Vec::new());

    let profile = engine(store).roster_profile("fresh-label").await.unwrap();
    assert_eq!(profile.total_members, 0);
    assert_eq!(profile.active_members, 0);
    assert!(profile.scenes.is_empty());
    assert!(profile.microgenres.is_empty());
    assert!(profile.countries.is_empty());
    assert!(profile.avg_composite_score.is_none());
    assert!(profile.avg_momentum_score.is_none());
}

#[tokio::test]
async fn unknown_roster_profiles_as_empty_not_error() {
    let store = Arc::new(MemoryStore::new());
    let profile = engine(store).roster_profile("no-such-roster").await.unwrap();
    assert_eq!(profile.total_members, 0);
}

#[tokio::test]
async fn breakdowns_and_averages_over_active_members() {
    let store = Arc::new(MemoryStore::new());
    store.put_candidate(candidate("a", "techno", "DE", &["dub techno", "acid"]));
    store.put_candidate(candidate("b", "techno", "NL", &["acid"]));
    store.put_candidate(candidate("c", "shoegaze", "DE", &[]));
    store.put_candidate(candidate("d", "grime", "UK", &[]));
    store.put_score("id-a", snapshot(0.8, 70.0));
    store.put_score("id-b", snapshot(0.6, 50.0));
    // c has no score; d is inactive and must not appear anywhere but roles.
    store.put_roster(
        "label",
        vec![
            RosterMember::new("a", "core", MemberStatus::Active),
            RosterMember::new("b", "core", MemberStatus::Active),
            RosterMember::new("c", "development", MemberStatus::Active),
            RosterMember::new("d", "core", MemberStatus::Inactive),
        ],
    );

    let profile = engine(store).roster_profile("label").await.unwrap();
    assert_eq!(profile.total_members, 4);
    assert_eq!(profile.active_members, 3);

    // Scenes: techno 2/3, shoegaze 1/3; sorted descending.
    assert_eq!(profile.scenes[0].name, "techno");
    assert_eq!(profile.scenes[0].count, 2);
    assert_eq!(profile.scenes[0].percentage, 66.7);
    let scene_total: f64 = profile.scenes.iter().map(|e| e.percentage).sum();
    assert!((scene_total - 100.0).abs() <= 0.1);

    let country_total: f64 = profile.countries.iter().map(|e| e.percentage).sum();
    assert!((country_total - 100.0).abs() <= 0.1);

    // Microgenres multi-bucket: acid appears for two members.
    let acid = profile
        .microgenres
        .iter()
        .find(|e| e.name == "acid")
        .unwrap();
    assert_eq!(acid.count, 2);

    // Role headcount is status-independent: the inactive core member counts.
    assert_eq!(profile.role_count("core"), 3);
    assert_eq!(profile.role_count("development"), 1);

    // Averages only over the two scored members.
    assert_eq!(profile.avg_composite_score, Some(0.7));
    assert_eq!(profile.avg_momentum_score, Some(60.0));
}

/// Candidate store that fails lookups for one slug and answers normally for
/// the rest.
struct FlakyStore {
    inner: Arc<MemoryStore>,
    failing_slug: String,
}

#[async_trait::async_trait]
impl CandidateStore for FlakyStore {
    async fn candidate_by_slug(&self, slug: &str) -> anyhow::Result<Option<Candidate>> {
        if slug == self.failing_slug {
            anyhow::bail!("backend unavailable");
        }
        self.inner.candidate_by_slug(slug).await
    }

    async fn latest_score(&self, candidate_id: &str) -> anyhow::Result<Option<ScoreSnapshot>> {
        self.inner.latest_score(candidate_id).await
    }
}

#[tokio::test]
async fn failed_member_lookup_is_excluded_not_fatal() {
    let store = Arc::new(MemoryStore::new());
    store.put_candidate(candidate("ok", "techno", "DE", &[]));
    store.put_candidate(candidate("broken", "grime", "UK", &[]));
    store.put_score("id-ok", snapshot(0.9, 80.0));
    store.put_roster(
        "label",
        vec![
            RosterMember::new("ok", "core", MemberStatus::Active),
            RosterMember::new("broken", "core", MemberStatus::Active),
        ],
    );

    let flaky = Arc::new(FlakyStore {
        inner: store.clone(),
        failing_slug: "broken".to_string(),
    });
    let engine = RosterEngine::with_defaults(store, flaky);

    let profile = engine.roster_profile("label").await.unwrap();
    // Membership counts are intact, aggregates only cover the resolved member.
    assert_eq!(profile.active_members, 2);
    assert_eq!(profile.scenes.len(), 1);
    assert_eq!(profile.scenes[0].name, "techno");
    assert_eq!(profile.scenes[0].percentage, 100.0);
    assert_eq!(profile.avg_composite_score, Some(0.9));
}

/// Candidate store whose lookups hang long enough to trip the per-lookup
/// timeout.
struct SlowStore {
    inner: Arc<MemoryStore>,
    slow_slug: String,
}

#[async_trait::async_trait]
impl CandidateStore for SlowStore {
    async fn candidate_by_slug(&self, slug: &str) -> anyhow::Result<Option<Candidate>> {
        if slug == self.slow_slug {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        }
        self.inner.candidate_by_slug(slug).await
    }

    async fn latest_score(&self, candidate_id: &str) -> anyhow::Result<Option<ScoreSnapshot>> {
        self.inner.latest_score(candidate_id).await
    }
}

#[tokio::test]
async fn slow_member_lookup_times_out_and_is_excluded() {
    let store = Arc::new(MemoryStore::new());
    store.put_candidate(candidate("fast", "techno", "DE", &[]));
    store.put_candidate(candidate("slow", "grime", "UK", &[]));
    store.put_roster(
        "label",
        vec![
            RosterMember::new("fast", "core", MemberStatus::Active),
            RosterMember::new("slow", "core", MemberStatus::Active),
        ],
    );

    let slow = Arc::new(SlowStore {
        inner: store.clone(),
        slow_slug: "slow".to_string(),
    });
    let config = EngineConfig {
        fan_out_limit: 4,
        lookup_timeout_ms: 50,
    };
    let engine = RosterEngine::new(store, slow, config);

    let profile = engine.roster_profile("label").await.unwrap();
    assert_eq!(profile.scenes.len(), 1);
    assert_eq!(profile.scenes[0].name, "techno");
}
