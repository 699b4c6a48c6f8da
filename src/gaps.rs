//! gaps.rs — rule engine over a roster profile.
//!
//! Each rule is an independent `fn(&RosterProfile) -> Option<RosterGap>`:
//! it fires at most once, reads only the profile, and never depends on
//! another rule's threshold. Findings compose additively, so several gaps
//! can co-occur for the same roster. New rules join [`RULES`].

use serde::{Deserialize, Serialize};

use crate::engine::RosterEngine;
use crate::error::EngineError;
use crate::profile::RosterProfile;

const MIN_DISTINCT_SCENES: usize = 3;
const SCENE_CONCENTRATION_MAX_PCT: f64 = 50.0;
const MIN_DISTINCT_COUNTRIES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapType {
    SceneDiversity,
    SceneConcentration,
    GeographicDiversity,
    DevelopmentPipeline,
}

/// A detected structural weakness in roster composition. Transient, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterGap {
    #[serde(rename = "type")]
    pub gap_type: GapType,
    /// What the finding is about: a dimension ("scenes", "countries"), a
    /// scene name, or a role name, depending on the rule.
    pub name: String,
    /// Rule-specific coverage figure: a distinct count for diversity rules,
    /// a percentage for concentration, a headcount for the pipeline rule.
    pub current_coverage: f64,
    /// How much addressing the gap is worth, [0,1].
    pub opportunity_score: f64,
    pub recommendation: String,
}

type GapRule = fn(&RosterProfile) -> Option<RosterGap>;

/// Rule table, evaluated in order. Rules are independent; order only affects
/// output ordering.
const RULES: [GapRule; 4] = [
    scene_diversity,
    scene_concentration,
    geographic_diversity,
    development_pipeline,
];

/// Evaluate every rule against a profile. Pure; possibly empty.
pub fn detect_gaps(profile: &RosterProfile) -> Vec<RosterGap> {
    RULES.iter().filter_map(|rule| rule(profile)).collect()
}

impl RosterEngine {
    /// Compute gaps for a roster from a freshly computed profile.
    pub async fn roster_gaps(&self, roster_id: &str) -> Result<Vec<RosterGap>, EngineError> {
        let profile = self.roster_profile(roster_id).await?;
        Ok(detect_gaps(&profile))
    }
}

fn scene_diversity(profile: &RosterProfile) -> Option<RosterGap> {
    let distinct = profile.scenes.len();
    if distinct >= MIN_DISTINCT_SCENES {
        return None;
    }
    Some(RosterGap {
        gap_type: GapType::SceneDiversity,
        name: "scenes".to_string(),
        current_coverage: distinct as f64,
        opportunity_score: 0.8,
        recommendation: format!(
            "Roster spans only {distinct} scene(s); sign artists from adjacent scenes to spread scene risk."
        ),
    })
}

fn scene_concentration(profile: &RosterProfile) -> Option<RosterGap> {
    // A partition can hold at most one bucket above 50%, and breakdowns are
    // sorted descending, so the head is the only candidate.
    let top = profile.scenes.first()?;
    if top.percentage <= SCENE_CONCENTRATION_MAX_PCT {
        return None;
    }
    Some(RosterGap {
        gap_type: GapType::SceneConcentration,
        name: top.name.clone(),
        current_coverage: top.percentage,
        opportunity_score: 0.6,
        recommendation: format!(
            "{:.1}% of the roster sits in \"{}\"; prioritize signings outside it.",
            top.percentage, top.name
        ),
    })
}

fn geographic_diversity(profile: &RosterProfile) -> Option<RosterGap> {
    let distinct = profile.countries.len();
    if distinct >= MIN_DISTINCT_COUNTRIES {
        return None;
    }
    Some(RosterGap {
        gap_type: GapType::GeographicDiversity,
        name: "countries".to_string(),
        current_coverage: distinct as f64,
        opportunity_score: 0.7,
        recommendation: format!(
            "All active artists come from {distinct} country/countries; scout internationally to widen reach."
        ),
    })
}

fn development_pipeline(profile: &RosterProfile) -> Option<RosterGap> {
    if profile.role_count("development") > 0 || profile.role_count("core") == 0 {
        return None;
    }
    Some(RosterGap {
        gap_type: GapType::DevelopmentPipeline,
        name: "development".to_string(),
        current_coverage: 0.0,
        opportunity_score: 0.75,
        recommendation:
            "Roster has core artists but no development acts; add early-stage signings to feed the pipeline."
                .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BreakdownEntry;
    use std::collections::BTreeMap;

    fn entry(name: &str, count: usize, percentage: f64) -> BreakdownEntry {
        BreakdownEntry {
            name: name.to_string(),
            count,
            percentage,
        }
    }

    fn profile(
        scenes: Vec<BreakdownEntry>,
        countries: Vec<BreakdownEntry>,
        roles: &[(&str, usize)],
    ) -> RosterProfile {
        let active: usize = scenes.iter().map(|e| e.count).sum();
        RosterProfile {
            roster_id: "r".to_string(),
            total_members: active,
            active_members: active,
            scenes,
            microgenres: Vec::new(),
            countries,
            roles: roles
                .iter()
                .map(|(r, c)| (r.to_string(), *c))
                .collect::<BTreeMap<_, _>>(),
            avg_composite_score: None,
            avg_momentum_score: None,
        }
    }

    #[test]
    fn concentrated_single_scene_roster_fires_three_rules() {
        // 5 members, one scene, one country, core-only plus one development act.
        let p = profile(
            vec![entry("techno", 5, 100.0)],
            vec![entry("DE", 5, 100.0)],
            &[("core", 4), ("development", 1)],
        );
        let gaps = detect_gaps(&p);
        let types: Vec<GapType> = gaps.iter().map(|g| g.gap_type).collect();
        assert!(types.contains(&GapType::SceneDiversity));
        assert!(types.contains(&GapType::SceneConcentration));
        assert!(types.contains(&GapType::GeographicDiversity));
        assert!(!types.contains(&GapType::DevelopmentPipeline));
        assert_eq!(gaps.len(), 3);
    }

    #[test]
    fn diverse_roster_has_no_gaps() {
        let p = profile(
            vec![
                entry("techno", 2, 40.0),
                entry("grime", 2, 40.0),
                entry("ambient", 1, 20.0),
            ],
            vec![entry("DE", 3, 60.0), entry("UK", 2, 40.0)],
            &[("core", 3), ("development", 2)],
        );
        assert!(detect_gaps(&p).is_empty());
    }

    #[test]
    fn missing_pipeline_needs_core_presence() {
        // No core artists: an all-development roster is not a pipeline gap.
        let p = profile(
            vec![
                entry("techno", 1, 33.3),
                entry("grime", 1, 33.3),
                entry("ambient", 1, 33.3),
            ],
            vec![entry("DE", 2, 66.7), entry("UK", 1, 33.3)],
            &[("development", 3)],
        );
        assert!(detect_gaps(&p).is_empty());

        let p = profile(
            vec![
                entry("techno", 1, 33.3),
                entry("grime", 1, 33.3),
                entry("ambient", 1, 33.3),
            ],
            vec![entry("DE", 2, 66.7), entry("UK", 1, 33.3)],
            &[("core", 3)],
        );
        let gaps = detect_gaps(&p);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].gap_type, GapType::DevelopmentPipeline);
        assert_eq!(gaps[0].opportunity_score, 0.75);
    }

    #[test]
    fn concentration_fires_independently_of_diversity() {
        // Three scenes (diversity satisfied) but one holds 60%.
        let p = profile(
            vec![
                entry("techno", 6, 60.0),
                entry("grime", 2, 20.0),
                entry("ambient", 2, 20.0),
            ],
            vec![entry("DE", 5, 50.0), entry("UK", 5, 50.0)],
            &[("core", 8), ("development", 2)],
        );
        let gaps = detect_gaps(&p);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].gap_type, GapType::SceneConcentration);
        assert_eq!(gaps[0].name, "techno");
        assert_eq!(gaps[0].current_coverage, 60.0);
        assert_eq!(gaps[0].opportunity_score, 0.6);
    }

    #[test]
    fn exactly_half_is_not_concentration() {
        let p = profile(
            vec![
                entry("techno", 2, 50.0),
                entry("grime", 1, 25.0),
                entry("ambient", 1, 25.0),
            ],
            vec![entry("DE", 2, 50.0), entry("UK", 2, 50.0)],
            &[("core", 2), ("development", 2)],
        );
        assert!(detect_gaps(&p).is_empty());
    }

    #[test]
    fn empty_roster_reports_diversity_gaps_only() {
        let p = profile(Vec::new(), Vec::new(), &[]);
        let gaps = detect_gaps(&p);
        let types: Vec<GapType> = gaps.iter().map(|g| g.gap_type).collect();
        assert_eq!(
            types,
            vec![GapType::SceneDiversity, GapType::GeographicDiversity]
        );
    }
}
