//! Stage 4 — gap quantification: turns every Missing classification into a
//! priced, ROI-ranked `SkillGapItem`.

use std::cmp::Ordering;

use tracing::warn;

use crate::config::PriorityWeights;
use crate::models::skill_gap::{SkillGapItem, SkillPriority};
use crate::store::JobProfile;

use super::graph::{GraphMatch, MatchType};

/// Hours of study that convert to one week of proficiency progress.
pub const HOURS_PER_WEEK: f64 = 40.0;
/// Fixed confidence attached to hybrid-pipeline gap items.
pub const GAP_CONFIDENCE: f64 = 0.92;
const MAX_DIFFICULTY: u32 = 10;

/// Builds gap items for every missing skill and sorts them by ROI,
/// non-increasing. The sort is stable, so equal-ROI items keep their
/// encounter order.
pub fn run(matches: &[GraphMatch], profile: &JobProfile, weights: &PriorityWeights) -> Vec<SkillGapItem> {
    let mut gaps: Vec<SkillGapItem> = matches
        .iter()
        .filter(|m| m.match_type == MatchType::Missing)
        .map(|m| build_gap_item(m, profile, weights))
        .collect();

    gaps.sort_by(|a, b| b.roi.partial_cmp(&a.roi).unwrap_or(Ordering::Equal));
    gaps
}

fn build_gap_item(m: &GraphMatch, profile: &JobProfile, weights: &PriorityWeights) -> SkillGapItem {
    let req = profile.skills.get(&m.skill).cloned().unwrap_or_else(|| {
        // A required skill with no requirement detail is a data-quality
        // issue; the defaults can under- or overstate gap severity.
        warn!(
            "No requirement detail for required skill '{}'; substituting defaults",
            m.skill
        );
        Default::default()
    });

    let roi = req.salary_impact / f64::from(req.learning_hours.max(1));

    SkillGapItem {
        skill_name: m.skill.clone(),
        priority: determine_priority(req.learning_hours, req.salary_impact, weights),
        learning_hours: req.learning_hours,
        salary_impact: req.salary_impact,
        difficulty: estimate_difficulty(req.complexity, m.level),
        market_demand: req.market_demand,
        roi,
        weeks_to_proficiency: f64::from(req.learning_hours) / HOURS_PER_WEEK,
        job_relevance: req.importance,
        recommended_resources: Vec::new(),
        extraction_method: "hybrid".to_string(),
        confidence_score: GAP_CONFIDENCE,
    }
}

/// Difficulty on a 1–10 scale: complexity doubled plus the required level,
/// capped at 10.
pub fn estimate_difficulty(complexity: u32, required_level: u32) -> u32 {
    (complexity * 2 + required_level).min(MAX_DIFFICULTY)
}

/// Priority from effort and reward alone. Effort is double-weighted by
/// construction: the model prefers quick wins. Boundary scores map to the
/// higher bucket.
pub fn determine_priority(
    learning_hours: u32,
    salary_impact: f64,
    w: &PriorityWeights,
) -> SkillPriority {
    let hour_score = (f64::from(learning_hours) / w.hours_cap * 10.0).min(10.0);
    let salary_score = (salary_impact / w.salary_cap * 10.0).min(10.0);

    let score = w.effort * (10.0 - hour_score) + w.salary * salary_score;

    if score >= w.critical_threshold {
        SkillPriority::Critical
    } else if score >= w.high_threshold {
        SkillPriority::High
    } else if score >= w.medium_threshold {
        SkillPriority::Medium
    } else {
        SkillPriority::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SkillRequirement;

    fn missing(skill: &str, level: u32) -> GraphMatch {
        GraphMatch {
            skill: skill.to_string(),
            match_type: MatchType::Missing,
            match_score: 0.0,
            level,
        }
    }

    fn profile_with(skills: Vec<(&str, SkillRequirement)>) -> JobProfile {
        let mut profile = JobProfile::default();
        for (name, req) in skills {
            profile.skills.insert(name.to_string(), req);
        }
        profile
    }

    fn req(learning_hours: u32, salary_impact: f64) -> SkillRequirement {
        SkillRequirement {
            learning_hours,
            salary_impact,
            ..SkillRequirement::default()
        }
    }

    #[test]
    fn test_only_missing_matches_become_gaps() {
        let matches = vec![
            GraphMatch {
                skill: "Python".to_string(),
                match_type: MatchType::Direct,
                match_score: 1.0,
                level: 3,
            },
            missing("Statistics", 3),
        ];
        let gaps = run(&matches, &profile_with(vec![]), &PriorityWeights::default());
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].skill_name, "Statistics");
    }

    #[test]
    fn test_gaps_sorted_by_roi_descending() {
        let matches = vec![missing("Statistics", 3), missing("Machine Learning", 5)];
        let profile = profile_with(vec![
            ("Statistics", req(100, 5000.0)),        // roi 50
            ("Machine Learning", req(200, 15000.0)), // roi 75
        ]);
        let gaps = run(&matches, &profile, &PriorityWeights::default());
        assert_eq!(gaps[0].skill_name, "Machine Learning");
        assert!((gaps[0].roi - 75.0).abs() < 1e-9);
        assert_eq!(gaps[1].skill_name, "Statistics");
        assert!((gaps[1].roi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_roi_keeps_encounter_order() {
        let matches = vec![missing("Docker", 3), missing("Git", 3)];
        let profile = profile_with(vec![
            ("Docker", req(100, 5000.0)),
            ("Git", req(100, 5000.0)),
        ]);
        let gaps = run(&matches, &profile, &PriorityWeights::default());
        assert_eq!(gaps[0].skill_name, "Docker");
        assert_eq!(gaps[1].skill_name, "Git");
    }

    #[test]
    fn test_missing_detail_substitutes_documented_defaults() {
        let gaps = run(
            &[missing("Tableau", 4)],
            &profile_with(vec![]),
            &PriorityWeights::default(),
        );
        let gap = &gaps[0];
        assert_eq!(gap.learning_hours, 100);
        assert!((gap.salary_impact - 5000.0).abs() < 1e-9);
        assert!((gap.market_demand - 0.5).abs() < 1e-9);
        assert!((gap.job_relevance - 0.5).abs() < 1e-9);
        // complexity default 3, level 4 → 3×2 + 4 = 10
        assert_eq!(gap.difficulty, 10);
    }

    #[test]
    fn test_gap_carries_fixed_method_and_confidence() {
        let gaps = run(
            &[missing("SQL", 3)],
            &profile_with(vec![]),
            &PriorityWeights::default(),
        );
        assert_eq!(gaps[0].extraction_method, "hybrid");
        assert!((gaps[0].confidence_score - GAP_CONFIDENCE).abs() < 1e-9);
        assert!(gaps[0].recommended_resources.is_empty());
    }

    #[test]
    fn test_roi_guards_zero_hours() {
        let profile = profile_with(vec![("SQL", req(0, 5000.0))]);
        let gaps = run(&[missing("SQL", 3)], &profile, &PriorityWeights::default());
        assert!((gaps[0].roi - 5000.0).abs() < 1e-9); // denominator floors at 1
    }

    #[test]
    fn test_difficulty_is_capped_at_ten() {
        assert_eq!(estimate_difficulty(5, 5), 10);
        assert_eq!(estimate_difficulty(2, 3), 7);
        assert_eq!(estimate_difficulty(1, 1), 3);
    }

    #[test]
    fn test_weeks_to_proficiency_is_hours_over_forty() {
        let profile = profile_with(vec![("SQL", req(60, 5000.0))]);
        let gaps = run(&[missing("SQL", 3)], &profile, &PriorityWeights::default());
        assert!((gaps[0].weeks_to_proficiency - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_priority_prefers_quick_wins() {
        let w = PriorityWeights::default();
        // Tiny effort, solid reward: 0.6×(10−1) + 0.4×5 = 7.4 → High.
        assert_eq!(determine_priority(30, 15_000.0, &w), SkillPriority::High);
        // Long slog, same reward: 0.6×0 + 0.4×5 = 2.0 → Low.
        assert_eq!(determine_priority(400, 15_000.0, &w), SkillPriority::Low);
    }

    #[test]
    fn test_priority_boundaries_map_to_higher_bucket() {
        let w = PriorityWeights::default();
        // 0 hours, 18750 salary: 0.6×10 + 0.4×6.25 = 8.5 ≥ 7.5 → Critical.
        assert_eq!(determine_priority(0, 18_750.0, &w), SkillPriority::Critical);
        // Exactly 7.5: 0 hours, salary_score 3.75 → 6 + 1.5 = 7.5.
        assert_eq!(determine_priority(0, 11_250.0, &w), SkillPriority::Critical);
        // Exactly 6.0: 0 hours, salary_score 0 → 6.0.
        assert_eq!(determine_priority(0, 0.0, &w), SkillPriority::High);
        // Exactly 4.0: 150 hours (hour_score 5), 7500 salary (salary_score 2.5)
        // → 0.6×5 + 0.4×2.5 = 4.0.
        assert_eq!(determine_priority(150, 7_500.0, &w), SkillPriority::Medium);
        // Below 4.0 → Low.
        assert_eq!(determine_priority(200, 0.0, &w), SkillPriority::Low);
    }
}
