//! Stage 3 — graph matching: classifies every job-required skill against the
//! user's resolved skill set using the prerequisite graph.
//!
//! Classification is exhaustive and mutually exclusive: each required skill
//! receives exactly one of Direct, PrerequisiteMet, or Missing.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::SkillNode;

use super::semantic::EnrichedSkill;

/// Match score for a directly-held required skill.
pub const DIRECT_SCORE: f64 = 1.0;
/// Match score when only the prerequisites of a required skill are held.
pub const PREREQUISITE_SCORE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Direct,
    PrerequisiteMet,
    Missing,
}

/// One required skill with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMatch {
    pub skill: String,
    pub match_type: MatchType,
    pub match_score: f64,
    /// Required proficiency level (defaults to 3 upstream).
    pub level: u32,
}

/// Classifies every required skill of the job. `nodes` iterates in
/// deterministic (name) order, which fixes the downstream encounter order.
pub fn run(enriched: &[EnrichedSkill], nodes: &BTreeMap<String, SkillNode>) -> Vec<GraphMatch> {
    let user_skills: HashSet<String> = enriched.iter().map(|e| e.skill.to_lowercase()).collect();

    let mut matches = Vec::with_capacity(nodes.len());
    for (skill, node) in nodes {
        let (match_type, match_score) = classify(skill, node, &user_skills);
        matches.push(GraphMatch {
            skill: skill.clone(),
            match_type,
            match_score,
            level: node.level,
        });
    }

    debug!(
        "graph: {} required skills, {} held",
        matches.len(),
        matched_count(&matches)
    );
    matches
}

fn classify(skill: &str, node: &SkillNode, user_skills: &HashSet<String>) -> (MatchType, f64) {
    if user_skills.contains(&skill.to_lowercase()) {
        return (MatchType::Direct, DIRECT_SCORE);
    }
    if !node.prerequisites.is_empty()
        && node
            .prerequisites
            .iter()
            .all(|p| user_skills.contains(&p.to_lowercase()))
    {
        return (MatchType::PrerequisiteMet, PREREQUISITE_SCORE);
    }
    (MatchType::Missing, 0.0)
}

/// Count of required skills held directly or via prerequisites. Feeds
/// `match_percentage`.
pub fn matched_count(matches: &[GraphMatch]) -> usize {
    matches
        .iter()
        .filter(|m| matches!(m.match_type, MatchType::Direct | MatchType::PrerequisiteMet))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextWeights;
    use crate::embedding::{EmbeddingCache, HashEmbedder};
    use crate::store::SkillTaxonomy;

    fn enriched_for(skills: &[&str]) -> Vec<EnrichedSkill> {
        let taxonomy = SkillTaxonomy::builtin();
        let resume = skills.join(" ");
        let lexical = crate::analyzer::lexical::run(&taxonomy, &resume, &resume);
        crate::analyzer::semantic::run(
            &lexical,
            &resume,
            &taxonomy,
            &EmbeddingCache::new(),
            &HashEmbedder,
            &ContextWeights::default(),
        )
    }

    fn node(level: u32, prerequisites: &[&str]) -> SkillNode {
        SkillNode {
            level,
            prerequisites: prerequisites.iter().map(|s| s.to_string()).collect(),
            category: "technical".to_string(),
        }
    }

    #[test]
    fn test_direct_match_is_case_folded() {
        let mut nodes = BTreeMap::new();
        nodes.insert("PYTHON".to_string(), node(3, &[]));
        let matches = run(&enriched_for(&["Python"]), &nodes);
        assert_eq!(matches[0].match_type, MatchType::Direct);
        assert_eq!(matches[0].match_score, DIRECT_SCORE);
    }

    #[test]
    fn test_prerequisites_all_held_scores_partial() {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "Machine Learning".to_string(),
            node(5, &["Python", "Statistics"]),
        );
        let matches = run(&enriched_for(&["Python", "Statistics"]), &nodes);
        assert_eq!(matches[0].match_type, MatchType::PrerequisiteMet);
        assert_eq!(matches[0].match_score, PREREQUISITE_SCORE);
    }

    #[test]
    fn test_partially_held_prerequisites_are_missing() {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "Machine Learning".to_string(),
            node(5, &["Python", "Statistics"]),
        );
        let matches = run(&enriched_for(&["Python"]), &nodes);
        assert_eq!(matches[0].match_type, MatchType::Missing);
        assert_eq!(matches[0].match_score, 0.0);
    }

    #[test]
    fn test_no_prerequisites_and_not_held_is_missing() {
        let mut nodes = BTreeMap::new();
        nodes.insert("Tableau".to_string(), node(2, &[]));
        let matches = run(&enriched_for(&["Python"]), &nodes);
        assert_eq!(matches[0].match_type, MatchType::Missing);
    }

    #[test]
    fn test_classification_is_exhaustive_and_exclusive() {
        let mut nodes = BTreeMap::new();
        nodes.insert("Python".to_string(), node(3, &[]));
        nodes.insert("Statistics".to_string(), node(3, &[]));
        nodes.insert("Machine Learning".to_string(), node(5, &["Python"]));
        let matches = run(&enriched_for(&["Python"]), &nodes);
        // Every required skill classified exactly once.
        assert_eq!(matches.len(), nodes.len());
        let names: HashSet<&str> = matches.iter().map(|m| m.skill.as_str()).collect();
        assert_eq!(names.len(), nodes.len());
    }

    #[test]
    fn test_matched_count_includes_prerequisite_met() {
        let mut nodes = BTreeMap::new();
        nodes.insert("Python".to_string(), node(3, &[]));
        nodes.insert("Machine Learning".to_string(), node(5, &["Python"]));
        nodes.insert("Tableau".to_string(), node(2, &[]));
        let matches = run(&enriched_for(&["Python"]), &nodes);
        assert_eq!(matched_count(&matches), 2); // direct + prerequisite_met
    }

    #[test]
    fn test_match_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchType::PrerequisiteMet).unwrap(),
            r#""prerequisite_met""#
        );
    }
}
