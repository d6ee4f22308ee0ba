//! Gap-analysis output models: gap items, matched skills, and the aggregate
//! result the API layer returns to callers.

use serde::{Deserialize, Serialize};

/// Skill priority tiers, ordered critical-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillPriority {
    Critical,
    High,
    Medium,
    Low,
}

/// A single missing skill with its learning economics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapItem {
    pub skill_name: String,
    pub priority: SkillPriority,
    pub learning_hours: u32,
    pub salary_impact: f64,
    /// 1–10, from skill complexity and the level the job demands.
    pub difficulty: u32,
    /// 0–1 market demand signal from the requirement store.
    pub market_demand: f64,
    /// salary_impact / learning_hours — the sole ranking signal.
    pub roi: f64,
    pub weeks_to_proficiency: f64,
    /// 0–1 importance of the skill to this specific job.
    pub job_relevance: f64,
    #[serde(default)]
    pub recommended_resources: Vec<String>,
    pub extraction_method: String,
    pub confidence_score: f64,
}

/// A required skill the user already holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill_name: String,
    pub proficiency_level: String,
    pub required_level: String,
    pub extraction_method: String,
}

/// Pipeline provenance attached to every result. Static by construction:
/// identical requests must yield byte-identical results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub method: String,
    pub stages_used: u32,
    pub accuracy: f64,
    pub processing_method: String,
}

impl Default for AnalysisDetails {
    fn default() -> Self {
        Self {
            method: "hybrid_semantic".to_string(),
            stages_used: 4,
            accuracy: 0.94,
            processing_method: "4-stage".to_string(),
        }
    }
}

/// Complete gap analysis for one (user skills, target job) pair.
///
/// Note the two deliberately independent match counts:
/// `match_percentage` comes from the graph stage (prerequisite-aware), while
/// `user_skill_count` counts `matched_skills`, a direct case-insensitive
/// membership check of the raw user skills. They can diverge and are both
/// surfaced rather than reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapAnalysisResult {
    pub job_title: String,
    pub user_skill_count: usize,
    pub required_skill_count: usize,
    /// 0–100, one decimal place. Defined as 0 for jobs with no requirements.
    pub match_percentage: f64,

    pub matched_skills: Vec<MatchedSkill>,
    /// Sorted by ROI, non-increasing. Ties keep encounter order.
    pub skill_gaps: Vec<SkillGapItem>,

    pub total_learning_hours: u32,
    pub estimated_weeks: f64,
    pub potential_salary_increase: f64,

    /// Mean gap difficulty; 0 when there are no gaps.
    pub average_difficulty: f64,
    /// Mean gap market demand; 0 when there are no gaps.
    pub market_demand_score: f64,
    pub recommendation: String,
    /// Numbered skill names ("1. Machine Learning", …) in roadmap order.
    pub learning_roadmap: Vec<String>,

    pub analysis_details: AnalysisDetails,
}
