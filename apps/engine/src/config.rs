use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Process configuration loaded from environment variables.
/// Only the store path is engine-relevant; everything else (timeouts,
/// transport) belongs to the caller.
#[derive(Debug, Clone)]
pub struct Config {
    pub job_requirements_path: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            job_requirements_path: std::env::var("JOB_REQUIREMENTS_PATH")
                .unwrap_or_else(|_| "data/job_requirements.json".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring constants
// ────────────────────────────────────────────────────────────────────────────

/// Weights for the semantic context score. The semantic and industry terms
/// are fixed placeholder constants inherited from the baseline model; they
/// stay constants until a real embedding backend supplies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextWeights {
    pub semantic: f64,
    pub job_relevance: f64,
    pub frequency: f64,
    pub industry: f64,
    /// Placeholder semantic-similarity term.
    pub semantic_placeholder: f64,
    /// Placeholder industry-weight term.
    pub industry_weight: f64,
    /// Job-description mentions at which the relevance term saturates.
    pub relevance_cap_mentions: f64,
    /// Job-description mentions at which the frequency term saturates.
    pub frequency_cap_mentions: f64,
}

impl Default for ContextWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            job_relevance: 0.3,
            frequency: 0.2,
            industry: 0.1,
            semantic_placeholder: 0.5,
            industry_weight: 0.8,
            relevance_cap_mentions: 5.0,
            frequency_cap_mentions: 3.0,
        }
    }
}

/// Weights and caps for gap priority. Effort is weighted above reward on
/// purpose: the baseline model prefers quick wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub effort: f64,
    pub salary: f64,
    /// Learning hours that normalize to the full 0–10 effort scale.
    pub hours_cap: f64,
    /// Salary impact that normalizes to the full 0–10 salary scale.
    pub salary_cap: f64,
    pub critical_threshold: f64,
    pub high_threshold: f64,
    pub medium_threshold: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            effort: 0.60,
            salary: 0.40,
            hours_cap: 300.0,
            salary_cap: 30_000.0,
            critical_threshold: 7.5,
            high_threshold: 6.0,
            medium_threshold: 4.0,
        }
    }
}

/// Ordering of the rendered learning roadmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadmapOrder {
    /// Pure ROI-descending order, matching the gap list. This can place a
    /// dependent skill ahead of its own prerequisite; it is the documented
    /// baseline behavior.
    #[default]
    Roi,
    /// Stable pass that floats prerequisite gaps ahead of their dependents,
    /// keeping ROI order otherwise. Explicit opt-in.
    PrerequisiteFirst,
}

/// Tunable analyzer knobs. Defaults reproduce the baseline model exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub context_weights: ContextWeights,
    pub priority_weights: PriorityWeights,
    pub roadmap_order: RoadmapOrder,
}
