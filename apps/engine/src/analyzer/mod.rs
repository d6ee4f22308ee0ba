// 4-stage hybrid gap analysis.
// Stage 1 lexical: regex + fuzzy-alias normalization + term frequency.
// Stage 2 semantic: cached embeddings + context scoring.
// Stage 3 graph: prerequisite-aware classification of required skills.
// Stage 4 quantify: ROI-ranked gap items.
// The orchestrator here sequences the stages and compiles the result.

pub mod graph;
pub mod lexical;
pub mod quantify;
pub mod semantic;

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info};

use crate::config::{AnalyzerConfig, RoadmapOrder};
use crate::embedding::{Embedder, EmbeddingCache, HashEmbedder};
use crate::errors::EngineError;
use crate::models::skill_gap::{
    AnalysisDetails, MatchedSkill, SkillGapAnalysisResult, SkillGapItem, SkillPriority,
};
use crate::store::{JobProfile, JobRequirementStore, SkillGraph, SkillNode, SkillTaxonomy};

/// The gap-analysis engine. Holds the immutable knowledge store, the
/// prerequisite graph projected from it, and the shared embedding cache.
/// One instance serves the whole process; `analyze` is `&self` and safe to
/// call from concurrent workers behind an `Arc`.
pub struct SkillGapAnalyzer {
    store: JobRequirementStore,
    taxonomy: SkillTaxonomy,
    graph: SkillGraph,
    cache: EmbeddingCache,
    embedder: Arc<dyn Embedder>,
    config: AnalyzerConfig,
}

impl SkillGapAnalyzer {
    pub fn new(store: JobRequirementStore, taxonomy: SkillTaxonomy) -> Self {
        Self::with_embedder(store, taxonomy, Arc::new(HashEmbedder), AnalyzerConfig::default())
    }

    /// Full-control constructor: swap the embedding backend or tune the
    /// scoring knobs without touching any stage.
    pub fn with_embedder(
        store: JobRequirementStore,
        taxonomy: SkillTaxonomy,
        embedder: Arc<dyn Embedder>,
        config: AnalyzerConfig,
    ) -> Self {
        let graph = SkillGraph::from_store(&store);
        let cache = EmbeddingCache::new();
        // The taxonomy is closed and small: precompute every vector so
        // steady-state cache reads never contend with writes.
        cache.warm(taxonomy.canonical_names(), embedder.as_ref());

        info!(
            "Skill gap analyzer initialized: {} jobs, {} taxonomy skills",
            store.available_jobs().len(),
            taxonomy.len()
        );

        Self {
            store,
            taxonomy,
            graph,
            cache,
            embedder,
            config,
        }
    }

    /// Every job title the store knows, exactly once, sorted.
    pub fn available_jobs(&self) -> Vec<String> {
        self.store.available_jobs()
    }

    /// Runs the full 4-stage analysis for one user against one target job.
    ///
    /// `resume_text` defaults to the space-joined user skills and `job_desc`
    /// to the space-joined required-skill names when not supplied.
    pub fn analyze(
        &self,
        user_skills: &[String],
        target_job: &str,
        resume_text: Option<&str>,
        job_desc: Option<&str>,
    ) -> Result<SkillGapAnalysisResult, EngineError> {
        let profile = self
            .store
            .get(target_job)
            .ok_or_else(|| EngineError::JobNotFound(target_job.to_string()))?;
        let nodes = self.graph.job(target_job).ok_or_else(|| {
            EngineError::Internal(anyhow!("job '{target_job}' present in store but not in graph"))
        })?;

        debug!("Analyzing gap for '{target_job}' with {} user skills", user_skills.len());

        let resume_text = resume_text
            .map(str::to_string)
            .unwrap_or_else(|| user_skills.join(" "));
        let job_desc = job_desc.map(str::to_string).unwrap_or_else(|| {
            profile.skills.keys().cloned().collect::<Vec<_>>().join(" ")
        });

        let lexical = lexical::run(&self.taxonomy, &resume_text, &job_desc);
        let enriched = semantic::run(
            &lexical,
            &job_desc,
            &self.taxonomy,
            &self.cache,
            self.embedder.as_ref(),
            &self.config.context_weights,
        );
        let matches = graph::run(&enriched, nodes);
        let gaps = quantify::run(&matches, profile, &self.config.priority_weights);

        Ok(self.compile(user_skills, target_job, profile, nodes, &matches, gaps))
    }

    fn compile(
        &self,
        user_skills: &[String],
        target_job: &str,
        profile: &JobProfile,
        nodes: &BTreeMap<String, SkillNode>,
        matches: &[graph::GraphMatch],
        gaps: Vec<SkillGapItem>,
    ) -> SkillGapAnalysisResult {
        // Prerequisite-aware count from the graph stage.
        let matched_count = graph::matched_count(matches);
        let total_required = profile.skills.len();
        let match_percentage = if total_required == 0 {
            0.0
        } else {
            round1(matched_count as f64 / total_required as f64 * 100.0)
        };

        let total_learning_hours: u32 = gaps.iter().map(|g| g.learning_hours).sum();
        let estimated_weeks = round1(f64::from(total_learning_hours) / quantify::HOURS_PER_WEEK);
        let potential_salary_increase: f64 = gaps.iter().map(|g| g.salary_impact).sum();
        let average_difficulty = if gaps.is_empty() {
            0.0
        } else {
            round1(gaps.iter().map(|g| f64::from(g.difficulty)).sum::<f64>() / gaps.len() as f64)
        };
        let market_demand_score =
            gaps.iter().map(|g| g.market_demand).sum::<f64>() / gaps.len().max(1) as f64;

        let learning_roadmap = render_roadmap(&gaps, nodes, self.config.roadmap_order);
        let recommendation = build_recommendation(match_percentage, estimated_weeks, &gaps);

        // Deliberately simpler than the graph stage: direct case-insensitive
        // membership of the raw user skills, ignoring prerequisite logic.
        // Can diverge from matched_count; both are surfaced, never unified.
        let user_skills_lower: HashSet<String> =
            user_skills.iter().map(|s| s.to_lowercase()).collect();
        let matched_skills: Vec<MatchedSkill> = profile
            .skills
            .keys()
            .filter(|req_skill| user_skills_lower.contains(&req_skill.to_lowercase()))
            .map(|req_skill| MatchedSkill {
                skill_name: req_skill.clone(),
                proficiency_level: "intermediate".to_string(),
                required_level: "expert".to_string(),
                extraction_method: "hybrid".to_string(),
            })
            .collect();

        SkillGapAnalysisResult {
            job_title: target_job.to_string(),
            user_skill_count: matched_skills.len(),
            required_skill_count: total_required,
            match_percentage,
            matched_skills,
            skill_gaps: gaps,
            total_learning_hours,
            estimated_weeks,
            potential_salary_increase,
            average_difficulty,
            market_demand_score,
            recommendation,
            learning_roadmap,
            analysis_details: AnalysisDetails::default(),
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Renders the numbered roadmap. `Roi` keeps the gap-list order;
/// `PrerequisiteFirst` stably floats prerequisite gaps ahead of their
/// dependents, preserving ROI order among peers.
fn render_roadmap(
    gaps: &[SkillGapItem],
    nodes: &BTreeMap<String, SkillNode>,
    order: RoadmapOrder,
) -> Vec<String> {
    let ordered: Vec<&SkillGapItem> = match order {
        RoadmapOrder::Roi => gaps.iter().collect(),
        RoadmapOrder::PrerequisiteFirst => prerequisite_first(gaps, nodes),
    };
    ordered
        .iter()
        .enumerate()
        .map(|(i, g)| format!("{}. {}", i + 1, g.skill_name))
        .collect()
}

fn prerequisite_first<'a>(
    gaps: &'a [SkillGapItem],
    nodes: &BTreeMap<String, SkillNode>,
) -> Vec<&'a SkillGapItem> {
    let gap_names: HashSet<String> = gaps.iter().map(|g| g.skill_name.to_lowercase()).collect();
    let mut emitted: HashSet<String> = HashSet::new();
    let mut remaining: Vec<&SkillGapItem> = gaps.iter().collect();
    let mut ordered = Vec::with_capacity(gaps.len());

    while !remaining.is_empty() {
        let next = remaining.iter().position(|g| {
            nodes
                .get(&g.skill_name)
                .map(|n| {
                    n.prerequisites.iter().all(|p| {
                        let p = p.to_lowercase();
                        !gap_names.contains(&p) || emitted.contains(&p)
                    })
                })
                .unwrap_or(true)
        });
        match next {
            Some(i) => {
                let gap = remaining.remove(i);
                emitted.insert(gap.skill_name.to_lowercase());
                ordered.push(gap);
            }
            // Prerequisite cycle: fall back to ROI order for the rest.
            None => {
                ordered.append(&mut remaining);
            }
        }
    }
    ordered
}

/// Recommendation bucketed on match percentage.
fn build_recommendation(
    match_percentage: f64,
    estimated_weeks: f64,
    gaps: &[SkillGapItem],
) -> String {
    if match_percentage >= 80.0 {
        format!(
            "Excellent! You're well-prepared. Focus on {} remaining skills to master the role.",
            gaps.len()
        )
    } else if match_percentage >= 60.0 {
        let high_priority = gaps
            .iter()
            .filter(|g| g.priority == SkillPriority::High)
            .count();
        format!(
            "Good progress! Learn {high_priority} HIGH priority skills. \
             {estimated_weeks:.0} weeks with 40hrs/week effort."
        )
    } else if match_percentage >= 40.0 {
        format!(
            "You have foundation skills. Invest {estimated_weeks:.0} weeks in focused learning. \
             Start with highest ROI skills first."
        )
    } else {
        let focus = gaps
            .first()
            .map(|g| g.skill_name.as_str())
            .unwrap_or("core fundamentals");
        format!(
            "Consider dedicated training courses. You need {estimated_weeks:.0} weeks to close \
             critical gaps. Focus on: {focus}."
        )
    }
}
