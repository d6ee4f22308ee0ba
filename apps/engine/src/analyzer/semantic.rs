//! Stage 2 — semantic enrichment: cached embeddings, a weighted context
//! score, and top-K similar-skill lookup over the taxonomy vocabulary.

use std::sync::Arc;

use tracing::debug;

use crate::config::ContextWeights;
use crate::embedding::{cosine_similarity, Embedder, EmbeddingCache};
use crate::store::SkillTaxonomy;

use super::lexical::LexicalExtraction;

/// How many semantically-similar taxonomy skills to attach per skill.
pub const SIMILAR_TOP_K: usize = 2;

/// A lexically-scored skill enriched with its embedding and job context.
#[derive(Debug, Clone)]
pub struct EnrichedSkill {
    pub skill: String,
    pub confidence: f64,
    pub tf_score: f64,
    pub embedding: Arc<Vec<f32>>,
    /// 0–1 composite relevance of this skill in the job context.
    pub context_score: f64,
    /// Highest-cosine taxonomy skills, self excluded.
    pub similar_skills: Vec<String>,
}

/// Enriches every scored skill from the lexical stage. Cache misses compute
/// through the embedder and populate the shared cache.
pub fn run(
    lexical: &LexicalExtraction,
    job_desc: &str,
    taxonomy: &SkillTaxonomy,
    cache: &EmbeddingCache,
    embedder: &dyn Embedder,
    weights: &ContextWeights,
) -> Vec<EnrichedSkill> {
    let job_lower = job_desc.to_lowercase();

    let enriched: Vec<EnrichedSkill> = lexical
        .scored
        .iter()
        .map(|(skill, score)| {
            let embedding = cache.get_or_compute(skill, embedder);
            let context_score = context_score(skill, &job_lower, weights);
            let similar_skills =
                find_similar_skills(skill, &embedding, taxonomy, cache, embedder, SIMILAR_TOP_K);
            EnrichedSkill {
                skill: skill.clone(),
                confidence: score.confidence,
                tf_score: score.tf_score,
                embedding,
                context_score,
                similar_skills,
            }
        })
        .collect();

    debug!("semantic: enriched {} skills with context", enriched.len());
    enriched
}

/// Weighted context score, clamped to 1.0. The semantic and industry terms
/// are placeholder constants until a real embedding backend supplies them;
/// the two middle terms saturate on job-description mentions.
fn context_score(skill: &str, job_desc_lower: &str, w: &ContextWeights) -> f64 {
    let occurrences = job_desc_lower.matches(&skill.to_lowercase()).count() as f64;
    let job_relevance = (occurrences / w.relevance_cap_mentions).min(1.0);
    let frequency = (occurrences / w.frequency_cap_mentions).min(1.0);

    let score = w.semantic * w.semantic_placeholder
        + w.job_relevance * job_relevance
        + w.frequency * frequency
        + w.industry * w.industry_weight;

    score.min(1.0)
}

/// Cosine top-K over every taxonomy skill's cached embedding, excluding the
/// skill itself. Ties break on name so results are deterministic.
fn find_similar_skills(
    skill: &str,
    embedding: &[f32],
    taxonomy: &SkillTaxonomy,
    cache: &EmbeddingCache,
    embedder: &dyn Embedder,
    top_k: usize,
) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = taxonomy
        .canonical_names()
        .filter(|c| *c != skill)
        .map(|c| {
            let other = cache.get_or_compute(c, embedder);
            (cosine_similarity(embedding, &other), c)
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(top_k)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::lexical;
    use crate::embedding::HashEmbedder;

    fn enrich(resume: &str, job_desc: &str) -> Vec<EnrichedSkill> {
        let taxonomy = SkillTaxonomy::builtin();
        let lexical = lexical::run(&taxonomy, resume, job_desc);
        let cache = EmbeddingCache::new();
        run(
            &lexical,
            job_desc,
            &taxonomy,
            &cache,
            &HashEmbedder,
            &ContextWeights::default(),
        )
    }

    #[test]
    fn test_context_score_floor_with_no_mentions() {
        let w = ContextWeights::default();
        // 0.4×0.5 + 0 + 0 + 0.1×0.8 = 0.28
        let score = context_score("python", "unrelated text", &w);
        assert!((score - 0.28).abs() < 1e-9);
    }

    #[test]
    fn test_context_score_saturates_and_clamps() {
        let w = ContextWeights::default();
        let jd = "python ".repeat(20).to_lowercase();
        // Both mention terms saturated: 0.2 + 0.3 + 0.2 + 0.08 = 0.78
        let score = context_score("python", &jd, &w);
        assert!((score - 0.78).abs() < 1e-9);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_enrichment_carries_lexical_scores() {
        let enriched = enrich("Python services", "Python role");
        let python = enriched.iter().find(|e| e.skill == "Python").unwrap();
        assert!((python.confidence - 1.0).abs() < 1e-9);
        assert!((python.tf_score - 2.0).abs() < 1e-9);
        assert_eq!(python.embedding.len(), crate::embedding::EMBEDDING_DIM);
    }

    #[test]
    fn test_similar_skills_exclude_self_and_respect_top_k() {
        let enriched = enrich("Python", "Python");
        let python = enriched.iter().find(|e| e.skill == "Python").unwrap();
        assert_eq!(python.similar_skills.len(), SIMILAR_TOP_K);
        assert!(!python.similar_skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_similar_skills_are_deterministic() {
        let a = enrich("Docker and SQL", "Docker");
        let b = enrich("Docker and SQL", "Docker");
        let sim_a: Vec<_> = a.iter().map(|e| e.similar_skills.clone()).collect();
        let sim_b: Vec<_> = b.iter().map(|e| e.similar_skills.clone()).collect();
        assert_eq!(sim_a, sim_b);
    }

    #[test]
    fn test_cache_grows_with_taxonomy_lookups() {
        let taxonomy = SkillTaxonomy::builtin();
        let lexical = lexical::run(&taxonomy, "Python", "Python");
        let cache = EmbeddingCache::new();
        run(
            &lexical,
            "Python",
            &taxonomy,
            &cache,
            &HashEmbedder,
            &ContextWeights::default(),
        );
        // Similar-skill lookup touches the whole vocabulary.
        assert_eq!(cache.len(), taxonomy.len());
    }
}
