//! Stage 1 — lexical extraction: whole-word regex scan over the taxonomy,
//! fuzzy re-normalization to canonical names, then term-frequency scoring
//! against the job description.
//!
//! This stage fails softly: mentions that never resolve to the taxonomy are
//! dropped silently, indistinguishable from "not mentioned".

use std::collections::BTreeMap;

use tracing::debug;

use crate::store::SkillTaxonomy;

/// Minimum token-sort similarity (0–100) for a fuzzy normalization to stick.
pub const FUZZY_ACCEPT_THRESHOLD: f64 = 75.0;

/// One (original, canonical, confidence) normalization triple.
#[derive(Debug, Clone)]
pub struct NormalizedSkill {
    pub original: String,
    pub normalized: String,
    /// Token-sort similarity scaled to 0–1.
    pub confidence: f64,
}

/// Final per-skill lexical score.
#[derive(Debug, Clone)]
pub struct SkillScore {
    pub confidence: f64,
    /// (job-description occurrences + 1) × confidence. Inflates skills the
    /// *job* emphasizes, not the resume.
    pub tf_score: f64,
    pub frequency: usize,
}

/// Full output of the lexical stage.
#[derive(Debug, Clone, Default)]
pub struct LexicalExtraction {
    /// Canonical skill → extraction confidence from the regex scan.
    pub extracted: BTreeMap<String, f64>,
    pub normalized: Vec<NormalizedSkill>,
    /// Canonical skill → lexical score, consumed by the semantic stage.
    pub scored: BTreeMap<String, SkillScore>,
}

/// Runs the full stage: scan → normalize → score.
pub fn run(taxonomy: &SkillTaxonomy, resume_text: &str, job_desc: &str) -> LexicalExtraction {
    let extracted = regex_extract(taxonomy, resume_text);
    debug!("lexical: regex extracted {} skills", extracted.len());

    let normalized = fuzzy_normalize(&extracted, taxonomy);
    debug!("lexical: fuzzy normalized {} skills", normalized.len());

    let scored = term_frequency_score(&normalized, job_desc);
    debug!("lexical: scored {} skills", scored.len());

    LexicalExtraction {
        extracted,
        normalized,
        scored,
    }
}

/// Tests every taxonomy entry (canonical name and aliases) as a
/// case-insensitive whole-word pattern; the first hit records the canonical
/// skill at confidence 1.0 and stops scanning that entry.
fn regex_extract(taxonomy: &SkillTaxonomy, text: &str) -> BTreeMap<String, f64> {
    let mut skills = BTreeMap::new();
    for entry in taxonomy.entries() {
        if entry.matches(text) {
            skills.insert(entry.canonical.clone(), 1.0);
        }
    }
    skills
}

/// Re-normalizes each extracted name against the canonical vocabulary by
/// token-sort similarity, keeping only matches at or above
/// `FUZZY_ACCEPT_THRESHOLD`.
fn fuzzy_normalize(
    extracted: &BTreeMap<String, f64>,
    taxonomy: &SkillTaxonomy,
) -> Vec<NormalizedSkill> {
    let mut normalized = Vec::new();
    for original in extracted.keys() {
        let best = taxonomy
            .canonical_names()
            .map(|c| (c, token_sort_ratio(original, c)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((canonical, ratio)) = best {
            if ratio >= FUZZY_ACCEPT_THRESHOLD {
                normalized.push(NormalizedSkill {
                    original: original.clone(),
                    normalized: canonical.to_string(),
                    confidence: ratio / 100.0,
                });
            }
        }
    }
    normalized
}

/// Scores each normalized skill by case-insensitive substring occurrences in
/// the job description: `(count + 1) × confidence`.
fn term_frequency_score(
    normalized: &[NormalizedSkill],
    job_desc: &str,
) -> BTreeMap<String, SkillScore> {
    let job_lower = job_desc.to_lowercase();
    let mut scored = BTreeMap::new();
    for item in normalized {
        let frequency = job_lower.matches(&item.normalized.to_lowercase()).count();
        scored.insert(
            item.normalized.clone(),
            SkillScore {
                confidence: item.confidence,
                tf_score: (frequency as f64 + 1.0) * item.confidence,
                frequency,
            },
        );
    }
    scored
}

/// Token-sort similarity on a 0–100 scale: lowercase, sort whitespace
/// tokens, then normalized Levenshtein on the rejoined strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&sort_tokens(a), &sort_tokens(b)) * 100.0
}

fn sort_tokens(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
