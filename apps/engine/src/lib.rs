//! Skill-gap analysis engine.
//!
//! A 4-stage pipeline behind a single entry point: lexical extraction
//! against a canonical skill taxonomy, semantic enrichment with cached
//! deterministic embeddings, prerequisite-graph matching, and ROI-ranked gap
//! quantification. The surrounding API layer, document extractors, and
//! dashboard are external collaborators; the engine only needs plain skill
//! strings and a target job title.

pub mod analyzer;
pub mod config;
pub mod embedding;
pub mod errors;
pub mod models;
pub mod store;

pub use analyzer::SkillGapAnalyzer;
pub use config::{AnalyzerConfig, Config, RoadmapOrder};
pub use errors::EngineError;
pub use models::request::AnalyzeRequest;
pub use models::skill_gap::SkillGapAnalysisResult;
pub use store::{JobRequirementStore, SkillTaxonomy};
