//! Job-requirement store: job title → required skills with their learning
//! economics. Loaded once from JSON at startup; immutable afterwards.
//!
//! A missing or unreadable file yields an *empty* store (fails open) so the
//! process still starts; every analysis then fails with `JobNotFound`. The
//! degradation is logged at `error!` so operators cannot miss it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::models::skill_gap::SkillPriority;

/// Per-skill requirement detail. Every field carries the documented default
/// so sparse store entries deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequirement {
    /// Skill complexity, 1–5.
    #[serde(default = "default_complexity")]
    pub complexity: u32,
    /// Skills that must be held before this one counts as attainable.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_learning_hours")]
    pub learning_hours: u32,
    #[serde(default = "default_salary_impact")]
    pub salary_impact: f64,
    /// 0–1 market demand signal.
    #[serde(default = "default_market_demand")]
    pub market_demand: f64,
    /// 0–1 importance of the skill to this job.
    #[serde(default = "default_importance")]
    pub importance: f64,
    /// Store-declared base priority. Carried through for callers; the
    /// computed gap priority is a pure function of hours and salary.
    #[serde(default = "default_priority")]
    pub priority: SkillPriority,
}

impl Default for SkillRequirement {
    fn default() -> Self {
        Self {
            complexity: default_complexity(),
            prerequisites: Vec::new(),
            category: default_category(),
            learning_hours: default_learning_hours(),
            salary_impact: default_salary_impact(),
            market_demand: default_market_demand(),
            importance: default_importance(),
            priority: default_priority(),
        }
    }
}

fn default_complexity() -> u32 {
    3
}
fn default_category() -> String {
    "technical".to_string()
}
fn default_learning_hours() -> u32 {
    100
}
fn default_salary_impact() -> f64 {
    5000.0
}
fn default_market_demand() -> f64 {
    0.5
}
fn default_importance() -> f64 {
    0.5
}
fn default_priority() -> SkillPriority {
    SkillPriority::Medium
}

/// One job profile: required skill name → requirement detail.
/// `BTreeMap` keeps iteration (and therefore gap encounter order)
/// deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobProfile {
    #[serde(default)]
    pub skills: BTreeMap<String, SkillRequirement>,
}

/// The requirement database. Read-only after load; needs no locking.
#[derive(Debug, Clone, Default)]
pub struct JobRequirementStore {
    jobs: BTreeMap<String, JobProfile>,
}

impl JobRequirementStore {
    /// Strict load. Used by tests and by callers that want load failures
    /// surfaced instead of swallowed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading job requirements from {}", path.display()))?;
        let jobs: BTreeMap<String, JobProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing job requirements from {}", path.display()))?;
        Ok(Self { jobs })
    }

    /// Fail-open load: a missing or malformed file yields an empty store.
    /// Analyses against any job then fail with `JobNotFound`.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => {
                info!(
                    "Loaded {} job profiles from {}",
                    store.jobs.len(),
                    path.display()
                );
                store
            }
            Err(e) => {
                error!(
                    "Job requirement store unavailable ({e:#}); continuing with an \
                     EMPTY store — every analysis will fail with JobNotFound"
                );
                Self::default()
            }
        }
    }

    pub fn from_jobs(jobs: BTreeMap<String, JobProfile>) -> Self {
        Self { jobs }
    }

    pub fn get(&self, job_title: &str) -> Option<&JobProfile> {
        self.jobs.get(job_title)
    }

    pub fn contains(&self, job_title: &str) -> bool {
        self.jobs.contains_key(job_title)
    }

    /// Every known job title, exactly once, in sorted order.
    pub fn available_jobs(&self) -> Vec<String> {
        self.jobs.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JobProfile)> {
        self.jobs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
