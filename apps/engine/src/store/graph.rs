//! Prerequisite graph: a pure projection of the job-requirement store used
//! by the graph-matching stage. Built once at startup, never edited.

use std::collections::BTreeMap;

use super::job_requirements::JobRequirementStore;

/// Default required proficiency level when a skill does not declare one.
pub const DEFAULT_LEVEL: u32 = 3;

/// One required skill as the graph stage sees it.
#[derive(Debug, Clone)]
pub struct SkillNode {
    /// Required proficiency level, projected from `complexity`.
    pub level: u32,
    pub prerequisites: Vec<String>,
    pub category: String,
}

/// job title → required-skill name → node.
#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    jobs: BTreeMap<String, BTreeMap<String, SkillNode>>,
}

impl SkillGraph {
    pub fn from_store(store: &JobRequirementStore) -> Self {
        let mut jobs = BTreeMap::new();
        for (job_title, profile) in store.iter() {
            let mut nodes = BTreeMap::new();
            for (skill_name, req) in &profile.skills {
                nodes.insert(
                    skill_name.clone(),
                    SkillNode {
                        level: if req.complexity == 0 {
                            DEFAULT_LEVEL
                        } else {
                            req.complexity
                        },
                        prerequisites: req.prerequisites.clone(),
                        category: req.category.clone(),
                    },
                );
            }
            jobs.insert(job_title.clone(), nodes);
        }
        Self { jobs }
    }

    /// The required-skill nodes for a job, in deterministic name order.
    pub fn job(&self, job_title: &str) -> Option<&BTreeMap<String, SkillNode>> {
        self.jobs.get(job_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::job_requirements::{JobProfile, SkillRequirement};

    fn store_with(skills: Vec<(&str, u32, Vec<&str>)>) -> JobRequirementStore {
        let mut profile = JobProfile::default();
        for (name, complexity, prereqs) in skills {
            profile.skills.insert(
                name.to_string(),
                SkillRequirement {
                    complexity,
                    prerequisites: prereqs.into_iter().map(String::from).collect(),
                    ..SkillRequirement::default()
                },
            );
        }
        let mut jobs = BTreeMap::new();
        jobs.insert("Backend Developer".to_string(), profile);
        JobRequirementStore::from_jobs(jobs)
    }

    #[test]
    fn test_projection_carries_level_and_prerequisites() {
        let store = store_with(vec![("Docker", 4, vec!["Linux"])]);
        let graph = SkillGraph::from_store(&store);
        let node = &graph.job("Backend Developer").unwrap()["Docker"];
        assert_eq!(node.level, 4);
        assert_eq!(node.prerequisites, vec!["Linux"]);
    }

    #[test]
    fn test_zero_complexity_falls_back_to_default_level() {
        let store = store_with(vec![("SQL", 0, vec![])]);
        let graph = SkillGraph::from_store(&store);
        assert_eq!(
            graph.job("Backend Developer").unwrap()["SQL"].level,
            DEFAULT_LEVEL
        );
    }

    #[test]
    fn test_unknown_job_is_none() {
        let graph = SkillGraph::from_store(&JobRequirementStore::default());
        assert!(graph.job("Astronaut").is_none());
    }
}
