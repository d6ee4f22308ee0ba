// Knowledge store: job-requirement database, skill taxonomy, and the
// prerequisite graph projected from the requirements.
// All three load once at startup and are immutable for the process lifetime.

pub mod graph;
pub mod job_requirements;
pub mod taxonomy;

pub use graph::{SkillGraph, SkillNode};
pub use job_requirements::{JobProfile, JobRequirementStore, SkillRequirement};
pub use taxonomy::{SkillTaxonomy, TaxonomyEntry};
