use serde::{Deserialize, Serialize};

/// Analysis request as posted by the API layer (and read from stdin by the
/// worker binary). The engine only needs plain skill-name strings; it does
/// not care how upstream extractors produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub user_skills: Vec<String>,
    pub target_job: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_desc: Option<String>,
}
