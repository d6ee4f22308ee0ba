use thiserror::Error;

/// Engine-level error type.
/// The surrounding API layer maps these onto its own response shapes;
/// the engine itself never retries since it performs no I/O during analysis.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Target job is absent from the requirement store. A validation
    /// failure, surfaced before any pipeline stage runs.
    #[error("Job profile not found: {0}")]
    JobNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed knowledge-store entries and other internal faults.
    #[error("Internal engine error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Stable machine-readable code for the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::JobNotFound(_) => "JOB_NOT_FOUND",
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::Internal(e) => {
                tracing::error!("Internal engine error: {e:?}");
                "INTERNAL_ERROR"
            }
        }
    }
}
