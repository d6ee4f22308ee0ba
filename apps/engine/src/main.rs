use std::io::Read;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use engine::{
    AnalyzeRequest, Config, JobRequirementStore, SkillGapAnalyzer, SkillTaxonomy,
};

/// One-shot engine worker: reads a single JSON `AnalyzeRequest` from stdin,
/// runs the 4-stage analysis, writes the result JSON to stdout. The HTTP
/// layer in front of this imposes its own request-level timeouts.
fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting skill-gap engine v{}", env!("CARGO_PKG_VERSION"));

    // Fails open: a missing store logs loudly and leaves every job unknown.
    let store = JobRequirementStore::load_or_empty(&config.job_requirements_path);
    let analyzer = SkillGapAnalyzer::new(store, SkillTaxonomy::builtin());

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading analyze request from stdin")?;
    let request: AnalyzeRequest =
        serde_json::from_str(&raw).context("parsing analyze request JSON")?;

    info!(
        "Analyzing gap: {} for {} user skills",
        request.target_job,
        request.user_skills.len()
    );

    match analyzer.analyze(
        &request.user_skills,
        &request.target_job,
        request.resume_text.as_deref(),
        request.job_desc.as_deref(),
    ) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed ({}): {e}", e.code());
            Err(e.into())
        }
    }
}
