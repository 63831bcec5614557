//! End-to-end `generate` pipeline: prompt → endpoint → classify.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use mailsplit_client::GenerationClient;
use mailsplit_shared::{CategoryMapping, ClientConfig, Result};

use crate::classify::classify;

/// Configuration for the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Free-form prompt describing the emails to write.
    pub prompt: String,
    /// Endpoint and timeout.
    pub client: ClientConfig,
}

/// Result of the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// All six categories, fallback-filled.
    pub mapping: CategoryMapping,
    /// The unprocessed text returned by the endpoint.
    pub raw: String,
    /// When the response was classified.
    pub generated_at: DateTime<Utc>,
    /// Total elapsed time, request included.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes successfully.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Run the full `generate` pipeline.
///
/// 1. Request generation from the endpoint (blank prompts are rejected
///    before anything is sent)
/// 2. Classify the returned text
///
/// Any failure returns before classification, so no partial mapping exists.
#[instrument(skip_all, fields(endpoint = %config.client.endpoint))]
pub async fn generate(
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateResult> {
    let start = Instant::now();

    progress.phase("Generating");
    let client = GenerationClient::new(&config.client)?;
    let raw = client.generate(&config.prompt).await?;

    progress.phase("Classifying");
    let mapping = classify(&raw);

    let result = GenerateResult {
        mapping,
        raw,
        generated_at: Utc::now(),
        elapsed: start.elapsed(),
    };

    info!(
        generated = result.mapping.generated_count(),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "generate pipeline complete"
    );

    progress.done(&result);
    Ok(result)
}
