//! HTTP client for the email generation endpoint.
//!
//! The endpoint takes `{ "prompt": "..." }` and answers with
//! `{ "success": bool, "output": "..." }`. Only a successful response's
//! `output` is handed back; everything else becomes a [`MailsplitError`] so the
//! caller never classifies text from a failed generation.

use std::time::Duration;

use mailsplit_shared::{ClientConfig, GenerateRequest, GenerateResponse, MailsplitError, Result};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

/// Maximum response size we accept (5 MB).
const MAX_RESPONSE_SIZE: u64 = 5 * 1024 * 1024;

/// User-Agent string for generation requests.
const USER_AGENT: &str = concat!("mailsplit/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// GenerationClient
// ---------------------------------------------------------------------------

/// Client bound to one generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: Client,
    endpoint: Url,
}

impl GenerationClient {
    /// Build a client from runtime configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailsplitError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Send `prompt` and return the generated text.
    ///
    /// Fails without sending anything if the prompt is blank.
    #[instrument(skip_all, fields(endpoint = %self.endpoint, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        validate_prompt(prompt)?;

        info!("requesting generation");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| MailsplitError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailsplitError::Network(format!(
                "{}: HTTP {status}",
                self.endpoint
            )));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(MailsplitError::response(format!(
                    "response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
                )));
            }
        }

        let body = response.text().await.map_err(|e| {
            MailsplitError::Network(format!("{}: failed to read body: {e}", self.endpoint))
        })?;

        debug!(body_len = body.len(), "response received");

        let parsed = parse_response(&body)?;
        if !parsed.success {
            warn!("endpoint reported an unsuccessful generation");
            return Err(MailsplitError::Generation(
                "endpoint reported success: false".into(),
            ));
        }

        info!(output_len = parsed.output.len(), "generation complete");
        Ok(parsed.output)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject prompts that are empty or whitespace only.
fn validate_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(MailsplitError::validation("prompt must not be empty"));
    }
    Ok(())
}

fn parse_response(body: &str) -> Result<GenerateResponse> {
    serde_json::from_str(body)
        .map_err(|e| MailsplitError::response(format!("malformed generation response: {e}")))
}
