//! Summarization backends.
//!
//! A [`Summarizer`] turns one chunk of text into a short abstractive summary.
//! The backend is chosen from configuration once at startup and then shared
//! by every request as an `Arc<dyn Summarizer>`.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rig::completion::Prompt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SummarizerConfig;
use crate::services::llm_provider::ChatProvider;

pub const HUGGINGFACE_PROVIDER: &str = "huggingface";

/// Generation bounds applied to every summary. Decoding is greedy so repeated
/// calls on the same chunk produce the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryParams {
    pub min_length: u32,
    pub max_length: u32,
    pub do_sample: bool,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            min_length: 20,
            max_length: 70,
            do_sample: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Summarizer returned no summary")]
    EmptyResponse,

    #[error("LLM error: {0}")]
    Completion(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, chunk: &str) -> Result<String, SummarizerError>;

    /// `provider/model` label used in logs and the health endpoint.
    fn describe(&self) -> String;
}

/// Await a summarizer call, giving up after `limit`.
async fn within<F, T>(limit: Duration, call: F) -> Result<T, SummarizerError>
where
    F: IntoFuture<Output = Result<T, SummarizerError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| SummarizerError::Timeout(limit))?
}

/// Build the process-wide summarizer from configuration.
pub fn from_config(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>, SummarizerError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    if config.provider.eq_ignore_ascii_case(HUGGINGFACE_PROVIDER) {
        let client = HuggingFaceSummarizer::new(
            &config.endpoint,
            &config.model,
            config.api_key.clone(),
            timeout,
        )?;
        return Ok(Arc::new(client));
    }

    let client = RigSummarizer::new(
        &config.provider,
        &config.model,
        config.api_key.clone(),
        timeout,
    )?;
    Ok(Arc::new(client))
}

// ── Hugging Face inference endpoint ─────────────────────────

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: SummaryParams,
}

#[derive(Deserialize)]
struct InferenceOutput {
    summary_text: String,
}

/// Client for a Hugging Face style `summarization` inference endpoint.
pub struct HuggingFaceSummarizer {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    params: SummaryParams,
    timeout: Duration,
}

impl HuggingFaceSummarizer {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("doc-summarizer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            params: SummaryParams::default(),
            timeout,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    fn request_error(&self, e: reqwest::Error) -> SummarizerError {
        if e.is_timeout() {
            SummarizerError::Timeout(self.timeout)
        } else {
            SummarizerError::RequestFailed(e)
        }
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, chunk: &str) -> Result<String, SummarizerError> {
        let req = InferenceRequest {
            inputs: chunk,
            parameters: self.params,
        };

        let mut request = self.http.post(self.url()).json(&req);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let outputs: Vec<InferenceOutput> =
            response.json().await.map_err(|e| self.request_error(e))?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or(SummarizerError::EmptyResponse)
    }

    fn describe(&self) -> String {
        format!("{HUGGINGFACE_PROVIDER}/{}", self.model)
    }
}

// ── Chat providers via rig ──────────────────────────────────

fn summary_preamble(params: &SummaryParams) -> String {
    format!(
        "You are an abstractive summarizer. Reply with a single plain-text summary of the \
         user's text and nothing else. The summary must be between {} and {} tokens long.",
        params.min_length, params.max_length
    )
}

/// Summarizer backed by any completion provider rig supports.
pub struct RigSummarizer {
    provider: ChatProvider,
    model: String,
    api_key: String,
    params: SummaryParams,
    timeout: Duration,
}

impl RigSummarizer {
    pub fn new(
        provider: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let provider: ChatProvider = provider
            .parse()
            .map_err(|_| SummarizerError::UnsupportedProvider(provider.to_string()))?;

        Ok(Self {
            provider,
            model: model.to_string(),
            api_key: api_key.unwrap_or_default(),
            params: SummaryParams::default(),
            timeout,
        })
    }
}

#[async_trait]
impl Summarizer for RigSummarizer {
    async fn summarize(&self, chunk: &str) -> Result<String, SummarizerError> {
        let completion_client = self
            .provider
            .completion_client(&self.api_key)
            .map_err(|e| SummarizerError::Completion(format!("{e:#}")))?;

        let agent = completion_client
            .agent(&self.model)
            .preamble(&summary_preamble(&self.params))
            .temperature(0.0)
            .max_tokens(u64::from(self.params.max_length))
            .build();

        let summary = within(self.timeout, async {
            agent
                .prompt(chunk)
                .await
                .map_err(|e| SummarizerError::Completion(e.to_string()))
        })
        .await?;

        if summary.trim().is_empty() {
            return Err(SummarizerError::EmptyResponse);
        }

        Ok(summary)
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.provider.id(), self.model)
    }
}
