//! Summarization backends.
//!
//! [`Summarizer`] is the seam between the enrichment policy and whichever
//! inference service is deployed:
//!
//! - [`HuggingFaceSummarizer`]: a `summarization` pipeline behind a Hugging
//!   Face style inference endpoint (`POST {endpoint}/{model}`)
//! - [`ChatSummarizer`]: an OpenAI-compatible `/chat/completions` endpoint
//!
//! Backends are built once at startup and shared by every worker.

use crate::config::{SummaryBackend, SummaryConfig};
use crate::error::{FetchError, SummarizeError};
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Output length band passed to the model, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_length: u32,
    pub max_length: u32,
}

/// Produce an abstractive summary of `text`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError>;

    fn model_name(&self) -> &str;
}

/// Build the configured backend.
pub fn from_config(
    config: &SummaryConfig,
    user_agent: &str,
) -> Result<Arc<dyn Summarizer>, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(FetchError::Client)?;
    let endpoint = config.endpoint().trim_end_matches('/').to_string();

    Ok(match config.backend {
        SummaryBackend::Huggingface => Arc::new(HuggingFaceSummarizer {
            client,
            endpoint,
            model: config.model.clone(),
            api_token: config.api_key.clone(),
        }),
        SummaryBackend::Openai => Arc::new(ChatSummarizer {
            client,
            endpoint,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }),
    })
}

/// Client for a Hugging Face style `summarization` inference endpoint.
pub struct HuggingFaceSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    #[instrument(level = "debug", skip_all, fields(model = %self.model, chars = text.len()))]
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        let t0 = Instant::now();
        let payload = json!({
            "inputs": text,
            "parameters": {
                "min_length": bounds.min_length,
                "max_length": bounds.max_length,
                "do_sample": false
            }
        });

        let mut request = self
            .client
            .post(format!("{}/{}", self.endpoint, self.model))
            .json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %truncate_for_log(&body, 200), "Summarization API call failed");
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let outputs: Vec<SummaryOutput> = response.json().await?;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "Summarization API call succeeded");
        first_non_empty(outputs.into_iter().map(|o| o.summary_text))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct ChatSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    #[instrument(level = "debug", skip_all, fields(model = %self.model, chars = text.len()))]
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        let t0 = Instant::now();
        let system_prompt = format!(
            "Summarize the news article in one short paragraph of {} to {} words. \
             Reply with the summary only.",
            bounds.min_length, bounds.max_length
        );
        let payload = json!({
            "model": self.model,
            "temperature": 0,
            "max_tokens": bounds.max_length * 2,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": text }
            ]
        });

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %truncate_for_log(&body, 200), "Chat API call failed");
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().await?;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "Chat API call succeeded");
        first_non_empty(
            completion
                .choices
                .into_iter()
                .filter_map(|c| c.message.content),
        )
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn first_non_empty(candidates: impl Iterator<Item = String>) -> Result<String, SummarizeError> {
    candidates
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .ok_or(SummarizeError::EmptyResponse)
}

/// Run a summarization call under an optional timeout.
pub async fn summarize_with_timeout(
    summarizer: &dyn Summarizer,
    text: &str,
    bounds: LengthBounds,
    timeout: Option<Duration>,
) -> Result<String, SummarizeError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, summarizer.summarize(text, bounds))
            .await
            .map_err(|_| SummarizeError::Timeout(limit))?,
        None => summarizer.summarize(text, bounds).await,
    }
}
