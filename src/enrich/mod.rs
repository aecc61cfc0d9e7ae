//! Enrichment: attaching a summary and a sentiment label to article text.
//!
//! # Summary policy
//!
//! | Input | Summary |
//! |-------|---------|
//! | empty string | `"Summary not available."` |
//! | fewer than `min_words` words | first `excerpt_chars` characters + `"..."`, model not called |
//! | otherwise | model output on the first `input_chars` characters |
//! | model error or timeout | `"Summarization failed."` |
//!
//! Sentiment is always scored on the full text, see [`sentiment::classify`].

pub mod sentiment;
pub mod summarizer;

use crate::config::PipelineConfig;
use crate::error::{Degradation, Outcome};
use crate::models::{Article, RawArticle, Sentiment};
use crate::utils::{truncate_chars, truncate_for_log, word_count};
use sentiment::{PolarityScorer, classify};
use std::sync::Arc;
use std::time::Duration;
use summarizer::{LengthBounds, Summarizer, summarize_with_timeout};
use tracing::{debug, instrument, warn};

pub const SUMMARY_UNAVAILABLE: &str = "Summary not available.";
pub const SUMMARY_FAILED: &str = "Summarization failed.";

/// Thresholds and budgets applied before and around the model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentPolicy {
    pub min_words: usize,
    pub excerpt_chars: usize,
    pub input_chars: usize,
    pub bounds: LengthBounds,
    pub timeout: Option<Duration>,
}

impl From<&PipelineConfig> for EnrichmentPolicy {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            min_words: config.enrichment.min_summary_words,
            excerpt_chars: config.enrichment.excerpt_chars,
            input_chars: config.enrichment.summary_input_chars,
            bounds: LengthBounds {
                min_length: config.summary.min_length,
                max_length: config.summary.max_length,
            },
            timeout: config.summary.timeout(),
        }
    }
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

/// Result of enriching one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub summary: Outcome<String>,
    pub sentiment: Sentiment,
}

/// Summarizes and scores article text using shared capabilities.
pub struct Enricher {
    summarizer: Arc<dyn Summarizer>,
    scorer: Arc<dyn PolarityScorer>,
    policy: EnrichmentPolicy,
}

impl Enricher {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        scorer: Arc<dyn PolarityScorer>,
        policy: EnrichmentPolicy,
    ) -> Self {
        Self {
            summarizer,
            scorer,
            policy,
        }
    }

    pub async fn enrich(&self, content: &str) -> Enrichment {
        Enrichment {
            summary: self.summarize(content).await,
            sentiment: self.score(content),
        }
    }

    /// Apply the summary policy. Never fails; failures become the sentinel.
    pub async fn summarize(&self, content: &str) -> Outcome<String> {
        // Only a truly empty string is "unavailable"; whitespace-only text
        // takes the short path and comes back as a bare ellipsis.
        if content.is_empty() {
            return Outcome::Degraded(SUMMARY_UNAVAILABLE.to_string(), Degradation::NoContent);
        }
        let text = content.trim();

        let words = word_count(text);
        if words < self.policy.min_words {
            debug!(words, min_words = self.policy.min_words, "Short content; using excerpt");
            let excerpt = format!("{}...", truncate_chars(text, self.policy.excerpt_chars));
            return Outcome::Degraded(excerpt, Degradation::ShortContent);
        }

        let input = truncate_chars(text, self.policy.input_chars);
        match summarize_with_timeout(
            self.summarizer.as_ref(),
            input,
            self.policy.bounds,
            self.policy.timeout,
        )
        .await
        {
            Ok(summary) => Outcome::Complete(summary),
            Err(e) => {
                warn!(error = %e, model = self.summarizer.model_name(), "Summarization failed");
                Outcome::Degraded(SUMMARY_FAILED.to_string(), Degradation::ModelFailed)
            }
        }
    }

    pub fn score(&self, content: &str) -> Sentiment {
        classify(self.scorer.compound(content))
    }

    /// Enrich one extracted article, carrying its extraction degradations.
    #[instrument(level = "debug", skip_all, fields(url = %raw.url))]
    pub async fn enrich_article(&self, raw: RawArticle) -> Article {
        let Enrichment { summary, sentiment } = self.enrich(&raw.content).await;
        if summary.is_degraded() {
            debug!(
                summary = %truncate_for_log(summary.value(), 80),
                "Using fallback summary"
            );
        }
        let (summary, degradation) = summary.into_parts();
        let mut degradations = raw.degradations;
        degradations.extend(degradation);

        Article {
            title: raw.title,
            url: raw.url,
            content: raw.content,
            summary,
            sentiment,
            degradations,
        }
    }
}
