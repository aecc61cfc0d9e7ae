//! The end-to-end company news pipeline.
//!
//! ```text
//! locate ──▶ extract (per link) ──▶ enrich_all (≤ workers in flight) ──▶ aggregate ──▶ speak
//! ```
//!
//! Capabilities are built once ([`Capabilities::from_config`]) and shared by
//! every run, including concurrent requests from the HTTP server. Only an
//! empty company name stops a run; every other failure degrades the output.

use crate::analysis::aggregate;
use crate::config::PipelineConfig;
use crate::enrich::sentiment::{PolarityScorer, VaderScorer};
use crate::enrich::summarizer::{self, Summarizer};
use crate::enrich::{Enricher, EnrichmentPolicy};
use crate::error::{ConfigError, FetchError, InputError};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::{AnalysisReport, Article, Conclusion, RawArticle};
use crate::scrapers::SourceLocator;
use crate::scrapers::content::ContentExtractor;
use crate::speech::{GoogleTranslateTts, SpeechSynthesizer, synthesize_briefing};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// External services the pipeline talks to.
#[derive(Clone)]
pub struct Capabilities {
    pub fetcher: Arc<dyn PageFetcher>,
    pub summarizer: Arc<dyn Summarizer>,
    pub scorer: Arc<dyn PolarityScorer>,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl Capabilities {
    /// Production capabilities: HTTP fetcher, configured summarizer, VADER,
    /// and Google Translate TTS.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout())?;
        let summarizer = summarizer::from_config(&config.summary, &config.user_agent)?;
        let speech_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            summarizer,
            scorer: Arc::new(VaderScorer),
            speech: Arc::new(GoogleTranslateTts::new(
                speech_client,
                &config.speech.endpoint,
            )),
        })
    }
}

/// Reject blank company names; otherwise return the trimmed name.
pub fn validate_company(input: &str) -> Result<&str, InputError> {
    let company = input.trim();
    if company.is_empty() {
        Err(InputError::MissingCompany)
    } else {
        Ok(company)
    }
}

/// The sentence read out in the audio briefing.
pub fn briefing_sentence(company: &str, conclusion: Conclusion) -> String {
    format!(
        "{} ke news coverage ke anusar overall sentiment {} hai.",
        company, conclusion
    )
}

/// Apply `enricher` to every article with at most `workers` in flight.
/// Output order matches input order.
#[instrument(level = "info", skip_all, fields(count = articles.len(), workers = workers))]
pub async fn enrich_all(enricher: &Enricher, articles: Vec<RawArticle>, workers: usize) -> Vec<Article> {
    let t0 = Instant::now();
    let enriched: Vec<Article> = stream::iter(articles)
        .map(|raw| enricher.enrich_article(raw))
        .buffered(workers.max(1))
        .collect()
        .await;

    let degraded = enriched
        .iter()
        .filter(|a| !a.degradations.is_empty())
        .count();
    info!(
        count = enriched.len(),
        degraded,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Enriched articles"
    );
    enriched
}

pub struct Pipeline {
    locator: SourceLocator,
    extractor: ContentExtractor,
    enricher: Enricher,
    speech: Arc<dyn SpeechSynthesizer>,
    workers: usize,
    language: String,
    speech_timeout: Option<Duration>,
    audio_enabled: bool,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig, capabilities: Capabilities) -> Self {
        Self {
            locator: SourceLocator::new(
                config.source,
                capabilities.fetcher.clone(),
                config.article_cap,
            ),
            extractor: ContentExtractor::new(capabilities.fetcher, config.min_extract_words),
            enricher: Enricher::new(
                capabilities.summarizer,
                capabilities.scorer,
                EnrichmentPolicy::from(config),
            ),
            speech: capabilities.speech,
            workers: config.workers,
            language: config.speech.language.clone(),
            speech_timeout: config.speech.timeout(),
            audio_enabled: true,
        }
    }

    /// Skip speech synthesis entirely; reports carry no audio.
    pub fn without_audio(mut self) -> Self {
        self.audio_enabled = false;
        self
    }

    pub async fn enrich_all(&self, articles: Vec<RawArticle>) -> Vec<Article> {
        enrich_all(&self.enricher, articles, self.workers).await
    }

    /// Run the whole pipeline for one company.
    #[instrument(level = "info", skip(self))]
    pub async fn run(&self, company: &str) -> Result<AnalysisReport, InputError> {
        let company = validate_company(company)?;
        let t0 = Instant::now();

        let links = self.locator.locate(company).await;
        if links.is_empty() {
            warn!("No articles found");
        }
        let raw = self.extractor.extract_all(links).await;
        let articles = self.enrich_all(raw).await;
        let comparison = aggregate(&articles);

        let audio = if self.audio_enabled {
            let sentence = briefing_sentence(company, comparison.overall_conclusion);
            synthesize_briefing(
                self.speech.as_ref(),
                &sentence,
                &self.language,
                self.speech_timeout,
            )
            .await
        } else {
            None
        };

        info!(
            articles = articles.len(),
            conclusion = %comparison.overall_conclusion,
            audio = audio.is_some(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Pipeline complete"
        );

        Ok(AnalysisReport {
            company: company.to_string(),
            articles,
            comparison,
            audio,
        })
    }
}
