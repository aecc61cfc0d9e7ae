//! Pipeline configuration.
//!
//! Every tunable the pipeline uses lives in [`PipelineConfig`] with a default
//! matching the stock deployment, so a config file only needs the keys it
//! changes:
//!
//! ```yaml
//! source: google_news
//! article_cap: 10
//! summary:
//!   backend: openai
//!   model: gpt-4o-mini
//! speech:
//!   language: en
//! ```
//!
//! Timeouts are optional everywhere and default to "no timeout".

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Which news search surface the source locator queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Bing News HTML results page.
    #[default]
    Bing,
    /// Google News RSS search feed.
    GoogleNews,
}

/// Which summarization service backs the enrichment unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryBackend {
    /// Hugging Face style `summarization` inference endpoint.
    #[default]
    Huggingface,
    /// OpenAI-compatible `/chat/completions` endpoint.
    Openai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceKind,
    /// Maximum number of articles taken from the search results.
    pub article_cap: usize,
    /// Maximum number of articles enriched concurrently.
    pub workers: usize,
    /// Below this many words, structured extraction falls back to paragraphs.
    pub min_extract_words: usize,
    pub user_agent: String,
    pub fetch_timeout_secs: Option<u64>,
    pub enrichment: EnrichmentConfig,
    pub summary: SummaryConfig,
    pub speech: SpeechConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Bing,
            article_cap: 3,
            workers: 3,
            min_extract_words: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: None,
            enrichment: EnrichmentConfig::default(),
            summary: SummaryConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Below this many words the model is skipped and an excerpt is used.
    pub min_summary_words: usize,
    /// Length of the excerpt used for short content, before the ellipsis.
    pub excerpt_chars: usize,
    /// Model input is cut to this many characters.
    pub summary_input_chars: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            min_summary_words: 20,
            excerpt_chars: 300,
            summary_input_chars: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub backend: SummaryBackend,
    /// Base URL; backend-specific default when unset.
    pub endpoint: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    pub min_length: u32,
    pub max_length: u32,
    pub timeout_secs: Option<u64>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            backend: SummaryBackend::Huggingface,
            endpoint: None,
            model: "t5-small".to_string(),
            api_key: None,
            min_length: 15,
            max_length: 60,
            timeout_secs: None,
        }
    }
}

impl SummaryConfig {
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.backend) {
            (Some(url), _) => url.as_str(),
            (None, SummaryBackend::Huggingface) => "https://api-inference.huggingface.co/models",
            (None, SummaryBackend::Openai) => "https://api.openai.com/v1",
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub endpoint: String,
    /// Language code of the spoken briefing.
    pub language: String,
    pub timeout_secs: Option<u64>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            language: "hi".to_string(),
            timeout_secs: None,
        }
    }
}

impl SpeechConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl PipelineConfig {
    /// Load from a YAML file, or use defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                info!(path, "Loaded configuration file");
                Self::from_yaml(&raw)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.article_cap == 0 {
            return Err(ConfigError::Invalid("article_cap must be at least 1".into()));
        }
        if self.summary.min_length > self.summary.max_length {
            return Err(ConfigError::Invalid(format!(
                "summary.min_length ({}) exceeds summary.max_length ({})",
                self.summary.min_length, self.summary.max_length
            )));
        }
        if self.speech.language.trim().is_empty() {
            return Err(ConfigError::Invalid("speech.language must not be empty".into()));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.source, SourceKind::Bing);
        assert_eq!(config.article_cap, 3);
        assert_eq!(config.workers, 3);
        assert_eq!(config.min_extract_words, 20);
        assert_eq!(config.enrichment.excerpt_chars, 300);
        assert_eq!(config.enrichment.summary_input_chars, 500);
        assert_eq!((config.summary.min_length, config.summary.max_length), (15, 60));
        assert_eq!(config.speech.language, "hi");
        assert_eq!(config.fetch_timeout(), None);
        assert_eq!(config.summary.timeout(), None);
        assert_eq!(config.speech.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
source: google_news
article_cap: 10
summary:
  backend: openai
  model: gpt-4o-mini
  timeout_secs: 30
"#;
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.source, SourceKind::GoogleNews);
        assert_eq!(config.article_cap, 10);
        assert_eq!(config.workers, 3);
        assert_eq!(config.summary.backend, SummaryBackend::Openai);
        assert_eq!(config.summary.endpoint(), "https://api.openai.com/v1");
        assert_eq!(config.summary.max_length, 60);
        assert_eq!(config.summary.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = PipelineConfig {
            workers: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_lengths() {
        let mut config = PipelineConfig::default();
        config.summary.min_length = 80;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load(Some("/nonexistent/news_brief.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_unknown_source_is_parse_error() {
        let err = PipelineConfig::from_yaml("source: altavista").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
