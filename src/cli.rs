//! Command-line interface.
//!
//! Secrets and the config path can come from the environment; everything
//! else falls back to the YAML config and then to built-in defaults.

use crate::config::{PipelineConfig, SummaryBackend};
use clap::{Parser, Subcommand};

/// Company news summarization, sentiment analysis, and Hindi audio briefings.
///
/// # Examples
///
/// ```sh
/// # One-off report written to ./reports/{date}/tesla.{json,md,mp3}
/// company_news_brief analyze Tesla -o ./reports
///
/// # HTTP endpoint and dashboard
/// company_news_brief --config brief.yaml serve --bind 127.0.0.1:5000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, global = true, env = "NEWS_BRIEF_CONFIG")]
    pub config: Option<String>,

    /// API token for the Hugging Face summarization backend
    #[arg(long, global = true, env = "HF_API_TOKEN", hide_env_values = true)]
    pub hf_api_token: Option<String>,

    /// API key for the OpenAI-compatible summarization backend
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Override the number of articles taken per company
    #[arg(long, global = true)]
    pub articles: Option<usize>,

    /// Override the number of articles enriched concurrently
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Override the briefing language code
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Analyze one company and write the report files
    Analyze {
        /// Company name to search for
        company: String,

        /// Directory for the JSON, Markdown, and MP3 outputs
        #[arg(short, long, default_value = "./reports")]
        output_dir: String,

        /// Skip speech synthesis
        #[arg(long)]
        no_audio: bool,
    },
    /// Serve the JSON endpoint and HTML dashboard
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:5000")]
        bind: String,
    },
}

impl Cli {
    /// Layer command-line overrides on top of a loaded config.
    ///
    /// The API key only applies when the config doesn't already carry one;
    /// the token or key matching the configured backend wins.
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(n) = self.articles {
            config.article_cap = n;
        }
        if let Some(n) = self.workers {
            config.workers = n;
        }
        if let Some(language) = &self.language {
            config.speech.language = language.clone();
        }
        if config.summary.api_key.is_none() {
            config.summary.api_key = match config.summary.backend {
                SummaryBackend::Huggingface => self.hf_api_token.clone(),
                SummaryBackend::Openai => self.openai_api_key.clone(),
            };
        }
    }
}
