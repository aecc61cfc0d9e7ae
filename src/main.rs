//! # Company News Brief
//!
//! Finds recent news coverage of a company, extracts and summarizes each
//! article, labels its sentiment, compares the coverage, and voices a short
//! Hindi briefing of the overall conclusion.
//!
//! ## Usage
//!
//! ```sh
//! company_news_brief analyze Tesla -o ./reports
//! company_news_brief serve --bind 0.0.0.0:5000
//! ```
//!
//! ## Architecture
//!
//! 1. **Locating**: search a news surface for candidate article links
//! 2. **Extracting**: fetch each article and pull out its body text
//! 3. **Enriching**: summarize and score sentiment (bounded concurrency, order kept)
//! 4. **Aggregating**: sentiment distribution, topic overlap, conclusion
//! 5. **Speech**: synthesize the briefing sentence as MP3
//! 6. **Output**: JSON/Markdown/MP3 files, or the HTTP endpoint and dashboard

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod config;
mod enrich;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod server;
mod speech;
#[cfg(test)]
mod test_support;
mod utils;

use cli::{Cli, Command};
use config::PipelineConfig;
use outputs::{json, markdown};
use pipeline::{Capabilities, Pipeline};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("company_news_brief starting up");

    let args = Cli::parse();
    debug!(command = ?args.command, config = ?args.config, "Parsed CLI arguments");

    // ---- Config & capabilities ----
    let mut config = PipelineConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;
    info!(
        source = ?config.source,
        article_cap = config.article_cap,
        workers = config.workers,
        backend = ?config.summary.backend,
        model = %config.summary.model,
        "Configuration ready"
    );

    let capabilities = Capabilities::from_config(&config)?;
    let pipeline = Pipeline::new(&config, capabilities);

    match args.command {
        Command::Serve { bind } => {
            server::serve(&bind, pipeline).await?;
        }
        Command::Analyze {
            company,
            output_dir,
            no_audio,
        } => {
            if let Err(e) = ensure_writable_dir(&output_dir).await {
                error!(
                    path = %output_dir,
                    error = %e,
                    "Output directory is not writable (fix perms or choose a different path)"
                );
                return Err(e);
            }

            let pipeline = if no_audio {
                pipeline.without_audio()
            } else {
                pipeline
            };
            let report = pipeline.run(&company).await?;

            let response = models::AnalysisResponse::from(&report);
            println!("{}", serde_json::to_string_pretty(&response)?);

            if let Err(e) = json::write_report(&report, &output_dir).await {
                error!(error = %e, "Failed to write JSON report");
            }
            if let Err(e) = markdown::write_report(&report, &output_dir).await {
                error!(error = %e, "Failed to write Markdown report");
            }
            if let Err(e) = outputs::write_audio(&report, &output_dir).await {
                error!(error = %e, "Failed to write audio briefing");
            }

            let elapsed = start_time.elapsed();
            info!(
                ?elapsed,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                articles = report.articles.len(),
                "Execution complete"
            );
        }
    }

    Ok(())
}
