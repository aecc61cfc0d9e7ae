//! On-disk artifacts for a CLI analysis run.
//!
//! ```text
//! output_dir/
//! └── 2025-05-06/
//!     ├── acme-corp.json   # same shape as the HTTP response
//!     ├── acme-corp.md     # readable report
//!     └── acme-corp.mp3    # Hindi briefing, when synthesis succeeded
//! ```

pub mod json;
pub mod markdown;

use crate::models::AnalysisReport;
use crate::utils::file_stem;
use chrono::Local;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// `{output_dir}/{local date}/{company stem}` with no extension.
pub fn report_stem(output_dir: &str, company: &str) -> PathBuf {
    let date = Local::now().date_naive().to_string();
    PathBuf::from(output_dir.trim_end_matches('/'))
        .join(date)
        .join(file_stem(company))
}

async fn ensure_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create report dir");
            return Err(e.into());
        }
    }
    Ok(())
}

/// Write the briefing MP3 next to the report. Returns `None` when the run
/// produced no audio.
#[instrument(level = "info", skip_all, fields(company = %report.company))]
pub async fn write_audio(
    report: &AnalysisReport,
    output_dir: &str,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let Some(audio) = &report.audio else {
        info!("No audio to write");
        return Ok(None);
    };
    let path = report_stem(output_dir, &report.company).with_extension("mp3");
    ensure_parent(&path).await?;
    fs::write(&path, &audio.bytes).await?;
    info!(path = %path.display(), bytes = audio.bytes.len(), "Wrote audio briefing");
    Ok(Some(path))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::models::{Article, AudioBriefing, Sentiment};

    pub fn sample_report(audio: bool) -> AnalysisReport {
        let articles = vec![
            Article {
                title: "Acme posts record gain".to_string(),
                url: "https://news.example.com/gain".to_string(),
                content: "Acme posts record gain.".to_string(),
                summary: "summary of Acme".to_string(),
                sentiment: Sentiment::Positive,
                degradations: vec![],
            },
            Article {
                title: "Acme faces recall".to_string(),
                url: "https://news.example.com/recall".to_string(),
                content: "Acme faces a recall.".to_string(),
                summary: "Acme faces a recall....".to_string(),
                sentiment: Sentiment::Negative,
                degradations: vec![crate::error::Degradation::ShortContent],
            },
        ];
        let comparison = aggregate(&articles);
        AnalysisReport {
            company: "Acme Corp".to_string(),
            articles,
            comparison,
            audio: audio.then(|| AudioBriefing {
                language: "hi".to_string(),
                bytes: b"ID3mock-audio".to_vec(),
            }),
        }
    }

    pub fn scratch_dir(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("company_news_brief_{}_{}", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_report_stem_layout() {
        let stem = report_stem("/tmp/out/", "Acme Corp");
        let date = Local::now().date_naive().to_string();
        assert_eq!(stem, PathBuf::from(format!("/tmp/out/{}/acme-corp", date)));
    }

    #[test]
    fn test_report_stem_stays_in_date_dir_for_symbol_names() {
        let date = Local::now().date_naive().to_string();
        let path = report_stem("/tmp/out", "!!!").with_extension("json");
        assert_eq!(path, PathBuf::from(format!("/tmp/out/{}/company.json", date)));
    }

    #[tokio::test]
    async fn test_write_audio() {
        let dir = scratch_dir("audio");
        let path = write_audio(&sample_report(true), &dir).await.unwrap().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3mock-audio");
        assert!(path.to_string_lossy().ends_with("acme-corp.mp3"));

        assert!(write_audio(&sample_report(false), &dir).await.unwrap().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
