//! Markdown rendering of an [`AnalysisReport`].

use super::{ensure_parent, report_stem};
use crate::models::{AnalysisReport, Sentiment};
use crate::utils::upcase;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

pub fn report_to_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();
    let comparison = &report.comparison;

    md.push_str(&format!("# News Coverage Summary for {}\n\n", upcase(&report.company)));

    md.push_str("## Sentiment Distribution\n\n| Sentiment | Articles |\n|-----------|----------|\n");
    for sentiment in Sentiment::ALL {
        md.push_str(&format!(
            "| {} | {} |\n",
            sentiment,
            comparison.sentiment_distribution.get(sentiment)
        ));
    }
    md.push_str(&format!(
        "\n**Overall Sentiment Conclusion:** {}\n\n",
        comparison.overall_conclusion
    ));

    if report.articles.is_empty() {
        md.push_str("_No articles found._\n\n");
    } else {
        md.push_str("## Articles\n\n");
    }
    for article in &report.articles {
        md.push_str(&format!("### [{}]({})\n\n", article.title, article.url));
        md.push_str(&format!("- **Sentiment:** {}\n", article.sentiment));
        md.push_str(&format!("- **Summary:** {}\n", article.summary));
        if !article.degradations.is_empty() {
            let notes: Vec<String> = article
                .degradations
                .iter()
                .map(|d| format!("{:?}", d))
                .collect();
            md.push_str(&format!("- **Notes:** {}\n", notes.join(", ")));
        }
        md.push('\n');
    }

    md.push_str("## Comparative Analysis\n\n");
    md.push_str(&format!(
        "**Topic Overlap:** {}\n\n",
        comparison.topic_overlap.common_keywords.join(", ")
    ));
    for diff in &comparison.coverage_differences {
        md.push_str(&format!("- {} _Impact:_ {}\n", diff.comparison, diff.impact));
    }

    md.push_str("\n## Audio Briefing\n\n");
    match &report.audio {
        Some(audio) => md.push_str(&format!(
            "Generated ({} bytes, language `{}`).\n",
            audio.bytes.len(),
            audio.language
        )),
        None => md.push_str("Audio generation failed.\n"),
    }
    md
}

/// Write `{output_dir}/{date}/{slug}.md` and return its path.
#[instrument(level = "info", skip_all, fields(%output_dir, company = %report.company))]
pub async fn write_report(
    report: &AnalysisReport,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = report_stem(output_dir, &report.company).with_extension("md");
    ensure_parent(&path).await?;
    fs::write(&path, report_to_markdown(report)).await?;
    info!(path = %path.display(), "Wrote Markdown report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::tests::{sample_report, scratch_dir};

    #[test]
    fn test_report_to_markdown() {
        let md = report_to_markdown(&sample_report(true));
        assert!(md.starts_with("# News Coverage Summary for Acme Corp\n"));
        assert!(md.contains("| Positive | 1 |"));
        assert!(md.contains("| Neutral | 0 |"));
        assert!(md.contains("### [Acme faces recall](https://news.example.com/recall)"));
        assert!(md.contains("- **Notes:** ShortContent"));
        assert!(md.contains("**Overall Sentiment Conclusion:** mixed or negative"));
        assert!(md.contains("Generated (13 bytes, language `hi`)."));
    }

    #[test]
    fn test_report_to_markdown_without_audio() {
        let mut report = sample_report(false);
        report.articles.clear();
        let md = report_to_markdown(&report);
        assert!(md.contains("_No articles found._"));
        assert!(md.contains("Audio generation failed."));
    }

    #[tokio::test]
    async fn test_write_report() {
        let dir = scratch_dir("markdown");
        let path = write_report(&sample_report(false), &dir).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("Acme posts record gain"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
