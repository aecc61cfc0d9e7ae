//! JSON report file, identical in shape to the `/analyze_company` response.

use super::{ensure_parent, report_stem};
use crate::models::{AnalysisReport, AnalysisResponse};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Write `{output_dir}/{date}/{slug}.json` and return its path.
#[instrument(level = "info", skip_all, fields(%output_dir, company = %report.company))]
pub async fn write_report(
    report: &AnalysisReport,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&AnalysisResponse::from(report))?;
    let path = report_stem(output_dir, &report.company).with_extension("json");
    ensure_parent(&path).await?;

    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::tests::{sample_report, scratch_dir};
    use serde_json::Value;

    #[tokio::test]
    async fn test_write_report_matches_response_shape() {
        let dir = scratch_dir("json");
        let path = write_report(&sample_report(false), &dir).await.unwrap();
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["articles"].as_array().unwrap().len(), 2);
        assert_eq!(value["articles"][1]["degradations"][0], "short_content");
        assert_eq!(value["comparison"]["Sentiment Distribution"]["Positive"], 1);
        assert!(value["audio_base64"].is_null());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
