//! Data models for located, extracted, and enriched articles and the reports
//! built from them.
//!
//! - [`ArticleLink`]: a search hit (title and URL)
//! - [`RawArticle`]: a search hit plus its extracted text
//! - [`Article`]: an enriched article with summary and sentiment
//! - [`ComparisonReport`]: the cross-article comparison
//! - [`AnalysisReport`] / [`AnalysisResponse`]: full pipeline output and its
//!   wire form
//!
//! The comparison report keeps the human-readable JSON keys
//! (`"Sentiment Distribution"`, `"Topic Overlap"`, ...) that existing
//! consumers of the endpoint already decode.

use crate::error::Degradation;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate article found by a source locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    pub title: String,
    pub url: String,
}

/// An article whose text has been extracted but not yet enriched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArticle {
    pub title: String,
    pub url: String,
    pub content: String,
    pub degradations: Vec<Degradation>,
}

/// Discrete sentiment label assigned to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully enriched article.
///
/// Only [`crate::enrich::Enricher`] builds these, so anything holding an
/// `Article` is guaranteed to carry a summary and a sentiment label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub content: String,
    pub summary: String,
    pub sentiment: Sentiment,
    /// Every stage that fell back to a lower-quality result for this article.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

/// Count of articles per sentiment label. All three labels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Keywords shared across headlines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    #[serde(rename = "Common Keywords")]
    pub common_keywords: Vec<String>,
}

/// One observed difference in how outlets cover the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

/// Qualitative verdict over the whole article set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    #[serde(rename = "mostly positive")]
    MostlyPositive,
    #[serde(rename = "mixed or negative")]
    MixedOrNegative,
}

impl Conclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::MostlyPositive => "mostly positive",
            Conclusion::MixedOrNegative => "mixed or negative",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-article comparison derived from a completed set of [`Article`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<CoverageDifference>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
    #[serde(rename = "Overall Sentiment Conclusion")]
    pub overall_conclusion: Conclusion,
}

/// Synthesized speech for the briefing sentence (MP3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBriefing {
    pub language: String,
    pub bytes: Vec<u8>,
}

impl AudioBriefing {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Everything one pipeline run produces for a company.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub company: String,
    pub articles: Vec<Article>,
    pub comparison: ComparisonReport,
    pub audio: Option<AudioBriefing>,
}

/// Wire form of an [`AnalysisReport`], with audio as base64 or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub articles: Vec<Article>,
    pub comparison: ComparisonReport,
    pub audio_base64: Option<String>,
}

impl From<&AnalysisReport> for AnalysisResponse {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            articles: report.articles.clone(),
            comparison: report.comparison.clone(),
            audio_base64: report.audio.as_ref().map(AudioBriefing::to_base64),
        }
    }
}
