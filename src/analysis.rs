//! Cross-article comparison.
//!
//! Everything here is derived from headlines and sentiment labels only:
//!
//! - **Distribution**: per-label counts, always summing to the article count
//! - **Topic overlap**: the first two words of each headline, deduplicated
//!   exactly as written (no case folding or punctuation stripping)
//! - **Conclusion**: "mostly positive" when positives outnumber negatives,
//!   otherwise "mixed or negative"; neutral articles never tip it
//! - **Coverage differences**: a fixed observation, not derived from content

use crate::models::{
    Article, ComparisonReport, Conclusion, CoverageDifference, SentimentDistribution,
    TopicOverlap,
};
use itertools::Itertools;
use tracing::{debug, instrument};

/// Number of leading headline words taken as topic keywords.
const KEYWORDS_PER_TITLE: usize = 2;

#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn aggregate(articles: &[Article]) -> ComparisonReport {
    let mut distribution = SentimentDistribution::default();
    for article in articles {
        distribution.record(article.sentiment);
    }

    let common_keywords = topic_keywords(articles.iter().map(|a| a.title.as_str()));
    let overall_conclusion = conclude(&distribution);
    debug!(?distribution, keywords = common_keywords.len(), %overall_conclusion, "Aggregated articles");

    ComparisonReport {
        sentiment_distribution: distribution,
        coverage_differences: coverage_differences(),
        topic_overlap: TopicOverlap { common_keywords },
        overall_conclusion,
    }
}

/// Positive must strictly outnumber negative; neutral is ignored.
pub fn conclude(distribution: &SentimentDistribution) -> Conclusion {
    if distribution.positive > distribution.negative {
        Conclusion::MostlyPositive
    } else {
        Conclusion::MixedOrNegative
    }
}

/// Leading headline words, deduplicated in first-seen order.
pub fn topic_keywords<'a>(titles: impl Iterator<Item = &'a str>) -> Vec<String> {
    titles
        .flat_map(|title| title.split(' ').take(KEYWORDS_PER_TITLE))
        .unique()
        .map(str::to_string)
        .collect()
}

fn coverage_differences() -> Vec<CoverageDifference> {
    // TODO: derive from per-article summaries once outlets can be told apart.
    vec![CoverageDifference {
        comparison: "Some articles show optimism, others raise caution.".to_string(),
        impact: "Readers receive mixed signals.".to_string(),
    }]
}
