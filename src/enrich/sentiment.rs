//! Lexicon-based sentiment scoring.
//!
//! A [`PolarityScorer`] turns text into a compound polarity score in
//! `[-1, 1]`; [`classify`] maps that score to a [`Sentiment`] with a neutral
//! dead zone of `(-0.05, 0.05)`.

use crate::models::Sentiment;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Map a compound polarity score to a sentiment label.
pub fn classify(score: f64) -> Sentiment {
    if score >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Compute a compound polarity score for a piece of text.
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}

/// VADER rule-based analyzer. The lexicon is loaded once per process by the
/// `vader_sentiment` crate and shared read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        // The score map borrows from the analyzer, so it must outlive it.
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.05), Sentiment::Positive);
        assert_eq!(classify(-0.05), Sentiment::Negative);
        assert_eq!(classify(0.0), Sentiment::Neutral);
        assert_eq!(classify(0.049999), Sentiment::Neutral);
        assert_eq!(classify(-0.050001), Sentiment::Negative);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(1.0), Sentiment::Positive);
        assert_eq!(classify(-1.0), Sentiment::Negative);
        assert_eq!(classify(-0.049999), Sentiment::Neutral);
    }

    #[test]
    fn test_vader_scores_obvious_text() {
        let scorer = VaderScorer;
        let good = scorer.compound("Acme posted excellent results and investors are very happy.");
        let bad = scorer.compound("Acme suffered a terrible loss and the outlook is awful.");
        assert!(good > POSITIVE_THRESHOLD, "got {good}");
        assert!(bad < NEGATIVE_THRESHOLD, "got {bad}");
        assert!((-1.0..=1.0).contains(&good));
        assert!((-1.0..=1.0).contains(&bad));
    }

    #[test]
    fn test_vader_scorer_through_trait_object() {
        let scorer: std::sync::Arc<dyn PolarityScorer> = std::sync::Arc::new(VaderScorer);
        let labels: Vec<Sentiment> = [
            "Acme shares soared on great news.",
            "Acme opened an office.",
            "Acme faces a devastating lawsuit.",
        ]
        .iter()
        .map(|t| classify(scorer.compound(t)))
        .collect();
        assert_eq!(labels[0], Sentiment::Positive);
        assert_eq!(labels[2], Sentiment::Negative);
    }

    #[test]
    fn test_vader_empty_text_is_neutral() {
        assert_eq!(classify(VaderScorer.compound("")), Sentiment::Neutral);
    }
}
