//! Error types and the degraded-result wrapper used across the pipeline.
//!
//! Every external capability (page fetch, summarization, speech synthesis)
//! reports failures through a typed error. The pipeline never lets those
//! errors escape: each stage converts them into an [`Outcome`] carrying a
//! usable value plus a [`Degradation`] tag, and logs the cause. Only
//! [`InputError`] is ever surfaced to a caller.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure while downloading a page or parsing a search feed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not parse feed: {0}")]
    Feed(String),
}

/// Failure reported by a summarization backend.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarization request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("summarization backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("summarization backend returned no summary")]
    EmptyResponse,

    #[error("summarization timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure reported by a speech synthesis backend.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("nothing to synthesize")]
    EmptyText,

    #[error("speech request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("speech backend returned HTTP {0}")]
    Status(u16),

    #[error("speech backend returned no audio")]
    EmptyAudio,

    #[error("speech synthesis timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure loading or validating [`crate::config::PipelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Caller-supplied input that the pipeline refuses to run on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Company parameter is required")]
    MissingCompany,
}

/// Why a stage returned a lower-quality value instead of its normal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Structured extraction was too short; paragraph scraping was used.
    ParagraphFallback,
    /// Neither extraction tier produced text; a title placeholder was used.
    Placeholder,
    /// There was no text to summarize.
    NoContent,
    /// Text was too short for the model; an excerpt was used.
    ShortContent,
    /// The summarization backend failed; the failure sentinel was used.
    ModelFailed,
}

/// A value that is always usable, tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Complete(T),
    Degraded(T, Degradation),
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Complete(v) | Outcome::Degraded(v, _) => v,
        }
    }

    pub fn degradation(&self) -> Option<Degradation> {
        match self {
            Outcome::Complete(_) => None,
            Outcome::Degraded(_, why) => Some(*why),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degradation().is_some()
    }

    pub fn into_parts(self) -> (T, Option<Degradation>) {
        match self {
            Outcome::Complete(v) => (v, None),
            Outcome::Degraded(v, why) => (v, Some(why)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_parts() {
        let ok: Outcome<&str> = Outcome::Complete("text");
        assert!(!ok.is_degraded());
        assert_eq!(ok.into_parts(), ("text", None));

        let degraded = Outcome::Degraded("excerpt...", Degradation::ShortContent);
        assert_eq!(degraded.value(), &"excerpt...");
        assert_eq!(degraded.degradation(), Some(Degradation::ShortContent));
    }

    #[test]
    fn test_degradation_serializes_snake_case() {
        let json = serde_json::to_string(&Degradation::ParagraphFallback).unwrap();
        assert_eq!(json, "\"paragraph_fallback\"");
    }

    #[test]
    fn test_input_error_message() {
        assert_eq!(
            InputError::MissingCompany.to_string(),
            "Company parameter is required"
        );
    }
}
