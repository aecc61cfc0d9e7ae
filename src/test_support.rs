//! In-memory capability doubles shared by the unit tests.

use crate::enrich::sentiment::PolarityScorer;
use crate::enrich::summarizer::{LengthBounds, Summarizer};
use crate::error::{FetchError, SpeechError, SummarizeError};
use crate::fetch::PageFetcher;
use crate::scrapers::bing;
use crate::speech::SpeechSynthesizer;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves canned pages by exact URL; anything else is a 404.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Summarizer that echoes the first word of its input, with optional
/// latency, failure, and concurrency tracking.
#[derive(Default)]
pub struct MockSummarizer {
    fail: bool,
    fixed_delay: Option<Duration>,
    variable_delay: bool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    last_input: Mutex<Option<String>>,
    last_bounds: Mutex<Option<LengthBounds>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_fixed_delay(mut self, delay: Duration) -> Self {
        self.fixed_delay = Some(delay);
        self
    }

    /// Sleep 0-12ms depending on the input, so completion order differs from
    /// submission order.
    pub fn with_variable_delay(mut self) -> Self {
        self.variable_delay = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().unwrap().clone()
    }

    pub fn last_bounds(&self) -> Option<LengthBounds> {
        *self.last_bounds.lock().unwrap()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(text.to_string());
        *self.last_bounds.lock().unwrap() = Some(bounds);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = if self.variable_delay {
            let spread = text.bytes().map(u64::from).sum::<u64>() % 13;
            Some(Duration::from_millis(spread))
        } else {
            self.fixed_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            return Err(SummarizeError::Status {
                status: 503,
                body: "model loading".to_string(),
            });
        }
        let first = text.split_whitespace().next().unwrap_or_default();
        Ok(format!("summary of {}", first))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Deterministic scorer keyed on a handful of words.
pub struct KeywordScorer;

impl PolarityScorer for KeywordScorer {
    fn compound(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let positive = ["great", "record", "gain", "beats"]
            .iter()
            .filter(|w| lower.contains(*w))
            .count() as f64;
        let negative = ["loss", "recall", "slump", "lawsuit"]
            .iter()
            .filter(|w| lower.contains(*w))
            .count() as f64;
        ((positive - negative) * 0.5).clamp(-1.0, 1.0)
    }
}

/// Speech synthesizer returning a fixed MP3 header, or failing on demand.
#[derive(Default)]
pub struct MockSpeech {
    fail: bool,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((text.to_string(), language.to_string()));
        if self.fail {
            return Err(SpeechError::Status(429));
        }
        Ok(b"ID3mock-audio".to_vec())
    }
}

/// Bing results for "Acme" with three usable links: a long positive story, a
/// short negative one, and one whose page is missing.
pub fn acme_fetcher() -> MockFetcher {
    let results = r#"<html><body>
        <a class="title" href="https://news.example.com/gain">Acme posts record gain</a>
        <a class="title" href="https://news.example.com/recall">Acme faces recall</a>
        <a class="title" href="https://news.example.com/gone">Acme statement</a>
        <a class="title" href="https://news.example.com/extra">Acme extra story</a>
    </body></html>"#;
    let gain = format!(
        "<html><body><article><p>Acme posts record gain. {}</p></article></body></html>",
        vec!["detail"; 30].join(" ")
    );
    let recall = "<html><body><article><p>Acme faces a recall.</p></article></body></html>";
    MockFetcher::new()
        .with_page(&bing::search_url("Acme"), results)
        .with_page("https://news.example.com/gain", &gain)
        .with_page("https://news.example.com/recall", recall)
}
