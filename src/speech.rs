//! Spoken audio briefings.
//!
//! [`GoogleTranslateTts`] speaks text through the Google Translate TTS
//! endpoint, which accepts at most 100 characters per request and answers
//! with MP3. Longer text is split on punctuation and word boundaries and the
//! returned MP3 segments are concatenated, which players handle as one
//! stream.
//!
//! [`synthesize_briefing`] is the pipeline's entry point: it never fails and
//! returns `None` when no audio could be produced.

use crate::error::SpeechError;
use crate::models::AudioBriefing;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Maximum characters per TTS request.
pub const MAX_CHUNK_CHARS: usize = 100;

static CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?,;:।]+[.!?,;:।]*").expect("static regex"));

/// Convert text into encoded speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;
}

/// Google Translate text-to-speech client.
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateTts {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    #[instrument(level = "debug", skip_all, fields(%language, chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_for_speech(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", language),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                    ("client", "tw-ob"),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(SpeechError::Status(status.as_u16()));
            }
            audio.extend_from_slice(&response.bytes().await?);
        }

        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        debug!(bytes = audio.len(), chunks = chunks.len(), "Synthesized speech");
        Ok(audio)
    }
}

/// Split text into pieces of at most `max_chars` characters, preferring
/// clause boundaries, then word boundaries, and hard-splitting only words
/// longer than `max_chars`.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for clause in CLAUSE.find_iter(text) {
        for word in clause.as_str().split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();

            if word_len > max_chars {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(max_chars) {
                    chunks.push(piece.iter().collect());
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
            } else if current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                chunks.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        // Close the chunk at a clause boundary once it is reasonably full.
        if current.chars().count() * 2 >= max_chars {
            chunks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Synthesize `text`, returning `None` on any failure.
#[instrument(level = "info", skip_all, fields(%language))]
pub async fn synthesize_briefing(
    synthesizer: &dyn SpeechSynthesizer,
    text: &str,
    language: &str,
    timeout: Option<Duration>,
) -> Option<AudioBriefing> {
    let t0 = Instant::now();
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, synthesizer.synthesize(text, language))
            .await
            .unwrap_or(Err(SpeechError::Timeout(limit))),
        None => synthesizer.synthesize(text, language).await,
    };

    match result {
        Ok(bytes) => {
            info!(
                bytes = bytes.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Audio briefing ready"
            );
            Some(AudioBriefing {
                language: language.to_string(),
                bytes,
            })
        }
        Err(e) => {
            warn!(error = %e, "Audio briefing unavailable");
            None
        }
    }
}
