//! Article body extraction.
//!
//! Publishers mark up stories in wildly different ways, so extraction degrades
//! in two tiers:
//!
//! 1. **Structured**: download the page and isolate the story body, trying in
//!    order the JSON-LD `articleBody`, paragraphs inside `<article>` or
//!    `[itemprop=articleBody]`, then the paragraphs of whichever container
//!    holds the most paragraph text.
//! 2. **Paragraphs**: if tier 1 produced fewer than `min_words` words,
//!    re-fetch the page and join the text of every `<p>` element.
//!
//! If both tiers come back empty the title placeholder is used. Errors in
//! either tier are logged and never returned.

use crate::error::{Degradation, Outcome};
use crate::fetch::PageFetcher;
use crate::models::{ArticleLink, RawArticle};
use crate::utils::{normalize_whitespace, word_count};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

static JSON_LD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector")
});
static ARTICLE_BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"article p, [itemprop="articleBody"] p"#).expect("static selector")
});
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("static selector"));

/// Placeholder content used when neither tier yields any text.
pub fn placeholder_for(title: &str) -> String {
    format!("Unable to retrieve full content for this article: {}", title)
}

/// Two-tier article text extractor.
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
    min_words: usize,
}

impl ContentExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, min_words: usize) -> Self {
        Self { fetcher, min_words }
    }

    /// Extract the body text for one link. Never fails and never returns
    /// empty text.
    #[instrument(level = "info", skip_all, fields(url = %link.url))]
    pub async fn extract(&self, link: &ArticleLink) -> Outcome<String> {
        let structured = match self.fetcher.fetch_text(&link.url).await {
            Ok(html) => extract_article_text(&html),
            Err(e) => {
                warn!(error = %e, "Structured extraction fetch failed");
                String::new()
            }
        };

        let words = word_count(&structured);
        if words >= self.min_words {
            debug!(words, "Structured extraction succeeded");
            return Outcome::Complete(structured);
        }

        debug!(
            words,
            min_words = self.min_words,
            "Structured extraction too short; scraping paragraphs"
        );
        let paragraphs = match self.fetcher.fetch_text(&link.url).await {
            Ok(html) => paragraph_text(&html),
            Err(e) => {
                warn!(error = %e, "Paragraph fallback fetch failed");
                String::new()
            }
        };

        if paragraphs.is_empty() {
            warn!(title = %link.title, "No content extracted; using placeholder");
            return Outcome::Degraded(placeholder_for(&link.title), Degradation::Placeholder);
        }
        Outcome::Degraded(paragraphs, Degradation::ParagraphFallback)
    }

    /// Extract every link in order.
    #[instrument(level = "info", skip_all, fields(count = links.len()))]
    pub async fn extract_all(&self, links: Vec<ArticleLink>) -> Vec<RawArticle> {
        let articles: Vec<RawArticle> = stream::iter(links)
            .then(|link| async move {
                let outcome = self.extract(&link).await;
                if let Some(why) = outcome.degradation() {
                    debug!(
                        url = %link.url,
                        ?why,
                        chars = outcome.value().chars().count(),
                        "Extraction degraded"
                    );
                }
                let (content, degradation) = outcome.into_parts();
                RawArticle {
                    title: link.title,
                    url: link.url,
                    content,
                    degradations: degradation.into_iter().collect(),
                }
            })
            .collect()
            .await;

        let degraded = articles
            .iter()
            .filter(|a| !a.degradations.is_empty())
            .count();
        info!(count = articles.len(), degraded, "Extracted article contents");
        articles
    }
}

/// Tier 1: boilerplate-stripped body text, or empty when nothing article-like
/// is found.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(body) = json_ld_article_body(&document) {
        return body;
    }

    let marked: Vec<String> = document
        .select(&ARTICLE_BODY_SELECTOR)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect();
    if !marked.is_empty() {
        return marked.join(" ");
    }

    densest_paragraph_block(&document)
}

/// Tier 2: the text of every `<p>` on the page joined by spaces.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

fn json_ld_article_body(document: &Html) -> Option<String> {
    document.select(&JSON_LD_SELECTOR).find_map(|script| {
        let raw = script.text().collect::<String>();
        let value: Value = serde_json::from_str(raw.trim()).ok()?;
        find_article_body(&value)
            .map(normalize_whitespace)
            .filter(|body| !body.is_empty())
    })
}

fn find_article_body(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map
            .get("articleBody")
            .and_then(Value::as_str)
            .or_else(|| map.values().find_map(find_article_body)),
        Value::Array(items) => items.iter().find_map(find_article_body),
        _ => None,
    }
}

/// Paragraphs of the parent element holding the most paragraph text.
fn densest_paragraph_block(document: &Html) -> String {
    let mut order = Vec::new();
    let mut blocks: HashMap<_, (usize, Vec<String>)> = HashMap::new();

    for p in document.select(&PARAGRAPH_SELECTOR) {
        let Some(parent) = p.parent() else { continue };
        let text = element_text(p);
        if text.is_empty() {
            continue;
        }
        let entry = blocks.entry(parent.id()).or_insert_with(|| {
            order.push(parent.id());
            (0, Vec::new())
        });
        entry.0 += text.len();
        entry.1.push(text);
    }

    let mut best: Option<&(usize, Vec<String>)> = None;
    for id in &order {
        if let Some(block) = blocks.get(id) {
            if best.is_none_or(|b| block.0 > b.0) {
                best = Some(block);
            }
        }
    }
    best.map(|(_, texts)| texts.join(" ")).unwrap_or_default()
}
