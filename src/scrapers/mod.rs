//! Article acquisition: finding candidate stories and pulling their text.
//!
//! Acquisition runs in two phases:
//!
//! 1. **Locating**: [`SourceLocator`] queries a news search surface for the
//!    company and returns a capped list of `(title, url)` pairs
//! 2. **Extracting**: [`content::ContentExtractor`] downloads each link and
//!    isolates the story text
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Bing News | [`bing`] | HTML results page, `a.title` anchors |
//! | Google News | [`google_news`] | RSS search feed |
//!
//! Neither phase ever fails: a failed search yields no links and a failed
//! extraction yields placeholder text. Causes are logged.

pub mod bing;
pub mod content;
pub mod google_news;

use crate::config::SourceKind;
use crate::fetch::PageFetcher;
use crate::models::ArticleLink;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Finds candidate articles for a company on the configured search surface.
pub struct SourceLocator {
    kind: SourceKind,
    fetcher: Arc<dyn PageFetcher>,
    cap: usize,
}

impl SourceLocator {
    pub fn new(kind: SourceKind, fetcher: Arc<dyn PageFetcher>, cap: usize) -> Self {
        Self { kind, fetcher, cap }
    }

    pub fn search_url(&self, company: &str) -> String {
        match self.kind {
            SourceKind::Bing => bing::search_url(company),
            SourceKind::GoogleNews => google_news::search_url(company),
        }
    }

    /// Up to `cap` links in source order. Empty when the search fails or
    /// matches nothing; callers treat that as "no articles found".
    #[instrument(level = "info", skip(self), fields(source = ?self.kind))]
    pub async fn locate(&self, company: &str) -> Vec<ArticleLink> {
        let url = self.search_url(company);
        let body = match self.fetcher.fetch_text(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, %url, "News search failed");
                return Vec::new();
            }
        };

        let links = match self.kind {
            SourceKind::Bing => bing::parse_results(&body, &url, self.cap),
            SourceKind::GoogleNews => match google_news::parse_feed(&body, self.cap) {
                Ok(links) => links,
                Err(e) => {
                    warn!(error = %e, %url, "News feed could not be parsed");
                    Vec::new()
                }
            },
        };

        if links.is_empty() {
            warn!(%url, "News search returned no articles");
        } else {
            info!(count = links.len(), cap = self.cap, "Located articles");
        }
        links
    }
}
