//! Bing News search results scraper.
//!
//! Results pages list each story as an anchor with the `title` class:
//!
//! ```html
//! <a class="title" href="https://example.com/story">Acme beats estimates</a>
//! ```

use crate::models::ArticleLink;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

const SEARCH_URL: &str = "https://www.bing.com/news/search";

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.title").expect("static selector"));

/// Results page URL for a company name.
pub fn search_url(company: &str) -> String {
    format!("{}?q={}&FORM=HDRSC6", SEARCH_URL, urlencoding::encode(company))
}

/// Extract up to `cap` links from a results page, in page order.
///
/// Relative hrefs are resolved against `page_url`. Anchors without an href or
/// with blank text are skipped.
pub fn parse_results(html: &str, page_url: &str, cap: usize) -> Vec<ArticleLink> {
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);

    let links: Vec<ArticleLink> = document
        .select(&TITLE_SELECTOR)
        .filter_map(|anchor| {
            let title = anchor.text().collect::<String>().trim().to_string();
            let href = anchor.value().attr("href")?;
            if title.is_empty() {
                return None;
            }
            let url = match &base {
                Some(base) => base.join(href).ok()?.to_string(),
                None => href.to_string(),
            };
            Some(ArticleLink { title, url })
        })
        .take(cap)
        .collect();

    debug!(count = links.len(), "Parsed Bing results");
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="news-card"><a class="title" href="https://news.example.com/a">  Acme beats estimates </a></div>
          <div class="news-card"><a class="title" href="/news/b">Acme recalls widgets</a></div>
          <div class="news-card"><a class="other" href="https://news.example.com/x">Not a result</a></div>
          <div class="news-card"><a class="title">No link here</a></div>
          <div class="news-card"><a class="title" href="https://news.example.com/c"> </a></div>
          <div class="news-card"><a class="title" href="https://news.example.com/d">Acme opens plant</a></div>
          <div class="news-card"><a class="title" href="https://news.example.com/e">Acme CEO interview</a></div>
        </body></html>
    "#;

    #[test]
    fn test_search_url_encodes_company() {
        assert_eq!(
            search_url("Tata Motors"),
            "https://www.bing.com/news/search?q=Tata%20Motors&FORM=HDRSC6"
        );
    }

    #[test]
    fn test_parse_results_in_page_order() {
        let links = parse_results(PAGE, &search_url("Acme"), 10);
        let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Acme beats estimates",
                "Acme recalls widgets",
                "Acme opens plant",
                "Acme CEO interview"
            ]
        );
        assert_eq!(links[1].url, "https://www.bing.com/news/b");
    }

    #[test]
    fn test_parse_results_respects_cap() {
        let links = parse_results(PAGE, &search_url("Acme"), 3);
        assert_eq!(links.len(), 3);
        assert_eq!(links[2].title, "Acme opens plant");
    }

    #[test]
    fn test_parse_results_without_matches() {
        let links = parse_results("<html><body><p>No results</p></body></html>", SEARCH_URL, 3);
        assert!(links.is_empty());
    }
}
