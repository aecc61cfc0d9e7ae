//! Google News RSS search feed reader.
//!
//! The feed is plain RSS 2.0; each `<item>` carries the headline in `<title>`
//! and the story URL in `<link>`.

use crate::error::FetchError;
use crate::models::ArticleLink;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use tracing::debug;

const SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Feed URL for a company name.
pub fn search_url(company: &str) -> String {
    format!(
        "{}?q={}&hl=en-US&gl=US&ceid=US:en",
        SEARCH_URL,
        urlencoding::encode(company)
    )
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Link,
}

/// Extract up to `cap` links from an RSS document, in feed order.
pub fn parse_feed(xml: &str, cap: usize) -> Result<Vec<ArticleLink>, FetchError> {
    // Text is not trimmed by the reader: entity references split a title into
    // several text events and the spaces around them must survive.
    let mut reader = Reader::from_str(xml);

    let mut links = Vec::new();
    let mut in_item = false;
    let mut field: Option<Field> = None;
    let mut title = String::new();
    let mut link = String::new();

    loop {
        if links.len() >= cap {
            break;
        }
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    link.clear();
                }
                b"title" if in_item => field = Some(Field::Title),
                b"link" if in_item => field = Some(Field::Link),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = false;
                    let (t, l) = (title.trim(), link.trim());
                    if !t.is_empty() && !l.is_empty() {
                        links.push(ArticleLink {
                            title: t.to_string(),
                            url: l.to_string(),
                        });
                    }
                }
                b"title" | b"link" => field = None,
                _ => {}
            },
            Ok(Event::Text(text)) => {
                if let (Some(f), Ok(decoded)) = (field, text.decode()) {
                    push_field(f, &decoded, &mut title, &mut link);
                }
            }
            Ok(Event::CData(data)) => {
                if let (Some(f), Ok(decoded)) = (field, data.decode()) {
                    push_field(f, &decoded, &mut title, &mut link);
                }
            }
            Ok(Event::GeneralRef(entity)) => {
                let Some(f) = field else { continue };
                let resolved = match entity.resolve_char_ref() {
                    Ok(Some(ch)) => Some(ch.to_string()),
                    _ => entity
                        .decode()
                        .ok()
                        .and_then(|name| resolve_predefined_entity(&name).map(str::to_string)),
                };
                if let Some(resolved) = resolved {
                    push_field(f, &resolved, &mut title, &mut link);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FetchError::Feed(format!(
                    "at byte {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    debug!(count = links.len(), "Parsed Google News feed");
    Ok(links)
}

fn push_field(field: Field, text: &str, title: &mut String, link: &mut String) {
    match field {
        Field::Title => title.push_str(text),
        Field::Link => link.push_str(text),
    }
}
