//! Link header parsing (RFC 8288)
//!
//! GitHub advertises pagination through the `Link` response header:
//! `<https://api.github.com/...?page=2>; rel="next", <...?page=5>; rel="last"`.

use super::types::PageMeta;
use reqwest::header::{HeaderMap, LINK};
use url::Url;

impl PageMeta {
    /// Build metadata from response headers
    ///
    /// Missing or unparseable headers yield terminal metadata.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_link_header)
            .unwrap_or_default()
    }

    /// Build metadata from the raw value of a `Link` header
    pub fn from_link_header(header: &str) -> Self {
        let mut meta = Self::default();

        for (url, rel) in parse_links(header) {
            let Ok(url) = Url::parse(url) else {
                tracing::debug!(url, "ignoring unparseable link");
                continue;
            };
            let page = query_value(&url, "page").and_then(|p| p.parse::<u32>().ok());

            match rel {
                "next" => {
                    meta.next_page = page;
                    meta.next_cursor =
                        query_value(&url, "cursor").or_else(|| query_value(&url, "after"));
                }
                "prev" => meta.prev_page = page,
                "first" => meta.first_page = page,
                "last" => meta.last_page = page,
                _ => {}
            }
        }

        meta
    }
}

/// Split a Link header into `(url, rel)` pairs
fn parse_links(header: &str) -> Vec<(&str, &str)> {
    let mut links = Vec::new();

    for part in header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            links.push((u, r));
        }
    }

    links
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
