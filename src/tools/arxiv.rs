//! arXiv search tool.
//!
//! Queries the arXiv export API and parses the Atom response into
//! structured paper entries.

use crate::config::ArxivSettings;
use crate::error::{ForskError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Characters that are not allowed in a normalized search query.
const INVALID_QUERY_CHARS: [char; 4] = ['(', ')', '"', ' '];

/// A single paper from an arXiv search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaperEntry {
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub pdf_link: Option<String>,
}

/// Parsed search results, in document order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub entries: Vec<PaperEntry>,
}

/// Client for the arXiv metadata API.
#[derive(Clone)]
pub struct ArxivClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    /// Create a client from settings.
    pub fn new(settings: &ArxivSettings) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("forsk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: settings.base_url.clone(),
        }
    }

    /// Search arXiv for recent papers on a topic.
    ///
    /// The topic is normalized (lowercased, whitespace joined with `+`)
    /// and validated before any network I/O. An empty result set is an
    /// error, not an empty answer.
    pub async fn search(&self, topic: &str, max_results: u32) -> Result<SearchResult> {
        let query = normalize_query(topic)?;

        // The arXiv API expects literal '+' separators in search_query,
        // so the URL is assembled by hand rather than through the query
        // encoder (which would escape them).
        let url = format!(
            "{}?search_query=all:{}&max_results={}&sortBy=submittedDate&sortOrder=descending",
            self.base_url, query, max_results
        );
        debug!("Requesting URL: {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForskError::RemoteApi {
                status: status.as_u16(),
                body,
            });
        }

        let xml = response.text().await?;
        let entries = parse_atom_feed(&xml)?;

        if entries.is_empty() {
            return Err(ForskError::NoResults(topic.to_string()));
        }

        info!("Found {} papers for topic: {}", entries.len(), topic);
        Ok(SearchResult { entries })
    }
}

/// Normalize a topic into an arXiv query string.
///
/// Lowercases, splits on whitespace, and rejoins with `+`. Fails with
/// `InvalidQuery` if the result still contains a parenthesis, quote,
/// or space.
pub fn normalize_query(topic: &str) -> Result<String> {
    let query = topic
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("+");

    for character in INVALID_QUERY_CHARS {
        if query.contains(character) {
            return Err(ForskError::InvalidQuery {
                character,
                query,
            });
        }
    }

    Ok(query)
}

/// Parse an arXiv Atom feed into paper entries, in document order.
pub fn parse_atom_feed(xml: &str) -> Result<Vec<PaperEntry>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut entries = Vec::new();

    let mut in_entry = false;
    let mut title = String::new();
    let mut summary = String::new();
    let mut authors: Vec<String> = Vec::new();
    let mut categories: Vec<String> = Vec::new();
    let mut pdf_link: Option<String> = None;
    let mut text_target: Option<&'static str> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name_buf: Vec<u8> = e.name().as_ref().to_vec();
                match strip_ns_prefix(&name_buf) {
                    b"entry" => {
                        in_entry = true;
                        title.clear();
                        summary.clear();
                        authors.clear();
                        categories.clear();
                        pdf_link = None;
                        text_target = None;
                    }
                    b"title" if in_entry => text_target = Some("title"),
                    b"summary" if in_entry => text_target = Some("summary"),
                    b"name" if in_entry => text_target = Some("author"),
                    b"category" if in_entry => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"term" {
                                categories.push(String::from_utf8_lossy(&attr.value).to_string());
                            }
                        }
                    }
                    b"link" if in_entry => {
                        let mut href: Option<String> = None;
                        let mut link_type: Option<String> = None;
                        for attr in e.attributes().flatten() {
                            let value = String::from_utf8_lossy(&attr.value).to_string();
                            match attr.key.as_ref() {
                                b"href" => href = Some(value),
                                b"type" => link_type = Some(value),
                                _ => {}
                            }
                        }
                        // First application/pdf link wins
                        if pdf_link.is_none() && link_type.as_deref() == Some("application/pdf") {
                            pdf_link = href;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(target) = text_target.take() {
                    let text = t
                        .unescape()
                        .map_err(|e| ForskError::FeedParse(e.to_string()))?
                        .to_string();
                    match target {
                        "title" => title = text,
                        "summary" => summary = text,
                        "author" => authors.push(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name_buf: Vec<u8> = e.name().as_ref().to_vec();
                if strip_ns_prefix(&name_buf) == b"entry" && in_entry {
                    in_entry = false;
                    entries.push(PaperEntry {
                        title: title.clone(),
                        summary: summary.trim().to_string(),
                        authors: authors.clone(),
                        categories: categories.clone(),
                        pdf_link: pdf_link.clone(),
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ForskError::FeedParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Strip a namespace prefix (e.g. `arxiv:`) from an element name.
fn strip_ns_prefix(name: &[u8]) -> &[u8] {
    match name.iter().position(|b| *b == b':') {
        Some(ix) => &name[ix + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:prompt+engineering</title>
  <entry>
    <id>http://arxiv.org/abs/2508.14042v1</id>
    <title>Prompt Engineering at Scale</title>
    <summary>
      We study prompt construction strategies.
    </summary>
    <author><name>Doe, J.</name></author>
    <author><name>Smith, A.</name></author>
    <link rel="alternate" type="text/html" href="http://arxiv.org/abs/2508.14042v1"/>
    <link title="pdf" rel="related" type="application/pdf" href="http://arxiv.org/pdf/2508.14042v1"/>
    <category term="cs.CL"/>
    <category term="cs.AI"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2508.10001v1</id>
    <title>Second Paper</title>
    <summary>Another abstract.</summary>
    <author><name>Lee, K.</name></author>
    <link rel="alternate" type="text/html" href="http://arxiv.org/abs/2508.10001v1"/>
    <category term="cs.LG"/>
  </entry>
</feed>
"#;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("Prompt Engineering").unwrap(), "prompt+engineering");
        assert_eq!(normalize_query("  mixture   of experts ").unwrap(), "mixture+of+experts");
    }

    #[test]
    fn test_normalize_query_rejects_parens() {
        let err = normalize_query("llm (survey)").unwrap_err();
        match err {
            ForskError::InvalidQuery { character, .. } => assert_eq!(character, '('),
            other => panic!("Expected InvalidQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_query_rejects_quotes() {
        assert!(matches!(
            normalize_query(r#""exact phrase""#),
            Err(ForskError::InvalidQuery { character: '"', .. })
        ));
    }

    #[tokio::test]
    async fn test_search_validates_before_network() {
        // Unroutable base URL: if validation did not run first, this
        // would surface as an HTTP error instead.
        let client = ArxivClient::new(&ArxivSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        });
        let err = client.search("bad (topic)", 5).await.unwrap_err();
        assert!(matches!(err, ForskError::InvalidQuery { character: '(', .. }));
    }

    #[test]
    fn test_parse_feed_entries_in_order() {
        let entries = parse_atom_feed(SAMPLE_FEED).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Prompt Engineering at Scale");
        assert_eq!(entries[1].title, "Second Paper");
    }

    #[test]
    fn test_parse_feed_trims_summary() {
        let entries = parse_atom_feed(SAMPLE_FEED).unwrap();
        assert_eq!(entries[0].summary, "We study prompt construction strategies.");
    }

    #[test]
    fn test_parse_feed_authors_and_categories() {
        let entries = parse_atom_feed(SAMPLE_FEED).unwrap();
        assert_eq!(entries[0].authors, vec!["Doe, J.", "Smith, A."]);
        assert_eq!(entries[0].categories, vec!["cs.CL", "cs.AI"]);
    }

    #[test]
    fn test_parse_feed_pdf_link() {
        let entries = parse_atom_feed(SAMPLE_FEED).unwrap();
        assert_eq!(
            entries[0].pdf_link.as_deref(),
            Some("http://arxiv.org/pdf/2508.14042v1")
        );
        // Second entry has no application/pdf link
        assert_eq!(entries[1].pdf_link, None);
    }

    #[test]
    fn test_parse_feed_no_entries() {
        let xml = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:nothing</title>
</feed>"#;
        let entries = parse_atom_feed(xml).unwrap();
        assert!(entries.is_empty());
    }

    /// Spin up a local stub API returning a fixed body and status.
    async fn stub_api(status: u16, body: &'static str) -> String {
        use axum::http::StatusCode;
        use axum::routing::any;

        let app = axum::Router::new().route(
            "/",
            any(move || async move { (StatusCode::from_u16(status).unwrap(), body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_search_returns_entries() {
        let base_url = stub_api(200, SAMPLE_FEED).await;
        let client = ArxivClient::new(&ArxivSettings {
            base_url,
            ..Default::default()
        });
        let result = client.search("prompt engineering", 5).await.unwrap();
        assert_eq!(result.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_search_empty_feed_is_no_results() {
        let base_url = stub_api(
            200,
            r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"></feed>"#,
        )
        .await;
        let client = ArxivClient::new(&ArxivSettings {
            base_url,
            ..Default::default()
        });
        let err = client.search("nothing here", 5).await.unwrap_err();
        match err {
            ForskError::NoResults(topic) => assert_eq!(topic, "nothing here"),
            other => panic!("Expected NoResults, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_http_error_carries_status_and_body() {
        let base_url = stub_api(503, "service unavailable").await;
        let client = ArxivClient::new(&ArxivSettings {
            base_url,
            ..Default::default()
        });
        let err = client.search("anything", 5).await.unwrap_err();
        match err {
            ForskError::RemoteApi { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("service unavailable"));
            }
            other => panic!("Expected RemoteApi, got {:?}", other),
        }
    }
}
