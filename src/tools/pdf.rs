//! PDF text extraction tool.
//!
//! Fetches a remote PDF and extracts its plain text page by page.

use crate::error::{ForskError, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Reader for remote PDF documents.
#[derive(Clone)]
pub struct PdfReader {
    http: reqwest::Client,
}

impl PdfReader {
    /// Create a reader with the given request timeout.
    pub fn new(timeout_seconds: u64) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("forsk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// Fetch a PDF by URL and extract its text.
    ///
    /// The whole response body is treated as PDF bytes. Page texts are
    /// concatenated with a newline after each page and the result is
    /// trimmed. Extraction is all-or-nothing: any fetch or parse failure
    /// propagates, with no partial result.
    pub async fn extract_text(&self, url: &str) -> Result<String> {
        debug!("Fetching PDF from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ForskError::Extraction(format!("fetch failed for {}: {}", url, e)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ForskError::Extraction(format!("body read failed for {}: {}", url, e)))?;

        let text = extract_pages(&bytes)?;
        info!("Extracted {} characters of text from {}", text.len(), url);
        Ok(text)
    }
}

/// Extract text from PDF bytes, one page per newline-terminated segment.
pub fn extract_pages(bytes: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ForskError::Extraction(format!("PDF parse failed: {}", e)))?;

    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal PDF with one Helvetica text line per page.
    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        let count = page_texts.len();
        let font_id = 3 + 2 * count;
        let kids = (0..count)
            .map(|i| format!("{} 0 R", 3 + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            "1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n".to_string(),
            format!(
                "2 0 obj << /Type /Pages /Kids [{}] /Count {} >> endobj\n",
                kids, count
            ),
        ];
        for (i, text) in page_texts.iter().enumerate() {
            let page_id = 3 + 2 * i;
            let content_id = 4 + 2 * i;
            objects.push(format!(
                "{} 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Contents {} 0 R /Resources << /Font << /F1 {} 0 R >> >> >> endobj\n",
                page_id, content_id, font_id
            ));
            let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET\n", text);
            objects.push(format!(
                "{} 0 obj << /Length {} >> stream\n{}endstream\nendobj\n",
                content_id,
                stream.len(),
                stream
            ));
        }
        objects.push(format!(
            "{} 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
            font_id
        ));

        let mut pdf = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n");
        let mut offsets = Vec::new();
        for obj in &objects {
            offsets.push(pdf.len());
            pdf.extend_from_slice(obj.as_bytes());
        }
        let xref_pos = pdf.len();
        pdf.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
        );
        for off in &offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer << /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_pos
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_extract_pages_single_page() {
        let text = extract_pages(&build_pdf(&["Hello"])).unwrap();
        assert!(text.contains("Hello"));
        // Trimmed overall: no trailing page separator
        assert_eq!(text, text.trim());
    }

    #[test]
    fn test_extract_pages_joins_pages_with_newline() {
        let text = extract_pages(&build_pdf(&["One", "Two"])).unwrap();
        let first = text.find("One").unwrap();
        let second = text.find("Two").unwrap();
        assert!(first < second);
        assert!(text[first..second].contains('\n'));
    }

    #[test]
    fn test_extract_pages_rejects_garbage() {
        let err = extract_pages(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ForskError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_extract_text_unreachable_url() {
        let reader = PdfReader::new(2);
        let err = reader
            .extract_text("http://127.0.0.1:1/paper.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ForskError::Extraction(_)));
    }
}
