//! Tool definitions and implementations for the agent system.
//!
//! Three stateless research tools are exposed to the model: arXiv
//! search, PDF text extraction, and LaTeX rendering. Each call owns its
//! inputs and outputs; only the rendered PDF outlives an invocation.

mod arxiv;
mod latex;
mod pdf;

pub use arxiv::{normalize_query, parse_atom_feed, ArxivClient, PaperEntry, SearchResult};
pub use latex::LatexRenderer;
pub use pdf::PdfReader;

use crate::config::Settings;
use crate::error::{ForskError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search arXiv for recently submitted papers on a topic.
    ArxivSearch {
        topic: String,
        #[serde(default = "default_max_results")]
        max_results: u32,
    },

    /// Fetch a PDF by URL and extract its text.
    ReadPdf { url: String },

    /// Render a LaTeX document to PDF.
    RenderLatexPdf { latex_content: String },
}

fn default_max_results() -> u32 {
    5
}

/// Tool execution context owning the three tool implementations.
///
/// Also tracks the most recent rendered artifact so front ends can
/// offer it for download.
pub struct ToolContext {
    arxiv: ArxivClient,
    pdf: PdfReader,
    latex: LatexRenderer,
    last_artifact: Arc<Mutex<Option<PathBuf>>>,
}

impl ToolContext {
    /// Create a tool context from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            arxiv: ArxivClient::new(&settings.arxiv),
            pdf: PdfReader::new(settings.arxiv.timeout_seconds),
            latex: LatexRenderer::new(&settings.latex)?,
            last_artifact: Arc::new(Mutex::new(None)),
        })
    }

    /// Path of the most recently rendered PDF, if any.
    pub fn last_artifact(&self) -> Option<PathBuf> {
        self.last_artifact.lock().expect("artifact lock poisoned").clone()
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::ArxivSearch { topic, max_results } => {
                self.execute_search(topic, *max_results).await
            }
            ToolCall::ReadPdf { url } => self.execute_read_pdf(url).await,
            ToolCall::RenderLatexPdf { latex_content } => {
                self.execute_render(latex_content).await
            }
        }
    }

    async fn execute_search(&self, topic: &str, max_results: u32) -> Result<String> {
        let result = self.arxiv.search(topic, max_results).await?;
        Ok(format_search_result(topic, &result))
    }

    async fn execute_read_pdf(&self, url: &str) -> Result<String> {
        self.pdf.extract_text(url).await
    }

    async fn execute_render(&self, latex_content: &str) -> Result<String> {
        let pdf_path = self.latex.render(latex_content).await?;
        *self.last_artifact.lock().expect("artifact lock poisoned") = Some(pdf_path.clone());
        Ok(format!("Successfully rendered PDF: {}", pdf_path.display()))
    }
}

/// Format search results for the model.
fn format_search_result(topic: &str, result: &SearchResult) -> String {
    let formatted = result
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let pdf = entry.pdf_link.as_deref().unwrap_or("no PDF link");
            format!(
                "{}. {}\n   Authors: {}\n   Categories: {}\n   PDF: {}\n   {}",
                i + 1,
                entry.title,
                entry.authors.join(", "),
                entry.categories.join(", "),
                pdf,
                entry.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Found {} papers for '{}':\n\n{}",
        result.entries.len(),
        topic,
        formatted
    )
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "arxiv_search".to_string(),
                description: Some(
                    "Search arXiv for recently submitted papers about a topic. \
                    Returns titles, authors, categories, abstracts, and PDF links."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "topic": {
                            "type": "string",
                            "description": "The topic to search for on arXiv"
                        },
                        "max_results": {
                            "type": "integer",
                            "description": "Maximum number of papers to return (default: 5)",
                            "default": 5
                        }
                    },
                    "required": ["topic"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "read_pdf".to_string(),
                description: Some(
                    "Read and extract the full text of a PDF given its URL. \
                    Use this to read a paper found with arxiv_search."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "The URL of the PDF to read"
                        }
                    },
                    "required": ["url"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "render_latex_pdf".to_string(),
                description: Some(
                    "Render a complete LaTeX document to a PDF file. \
                    Pass the full document source, including the preamble. \
                    Returns the path of the generated PDF."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "latex_content": {
                            "type": "string",
                            "description": "The LaTeX document content as a string"
                        }
                    },
                    "required": ["latex_content"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| ForskError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "arxiv_search" => {
            let topic = args["topic"]
                .as_str()
                .ok_or_else(|| ForskError::Agent("Missing 'topic' argument".to_string()))?
                .to_string();
            let max_results = args["max_results"].as_u64().unwrap_or(5) as u32;
            Ok(ToolCall::ArxivSearch { topic, max_results })
        }
        "read_pdf" => {
            let url = args["url"]
                .as_str()
                .ok_or_else(|| ForskError::Agent("Missing 'url' argument".to_string()))?
                .to_string();
            Ok(ToolCall::ReadPdf { url })
        }
        "render_latex_pdf" => {
            let latex_content = args["latex_content"]
                .as_str()
                .ok_or_else(|| ForskError::Agent("Missing 'latex_content' argument".to_string()))?
                .to_string();
            Ok(ToolCall::RenderLatexPdf { latex_content })
        }
        _ => Err(ForskError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arxiv_search_tool() {
        let tool =
            parse_tool_call("arxiv_search", r#"{"topic": "prompt engineering", "max_results": 3}"#)
                .unwrap();
        match tool {
            ToolCall::ArxivSearch { topic, max_results } => {
                assert_eq!(topic, "prompt engineering");
                assert_eq!(max_results, 3);
            }
            _ => panic!("Expected ArxivSearch tool"),
        }
    }

    #[test]
    fn test_parse_arxiv_search_default_max_results() {
        let tool = parse_tool_call("arxiv_search", r#"{"topic": "moe routing"}"#).unwrap();
        assert!(matches!(tool, ToolCall::ArxivSearch { max_results: 5, .. }));
    }

    #[test]
    fn test_parse_read_pdf_tool() {
        let tool =
            parse_tool_call("read_pdf", r#"{"url": "http://arxiv.org/pdf/2508.14042v1"}"#).unwrap();
        match tool {
            ToolCall::ReadPdf { url } => assert_eq!(url, "http://arxiv.org/pdf/2508.14042v1"),
            _ => panic!("Expected ReadPdf tool"),
        }
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("delete_everything", "{}").is_err());
    }

    #[test]
    fn test_parse_missing_argument() {
        assert!(parse_tool_call("read_pdf", "{}").is_err());
    }

    #[test]
    fn test_format_search_result() {
        let result = SearchResult {
            entries: vec![PaperEntry {
                title: "A Paper".to_string(),
                summary: "An abstract.".to_string(),
                authors: vec!["Doe, J.".to_string()],
                categories: vec!["cs.AI".to_string()],
                pdf_link: None,
            }],
        };
        let text = format_search_result("agents", &result);
        assert!(text.contains("Found 1 papers for 'agents'"));
        assert!(text.contains("A Paper"));
        assert!(text.contains("no PDF link"));
    }
}
