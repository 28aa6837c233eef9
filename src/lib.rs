//! Forsk - AI Research Assistant
//!
//! A CLI research assistant for searching, reading, and writing arXiv papers.
//!
//! The name "Forsk" comes from the Norwegian word for "research."
//!
//! # Overview
//!
//! Forsk allows you to:
//! - Search arXiv for recently submitted papers on a topic
//! - Read the full text of papers from their PDF links
//! - Render LaTeX documents to PDF
//! - Chat with an LLM agent that drives all three tools
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `tools` - The three research tools (arXiv search, PDF reading, LaTeX rendering)
//! - `agent` - LLM agent and chat session with tool calling
//! - `cli` - Command-line interface and HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use forsk::config::Settings;
//! use forsk::tools::ArxivClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = ArxivClient::new(&settings.arxiv);
//!
//!     let result = client.search("prompt engineering", 5).await?;
//!     println!("Found {} papers", result.entries.len());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod tools;

pub use error::{ForskError, Result};
