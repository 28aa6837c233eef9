//! Error types for Forsk.

use thiserror::Error;

/// Library-level error type for Forsk operations.
#[derive(Error, Debug)]
pub enum ForskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid character '{character}' in query: {query}")]
    InvalidQuery { character: char, query: String },

    #[error("Bad response from arXiv API: {status}\n{body}")]
    RemoteApi { status: u16, body: String },

    #[error("No papers found for topic: {0}")]
    NoResults(String),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("No LaTeX engine found. Install TeX Live/MiKTeX or add pdflatex to PATH.")]
    NoEngine,

    #[error("LaTeX compilation failed: {0}")]
    Compilation(String),

    #[error("Rendered PDF not found: {}", .0.display())]
    ArtifactMissing(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Forsk operations.
pub type Result<T> = std::result::Result<T, ForskError>;
