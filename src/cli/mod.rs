//! CLI module for Forsk.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Forsk - AI Research Assistant
///
/// A CLI research assistant for searching, reading, and writing arXiv papers.
/// The name "Forsk" comes from the Norwegian word for "research."
#[derive(Parser, Debug)]
#[command(name = "forsk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Forsk and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Search arXiv for recently submitted papers
    Search {
        /// The topic to search for
        topic: String,

        /// Maximum number of papers to return
        #[arg(short, long)]
        max_results: Option<u32>,

        /// Output raw JSON instead of a formatted listing
        #[arg(long)]
        json: bool,
    },

    /// Extract the text of a PDF by URL
    Read {
        /// The URL of the PDF to read
        url: String,

        /// Write extracted text to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render a LaTeX document to PDF
    Render {
        /// Path to a .tex file, or '-' to read from stdin
        input: String,
    },

    /// Run the research agent on a single task
    Ask {
        /// The task for the agent (e.g. "Summarize the latest MoE papers")
        task: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start an interactive chat session
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start the HTTP API server for web chat front ends
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "chat.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
