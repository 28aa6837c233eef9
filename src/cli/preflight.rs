//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{ForskError, Result};
use crate::tools::LatexRenderer;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Chat and agent runs require an API key.
    Chat,
    /// Direct search and PDF reads have no local requirements.
    Search,
    /// Rendering requires a LaTeX engine.
    Render,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Chat => {
            check_api_key()?;
        }
        Operation::Search => {
            // Only needs network access
        }
        Operation::Render => {
            let renderer = LatexRenderer::new(&settings.latex)?;
            if renderer.resolve_engine().is_none() {
                return Err(ForskError::NoEngine);
            }
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(ForskError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(ForskError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_search_no_requirements() {
        // Search should always pass pre-flight (no local requirements)
        assert!(check(Operation::Search, &Settings::default()).is_ok());
    }
}
