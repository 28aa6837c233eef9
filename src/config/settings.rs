//! Configuration settings for Forsk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub arxiv: ArxivSettings,
    pub latex: LatexSettings,
    pub chat: ChatSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.forsk".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// arXiv search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArxivSettings {
    /// Base URL of the arXiv query API.
    pub base_url: String,
    /// Default number of results per search.
    pub max_results: u32,
    /// HTTP timeout for API and PDF requests, in seconds.
    pub timeout_seconds: u64,
}

impl Default for ArxivSettings {
    fn default() -> Self {
        Self {
            base_url: "https://export.arxiv.org/api/query".to_string(),
            max_results: 5,
            timeout_seconds: 60,
        }
    }
}

/// LaTeX rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexSettings {
    /// Directory where rendered PDFs and their sources are written.
    pub output_dir: String,
    /// Engine candidates, probed in order. Entries may be bare executable
    /// names (resolved via PATH) or absolute paths to known install
    /// locations.
    pub engines: Vec<String>,
}

impl Default for LatexSettings {
    fn default() -> Self {
        Self {
            output_dir: "~/.forsk/output".to_string(),
            engines: vec![
                "pdflatex".to_string(),
                "xelatex".to_string(),
                "C:/Program Files/MiKTeX/miktex/bin/x64/pdflatex.exe".to_string(),
                "~/AppData/Local/Programs/MiKTeX/miktex/bin/x64/pdflatex.exe".to_string(),
            ],
        }
    }
}

/// Chat and agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// LLM model used for chat and agent runs.
    pub model: String,
    /// Maximum tool-calling iterations per turn.
    pub max_tool_iterations: usize,
    /// Optional system prompt override.
    pub system_prompt: Option<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tool_iterations: 10,
            system_prompt: None,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ForskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("forsk")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded LaTeX output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.latex.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.arxiv.max_results, 5);
        assert!(settings.arxiv.base_url.contains("export.arxiv.org"));
        assert_eq!(settings.latex.engines[0], "pdflatex");
        assert_eq!(settings.chat.model, "gpt-4o");
    }

    #[test]
    fn test_partial_config_parses() {
        let settings: Settings = toml::from_str(
            r#"
            [arxiv]
            max_results = 3
            "#,
        )
        .unwrap();
        assert_eq!(settings.arxiv.max_results, 3);
        // Untouched sections keep their defaults
        assert_eq!(settings.chat.max_tool_iterations, 10);
    }

    #[test]
    fn test_expand_path_tilde() {
        let path = Settings::expand_path("~/.forsk");
        assert!(!path.to_string_lossy().starts_with('~'));
    }
}
